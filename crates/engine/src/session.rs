use std::fmt::Display;

use log::info;
use num_complex::Complex64;

use crate::{
    ast::{Eval, Expression},
    error::{FormulaError, FormulaResult},
    grid::{GridGenerator, GridShape},
    parsers::{FormulaParser, normalize},
    utils::{format_complex, format_value, plural_s},
};

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    Define(&'a str),
    At(&'a str),
    Grid(GridShape),
    Check(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> FormulaResult<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next() {
            None => Err(FormulaError::command(0..0, "Nothing to do".into())),
            Some("at") => Ok(Self::At(rest_of(line, "at"))),
            Some("check") => Ok(Self::Check(rest_of(line, "check"))),
            Some("grid") => {
                let numbers = words
                    .clone()
                    .skip(1)
                    .map(|word| {
                        word.parse::<f64>().map_err(|_| {
                            FormulaError::command(0..line.len(), format!("'{word}' is not a number"))
                        })
                    })
                    .collect::<FormulaResult<Vec<_>>>()?;
                let shape = match (words.next(), numbers.as_slice()) {
                    (Some("square"), &[distance]) => GridShape::Square { distance },
                    (Some("angle"), &[radial, angle]) => GridShape::ConstantAngle { radial, angle },
                    (Some("auto"), &[distance]) => GridShape::ApproximateDistance { distance },
                    _ => {
                        return Err(FormulaError::command(
                            0..line.len(),
                            "Expected 'grid square <d>', 'grid angle <radial> <degrees>' or 'grid auto <d>'".into(),
                        ));
                    }
                };
                shape
                    .check()
                    .map_err(|msg| FormulaError::command(0..line.len(), msg))?;
                Ok(Self::Grid(shape))
            }
            Some(_) => Ok(Self::Define(line)),
        }
    }

    /// The formula this command carries, if any.
    pub fn formula(&self) -> Option<&'a str> {
        match self {
            Self::Define(formula) | Self::At(formula) | Self::Check(formula) => Some(*formula),
            Self::Grid(_) => None,
        }
    }
}

fn rest_of<'a>(line: &'a str, keyword: &str) -> &'a str {
    line[keyword.len()..].trim_start()
}

/// The result of one executed command, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Function(String),
    Value {
        point: Complex64,
        value: Option<Complex64>,
    },
    Grid(Vec<(Complex64, Option<Complex64>)>),
    Parseable {
        formula: String,
        parseable: bool,
    },
}

impl Output {
    pub fn render(&self, prefix: &str) {
        match self {
            Self::Grid(values) => {
                println!("{prefix}{} point{}", values.len(), plural_s(values.len()));
                for (point, value) in values {
                    println!("{prefix}  f({}) = {}", format_complex(*point), format_value(*value));
                }
            }
            other => println!("{prefix}{other}"),
        }
    }
}

impl Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function(rendered) => write!(f, "f(z) = {rendered}"),
            Self::Value { point, value } => {
                write!(f, "f({}) = {}", format_complex(*point), format_value(*value))
            }
            Self::Grid(values) => {
                let defined = values.iter().filter(|(_, value)| value.is_some()).count();
                write!(
                    f,
                    "{} point{}, {defined} defined",
                    values.len(),
                    plural_s(values.len())
                )
            }
            Self::Parseable { formula, parseable } => write!(
                f,
                "'{formula}' {} a valid formula",
                if *parseable { "is" } else { "is not" }
            ),
        }
    }
}

/// Line-oriented front end: define a function, then evaluate it at points or over grids.
pub struct Session {
    parser: FormulaParser,
    grid: GridGenerator,
    function: Option<Expression>,
}

impl Session {
    pub fn new(parser: FormulaParser, grid: GridGenerator) -> Self {
        Self {
            parser,
            grid,
            function: None,
        }
    }

    pub fn function(&self) -> Option<&Expression> {
        self.function.as_ref()
    }

    pub fn execute(&mut self, line: &str) -> FormulaResult<Output> {
        match Command::parse(line)? {
            Command::Define(formula) => {
                let function = self.parser.diagnose(formula)?;
                info!("new function: {function}");
                let rendered = function.to_string();
                self.function = Some(function);
                Ok(Output::Function(rendered))
            }
            Command::At(formula) => {
                let function = self.current()?;
                let point = self.point(formula)?;
                Ok(Output::Value {
                    point,
                    value: function.eval(point),
                })
            }
            Command::Grid(shape) => {
                let function = self.current()?;
                let values = self
                    .grid
                    .generate(shape)
                    .into_iter()
                    .map(|point| (point, function.eval(point)))
                    .collect();
                Ok(Output::Grid(values))
            }
            Command::Check(formula) => Ok(Output::Parseable {
                formula: formula.to_string(),
                parseable: self.parser.is_parseable(formula),
            }),
        }
    }

    /// Renders an error from [`Session::execute`] against the formula it came from.
    pub fn diagnostic(&self, line: &str, err: &FormulaError) -> String {
        match Command::parse(line).ok().and_then(|command| command.formula()) {
            Some(formula) if !err.is_command() => err.render("formula", &normalize(formula)),
            _ => format!("{err}"),
        }
    }

    fn current(&self) -> FormulaResult<&Expression> {
        self.function.as_ref().ok_or_else(|| {
            FormulaError::command(0..0, "Enter a function of z before evaluating it".into())
        })
    }

    fn point(&self, formula: &str) -> FormulaResult<Complex64> {
        let point = self.parser.diagnose(formula)?;
        if !point.is_constant() {
            return Err(FormulaError::command(
                0..formula.len(),
                "A point cannot depend on z".into(),
            ));
        }
        point
            .eval(Complex64::new(0.0, 0.0))
            .ok_or_else(|| FormulaError::command(0..formula.len(), "The point is undefined".into()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(FormulaParser::default(), GridGenerator::new(10.0, 10.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FormulaErrorKind, utils::tests::assert_near};

    #[test]
    fn commands() {
        assert_eq!(Ok(Command::Define("z^2")), Command::parse("  z^2 "));
        assert_eq!(Ok(Command::At("1.5 - 2i")), Command::parse("at 1.5 - 2i"));
        assert_eq!(Ok(Command::Check("sin(")), Command::parse("check sin("));
        assert_eq!(
            Ok(Command::Grid(GridShape::Square { distance: 0.5 })),
            Command::parse("grid square 0.5")
        );
        assert_eq!(
            Ok(Command::Grid(GridShape::ConstantAngle {
                radial: 1.0,
                angle: 45.0
            })),
            Command::parse("grid angle 1 45")
        );
        assert_eq!(
            Ok(Command::Grid(GridShape::ApproximateDistance { distance: 2.0 })),
            Command::parse("grid auto 2")
        );
        assert!(Command::parse("grid square").is_err());
        assert!(Command::parse("grid angle 1").is_err());
        assert!(Command::parse("grid hexagon 1").is_err());
        assert!(Command::parse("grid square x").is_err());
        assert!(Command::parse("   ").is_err());
    }

    #[test]
    fn grid_limits() {
        assert!(Command::parse("grid square 0.5").is_ok());
        assert!(Command::parse("grid square 5").is_ok());
        assert!(Command::parse("grid auto 0.5").is_ok());
        assert!(Command::parse("grid angle 5 180").is_ok());
        assert!(Command::parse("grid angle 0.5 5").is_ok());

        let err = Command::parse("grid square 1e-9").unwrap_err();
        assert_eq!(FormulaErrorKind::Command, err.kind);
        assert_eq!("Distance 0.000000001 is outside 0.5..=5", err.msg);
        assert!(Command::parse("grid square 5.5").is_err());
        assert!(Command::parse("grid auto 0.1").is_err());
        assert!(Command::parse("grid angle 0.25 45").is_err());
        assert!(Command::parse("grid angle 1 4").is_err());
        assert!(Command::parse("grid angle 1 181").is_err());
        assert!(Command::parse("grid square NaN").is_err());
        assert!(Command::parse("grid square inf").is_err());

        let mut session = Session::new(FormulaParser::default(), GridGenerator::new(1e7, 1e7));
        session.execute("z").unwrap();
        assert_eq!(
            "0 points, 0 defined",
            session.execute("grid square 0.5").unwrap().to_string()
        );
    }

    #[test]
    fn define_and_evaluate() {
        let mut session = Session::default();
        let output = session.execute("z*z + 1").unwrap();
        assert_eq!("f(z) = 1 + z*z", output.to_string());

        let output = session.execute("at 2i").unwrap();
        assert_eq!("f(2i) = -3", output.to_string());

        let Output::Value { point, value } = session.execute("at 1.5-2i").unwrap() else {
            panic!("expected a value");
        };
        assert_eq!(Complex64::new(1.5, -2.0), point);
        assert_near(Complex64::new(-0.75, -6.0), value.unwrap(), 1e-12);
    }

    #[test]
    fn undefined_values() {
        let mut session = Session::default();
        session.execute("1/z").unwrap();
        assert_eq!("f(0) = undefined", session.execute("at 0").unwrap().to_string());
    }

    #[test]
    fn grids() {
        let mut session = Session::new(FormulaParser::new(false), GridGenerator::new(1.0, 1.0));
        session.execute("1/z").unwrap();
        let output = session.execute("grid square 1").unwrap();
        assert_eq!("9 points, 8 defined", output.to_string());

        let Output::Grid(values) = session.execute("grid angle 1 45").unwrap() else {
            panic!("expected a grid");
        };
        assert_eq!(9, values.len());
        assert_eq!((Complex64::new(0.0, 0.0), None), values[0]);
    }

    #[test]
    fn checks() {
        let mut session = Session::default();
        assert_eq!(
            "'sin(z' is not a valid formula",
            session.execute("check sin(z").unwrap().to_string()
        );
        assert_eq!(
            "'sin(z)' is a valid formula",
            session.execute("check sin(z)").unwrap().to_string()
        );
        assert!(session.function().is_none());
    }

    #[test]
    fn errors() {
        let mut session = Session::default();

        let err = session.execute("at 1").unwrap_err();
        assert_eq!(FormulaErrorKind::Command, err.kind);
        assert_eq!(
            "Command error at 0..0: Enter a function of z before evaluating it",
            session.diagnostic("at 1", &err)
        );

        let err = session.execute("z + Y").unwrap_err();
        assert_eq!(FormulaErrorKind::Lexical, err.kind);
        assert!(session.diagnostic("z + Y", &err).contains("Unknown letter 'Y'"));
        assert!(session.function().is_none());

        session.execute("z").unwrap();
        let err = session.execute("at z+1").unwrap_err();
        assert_eq!("A point cannot depend on z", err.msg);
        let err = session.execute("at 1/0").unwrap_err();
        assert_eq!(FormulaErrorKind::Parse, err.kind);
        assert!(session.function().is_some());
    }
}
