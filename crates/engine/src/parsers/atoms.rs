use chumsky::prelude::*;
use num_complex::Complex64;

use crate::ast::Expression;

type AtomExtra<'src> = extra::Err<Rich<'src, char>>;

/// Formulas that need no further splitting: `z`, the imaginary unit and signed literals.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom<'src> {
    Variable,
    ImaginaryUnit {
        negative: bool,
    },
    Number {
        negative: bool,
        whole: &'src str,
        fraction: Option<&'src str>,
        imaginary: bool,
    },
}

impl Atom<'_> {
    /// The tree for this atom, `None` when a literal does not fit in an `f64`.
    pub fn to_expression(&self) -> Option<Expression> {
        match self {
            Self::Variable => Some(Expression::Variable),
            Self::ImaginaryUnit { negative } => {
                Some(Expression::constant(0.0, if *negative { -1.0 } else { 1.0 }))
            }
            Self::Number {
                negative,
                whole,
                fraction,
                imaginary,
            } => {
                // Built by hand so the decimal comma never reaches the float parser
                let magnitude = format!("{whole}.{}", fraction.unwrap_or("0"))
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())?;
                let value = if *negative { -magnitude } else { magnitude };
                Some(Expression::Constant(if *imaginary {
                    Complex64::new(0.0, value)
                } else {
                    Complex64::new(value, 0.0)
                }))
            }
        }
    }
}

fn sign<'src>() -> impl Parser<'src, &'src str, bool, AtomExtra<'src>> + Clone {
    one_of("+-")
        .or_not()
        .map(|sign| sign == Some('-'))
        .labelled("Sign")
}

pub fn variable<'src>() -> impl Parser<'src, &'src str, Atom<'src>, AtomExtra<'src>> + Clone {
    one_of("zZ").to(Atom::Variable).labelled("Variable")
}

pub fn imaginary_unit<'src>() -> impl Parser<'src, &'src str, Atom<'src>, AtomExtra<'src>> + Clone
{
    sign()
        .then_ignore(one_of("iI"))
        .map(|negative| Atom::ImaginaryUnit { negative })
        .labelled("Imaginary Unit")
}

pub fn number<'src>() -> impl Parser<'src, &'src str, Atom<'src>, AtomExtra<'src>> + Clone {
    let digits = text::digits(10).to_slice();
    sign()
        .then(digits.clone())
        .then(one_of(".,").ignore_then(digits.or_not()).or_not())
        .then(one_of("iI").or_not())
        .map(|(((negative, whole), fraction), unit)| Atom::Number {
            negative,
            whole,
            fraction: fraction.flatten(),
            imaginary: unit.is_some(),
        })
        .labelled("Number")
}

/// Matches the whole of `text` as a single atom.
pub fn atom<'src>() -> impl Parser<'src, &'src str, Atom<'src>, AtomExtra<'src>> + Clone {
    choice((variable(), imaginary_unit(), number())).then_ignore(end())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Op {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'+' => Some(Op::Add),
            b'-' => Some(Op::Sub),
            b'*' => Some(Op::Mul),
            b'/' => Some(Op::Div),
            b'^' => Some(Op::Pow),
            _ => None,
        }
    }

    pub fn is_additive(self) -> bool {
        matches!(self, Op::Add | Op::Sub)
    }

    pub fn is_multiplicative(self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }
}
