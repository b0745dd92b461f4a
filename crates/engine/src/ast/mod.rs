use std::fmt::Display;

use num_complex::Complex64;

use crate::utils::format_complex;

mod eval;

pub use eval::{EPSILON, Eval};

/// An immutable expression tree over the single complex variable `z`.
#[derive(Debug, Clone)]
pub enum Expression {
    Variable,
    Constant(Complex64),
    Sum(Vec<Summand>),
    Product(Vec<Factor>),
    Power(Box<Expression>, Box<Expression>),
    Function(MathFn, Box<Expression>),
}

impl Expression {
    pub fn constant(re: f64, im: f64) -> Self {
        Self::Constant(Complex64::new(re, im))
    }

    pub fn sum(summands: Vec<Summand>) -> Self {
        Self::Sum(summands)
    }

    pub fn product(factors: Vec<Factor>) -> Self {
        Self::Product(factors)
    }

    pub fn power(base: Expression, exponent: Expression) -> Self {
        Self::Power(Box::new(base), Box::new(exponent))
    }

    pub fn function(math_fn: MathFn, argument: Expression) -> Self {
        Self::Function(math_fn, Box::new(argument))
    }

    /// True when the value does not depend on `z`.
    pub fn is_constant(&self) -> bool {
        match self {
            Self::Variable => false,
            Self::Constant(_) => true,
            Self::Sum(summands) => summands.iter().all(|summand| summand.expr.is_constant()),
            Self::Product(factors) => factors.iter().all(|factor| factor.expr.is_constant()),
            Self::Power(base, exponent) => base.is_constant() && exponent.is_constant(),
            Self::Function(_, argument) => argument.is_constant(),
        }
    }

    /// Binding level, used when rendering nested operators.
    pub fn level(&self) -> u8 {
        match self {
            Self::Variable | Self::Constant(_) | Self::Function(..) => 0,
            Self::Sum(_) => 1,
            Self::Product(_) => 2,
            Self::Power(..) => 3,
        }
    }

    fn needs_parens(&self, parent_level: u8) -> bool {
        match self {
            Self::Variable | Self::Function(..) => false,
            Self::Constant(value) => format_complex(*value).contains(['+', '-']),
            other => other.level() <= parent_level,
        }
    }

    fn fmt_operand(&self, f: &mut std::fmt::Formatter<'_>, parent_level: u8) -> std::fmt::Result {
        if self.needs_parens(parent_level) {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Variable, Self::Variable) => true,
            (Self::Constant(left), Self::Constant(right)) => {
                left.re == right.re && left.im == right.im
            }
            (Self::Sum(left), Self::Sum(right)) => unordered_eq(left, right),
            (Self::Product(left), Self::Product(right)) => unordered_eq(left, right),
            (Self::Power(left_base, left_exp), Self::Power(right_base, right_exp)) => {
                left_base == right_base && left_exp == right_exp
            }
            (Self::Function(left_fn, left_arg), Self::Function(right_fn, right_arg)) => {
                left_fn == right_fn && left_arg == right_arg
            }
            _ => false,
        }
    }
}

/// Multiset comparison: every item on the left consumes one equal item on the right.
fn unordered_eq<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    let mut unmatched: Vec<&T> = right.iter().collect();
    for item in left {
        match unmatched.iter().position(|candidate| *candidate == item) {
            Some(index) => {
                unmatched.swap_remove(index);
            }
            None => return false,
        }
    }
    unmatched.is_empty()
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = self.level();
        match self {
            Self::Variable => write!(f, "z"),
            Self::Constant(value) => write!(f, "{}", format_complex(*value)),
            Self::Sum(summands) => {
                for (index, summand) in summands.iter().enumerate() {
                    match (index, summand.sign) {
                        (0, Sign::Plus) => (),
                        (0, Sign::Minus) => write!(f, "-")?,
                        (_, Sign::Plus) => write!(f, " + ")?,
                        (_, Sign::Minus) => write!(f, " - ")?,
                    }
                    summand.expr.fmt_operand(f, level)?;
                }
                Ok(())
            }
            Self::Product(factors) => {
                for (index, factor) in factors.iter().enumerate() {
                    match (index, factor.exponent) {
                        (0, Exponent::Positive) => (),
                        (0, Exponent::Negative) => write!(f, "1/")?,
                        (_, Exponent::Positive) => write!(f, "*")?,
                        (_, Exponent::Negative) => write!(f, "/")?,
                    }
                    factor.expr.fmt_operand(f, level)?;
                }
                Ok(())
            }
            Self::Power(base, exponent) => {
                base.fmt_operand(f, level)?;
                write!(f, "^")?;
                exponent.fmt_operand(f, level)
            }
            Self::Function(math_fn, argument) => write!(f, "{}({argument})", math_fn.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summand {
    pub sign: Sign,
    pub expr: Expression,
}

impl Summand {
    pub fn new(sign: Sign, expr: Expression) -> Self {
        Self { sign, expr }
    }

    pub fn plus(expr: Expression) -> Self {
        Self::new(Sign::Plus, expr)
    }

    pub fn minus(expr: Expression) -> Self {
        Self::new(Sign::Minus, expr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exponent {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub exponent: Exponent,
    pub expr: Expression,
}

impl Factor {
    pub fn new(exponent: Exponent, expr: Expression) -> Self {
        Self { exponent, expr }
    }

    pub fn times(expr: Expression) -> Self {
        Self::new(Exponent::Positive, expr)
    }

    pub fn over(expr: Expression) -> Self {
        Self::new(Exponent::Negative, expr)
    }
}

/// The elementary functions a formula can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFn {
    Sine,
    Cosine,
    Tangent,
    SquareRoot,
    Exponential,
    Logarithm,
    RealPart,
    ImaginaryPart,
    Magnitude,
    Norm,
    Conjugate,
}

impl MathFn {
    pub const ALL: [MathFn; 11] = [
        Self::Sine,
        Self::Cosine,
        Self::Tangent,
        Self::SquareRoot,
        Self::Exponential,
        Self::Logarithm,
        Self::RealPart,
        Self::ImaginaryPart,
        Self::Magnitude,
        Self::Norm,
        Self::Conjugate,
    ];

    /// The name a formula uses to call the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
            Self::SquareRoot => "sqrt",
            Self::Exponential => "exp",
            Self::Logarithm => "ln",
            Self::RealPart => "Re",
            Self::ImaginaryPart => "Im",
            Self::Magnitude => "abs",
            Self::Norm => "norm",
            Self::Conjugate => "conj",
        }
    }

    /// Principal-branch value. May be non-finite, the evaluator filters that.
    pub fn apply(self, z: Complex64) -> Complex64 {
        match self {
            Self::Sine => z.sin(),
            Self::Cosine => z.cos(),
            Self::Tangent => z.tan(),
            Self::SquareRoot => z.sqrt(),
            Self::Exponential => z.exp(),
            Self::Logarithm => z.ln(),
            Self::RealPart => Complex64::new(z.re, 0.0),
            Self::ImaginaryPart => Complex64::new(z.im, 0.0),
            Self::Magnitude => Complex64::new(z.norm(), 0.0),
            Self::Norm => Complex64::new(z.norm_sqr(), 0.0),
            Self::Conjugate => z.conj(),
        }
    }
}

impl Display for MathFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
