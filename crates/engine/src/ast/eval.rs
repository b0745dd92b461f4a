use num_complex::Complex64;

use crate::ast::*;

/// Divisors closer to zero than this in both parts are treated as a pole.
pub const EPSILON: f64 = 1e-9;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

pub trait Eval {
    /// Evaluates the expression at `z`, or `None` where it is undefined.
    fn eval(&self, z: Complex64) -> Option<Complex64>;
}

impl Eval for Expression {
    fn eval(&self, z: Complex64) -> Option<Complex64> {
        match self {
            Self::Variable => Some(z),
            Self::Constant(value) => Some(*value),
            Self::Sum(summands) => summands.iter().try_fold(ZERO, |acc, summand| {
                let value = summand.expr.eval(z)?;
                match summand.sign {
                    Sign::Plus => Some(acc + value),
                    Sign::Minus => Some(acc - value),
                }
            }),
            Self::Product(factors) => factors.iter().try_fold(ONE, |acc, factor| {
                let value = factor.expr.eval(z)?;
                match factor.exponent {
                    Exponent::Positive => Some(acc * value),
                    Exponent::Negative => {
                        if value.re.abs() < EPSILON && value.im.abs() < EPSILON {
                            None
                        } else {
                            finite(acc / value)
                        }
                    }
                }
            }),
            Self::Power(base, exponent) => principal_pow(base.eval(z)?, exponent.eval(z)?),
            Self::Function(math_fn, argument) => finite(math_fn.apply(argument.eval(z)?)),
        }
    }
}

fn finite(value: Complex64) -> Option<Complex64> {
    value.is_finite().then_some(value)
}

/// `base^exponent` on the principal branch of the logarithm.
fn principal_pow(base: Complex64, exponent: Complex64) -> Option<Complex64> {
    if exponent == ZERO {
        return Some(ONE);
    }
    if base == ZERO {
        return (exponent.re > 0.0).then_some(ZERO);
    }
    finite((exponent * base.ln()).exp())
}
