use std::ops::Range;

use num_complex::Complex64;

use super::{FormulaParser, Op, Tokens};
use crate::{
    ast::{Eval, Expression, Exponent, Factor, Sign, Summand},
    error::{FormulaError, FormulaResult},
};

/// Splits the operands at the operators chosen by `splits`.
/// Any other operator is glued back onto the operand before it.
fn group(tokens: &Tokens, splits: impl Fn(Op) -> bool) -> Vec<(Option<Op>, Range<usize>)> {
    let mut groups: Vec<(Option<Op>, Range<usize>)> = Vec::new();
    let mut operands = tokens.operands.iter();
    if let Some(first) = operands.next() {
        groups.push((None, first.clone()));
    }
    for ((op, _), operand) in tokens.operators.iter().zip(operands) {
        if splits(*op) {
            groups.push((Some(*op), operand.clone()));
        } else if let Some((_, current)) = groups.last_mut() {
            current.end = operand.end;
        }
    }
    groups
}

impl FormulaParser {
    pub(super) fn parse_sum(
        &self,
        source: &str,
        span: Range<usize>,
        tokens: &Tokens,
        depth: usize,
    ) -> FormulaResult<Expression> {
        let summands = group(tokens, Op::is_additive)
            .into_iter()
            .map(|(op, operand)| {
                let sign = match op {
                    Some(Op::Sub) => Sign::Minus,
                    _ => Sign::Plus,
                };
                Ok(Summand::new(sign, self.parse_span(source, operand, depth + 1)?))
            })
            .collect::<FormulaResult<Vec<_>>>()?;

        if !self.optimize {
            return Ok(Expression::Sum(summands));
        }
        let (constants, mut rest): (Vec<_>, Vec<_>) = summands
            .into_iter()
            .partition(|summand| summand.expr.is_constant());
        if constants.is_empty() {
            return Ok(Expression::Sum(rest));
        }
        let folded = fold(Expression::Sum(constants), span)?;
        if rest.is_empty() {
            return Ok(folded);
        }
        rest.insert(0, Summand::plus(folded));
        Ok(Expression::Sum(rest))
    }

    pub(super) fn parse_product(
        &self,
        source: &str,
        span: Range<usize>,
        tokens: &Tokens,
        depth: usize,
    ) -> FormulaResult<Expression> {
        let factors = group(tokens, Op::is_multiplicative)
            .into_iter()
            .map(|(op, operand)| {
                let exponent = match op {
                    Some(Op::Div) => Exponent::Negative,
                    _ => Exponent::Positive,
                };
                Ok(Factor::new(exponent, self.parse_span(source, operand, depth + 1)?))
            })
            .collect::<FormulaResult<Vec<_>>>()?;

        if !self.optimize {
            return Ok(Expression::Product(factors));
        }
        let (constants, mut rest): (Vec<_>, Vec<_>) = factors
            .into_iter()
            .partition(|factor| factor.expr.is_constant());
        if constants.is_empty() {
            return Ok(Expression::Product(rest));
        }
        let folded = fold(Expression::Product(constants), span)?;
        if rest.is_empty() {
            return Ok(folded);
        }
        rest.insert(0, Factor::times(folded));
        Ok(Expression::Product(rest))
    }

    /// `a^b^c` is `a^(b^c)`: the first operand is the base, the rest is the exponent.
    pub(super) fn parse_power(
        &self,
        source: &str,
        span: Range<usize>,
        tokens: &Tokens,
        depth: usize,
    ) -> FormulaResult<Expression> {
        match (tokens.operands.first(), tokens.operands.get(1)) {
            (Some(base), Some(exponent)) => Ok(Expression::power(
                self.parse_span(source, base.clone(), depth + 1)?,
                self.parse_span(source, exponent.start..span.end, depth + 1)?,
            )),
            _ => Err(FormulaError::parser(span, "Power without an exponent".into())),
        }
    }

    pub(super) fn parse_function(
        &self,
        source: &str,
        span: Range<usize>,
        depth: usize,
    ) -> FormulaResult<Expression> {
        let text = &source[span.clone()];
        let Some(open) = text.find('(') else {
            return Err(FormulaError::parser(
                span,
                format!("'{text}' is neither a number, the variable nor a function call"),
            ));
        };
        let name = &text[..open];
        if name.is_empty() {
            return Err(FormulaError::parser(
                span.start..span.start + 1,
                "Missing function name before '('".into(),
            ));
        }
        let create = self.registry.lookup(name).ok_or_else(|| {
            FormulaError::parser(
                span.start..span.start + open,
                format!("Unknown function '{name}'"),
            )
        })?;
        let argument = self.parse_span(source, span.start + open..span.end, depth + 1)?;
        Ok(create(argument))
    }
}

/// Collapses a constant group into one value, evaluated at the origin.
fn fold(constants: Expression, span: Range<usize>) -> FormulaResult<Expression> {
    constants
        .eval(Complex64::new(0.0, 0.0))
        .map(Expression::Constant)
        .ok_or_else(|| FormulaError::parser(span, "Constant part is undefined".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::tokenize;

    fn grouped(source: &str, splits: impl Fn(Op) -> bool) -> Vec<(Option<Op>, &str)> {
        let tokens = tokenize(source, 0..source.len()).unwrap();
        group(&tokens, splits)
            .into_iter()
            .map(|(op, span)| (op, &source[span]))
            .collect()
    }

    #[test]
    fn regluing() {
        assert_eq!(
            vec![(None, "2*z^2"), (Some(Op::Sub), "3/z"), (Some(Op::Add), "1")],
            grouped("2*z^2-3/z+1", Op::is_additive)
        );
        assert_eq!(
            vec![(None, "2"), (Some(Op::Mul), "z^2"), (Some(Op::Div), "(z+1)")],
            grouped("2*z^2/(z+1)", Op::is_multiplicative)
        );
        assert_eq!(vec![(None, "-z")], grouped("-z", Op::is_additive));
    }

    #[test]
    fn fold_errors_point_at_the_group() {
        let err = FormulaParser::new(true).diagnose("z+1/0").unwrap_err();
        assert_eq!(2..5, err.span);
        assert_eq!("Constant part is undefined", err.msg);
    }

    #[test]
    fn function_errors() {
        let parser = FormulaParser::new(false);
        let err = parser.diagnose("z*(z)(z)").unwrap_err();
        assert_eq!("Missing function name before '('", err.msg);
        assert_eq!(2..3, err.span);

        let err = parser.diagnose("zz").unwrap_err();
        assert_eq!(0..2, err.span);
    }
}
