use std::ops::Range;

use super::atoms::Op;
use crate::error::{FormulaError, FormulaResult};

/// A flat split of one formula span into operands and the operators between them.
#[derive(Debug, Default, PartialEq)]
pub struct Tokens {
    pub operands: Vec<Range<usize>>,
    pub operators: Vec<(Op, usize)>,
}

impl Tokens {
    pub fn has(&self, predicate: impl Fn(Op) -> bool) -> bool {
        self.operators.iter().any(|(op, _)| predicate(*op))
    }

    pub fn is_well_formed(&self) -> bool {
        self.operands.len() == self.operators.len() + 1
    }
}

/// Index of the parenthesis matching the one at `pos`.
/// Scans forward from `(` and backward from `)`.
pub fn find_matching_brace(text: &str, pos: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let step_depth = |depth: &mut usize, byte: u8, opening: u8, closing: u8| {
        if byte == opening {
            *depth += 1;
        } else if byte == closing {
            *depth -= 1;
        }
        *depth == 0
    };
    let mut depth = 0;
    match *bytes.get(pos)? {
        b'(' => (pos..bytes.len()).find(|&i| step_depth(&mut depth, bytes[i], b'(', b')')),
        b')' => (0..=pos)
            .rev()
            .find(|&i| step_depth(&mut depth, bytes[i], b')', b'(')),
        _ => None,
    }
}

/// Splits `source[span]` at top-level operators.
/// Parenthesized groups are kept whole, and an operator that starts an operand stays attached to it.
pub fn tokenize(source: &str, span: Range<usize>) -> FormulaResult<Tokens> {
    let bytes = source.as_bytes();
    let scope = &source[..span.end];
    let mut tokens = Tokens::default();
    let mut start = span.start;
    let mut pos = span.start;

    while pos < span.end {
        if bytes[pos] == b'(' {
            let close = find_matching_brace(scope, pos)
                .ok_or_else(|| FormulaError::parser(pos..pos + 1, "Unclosed '('".into()))?;
            pos = close + 1;
            continue;
        }
        match Op::from_byte(bytes[pos]) {
            Some(op) if pos > start => {
                tokens.operands.push(start..pos);
                tokens.operators.push((op, pos));
                start = pos + 1;
            }
            _ => (),
        }
        pos += 1;
    }
    tokens.operands.push(start..span.end);

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(source: &str) -> (Vec<&str>, Vec<Op>) {
        let tokens = tokenize(source, 0..source.len()).unwrap();
        (
            tokens.operands.iter().map(|span| &source[span.clone()]).collect(),
            tokens.operators.iter().map(|(op, _)| *op).collect(),
        )
    }

    #[test]
    fn braces() {
        let text = "(z*(z+1))^2";
        assert_eq!(Some(8), find_matching_brace(text, 0));
        assert_eq!(Some(0), find_matching_brace(text, 8));
        assert_eq!(Some(7), find_matching_brace(text, 3));
        assert_eq!(Some(3), find_matching_brace(text, 7));
        assert_eq!(None, find_matching_brace(text, 1));
        assert_eq!(None, find_matching_brace(text, 42));
        assert_eq!(None, find_matching_brace("((z)", 0));
        assert_eq!(None, find_matching_brace("z))", 2));
    }

    #[test]
    fn flat_split() {
        assert_eq!(
            (vec!["z", "3", "sin(z)"], vec![Op::Add, Op::Mul]),
            split("z+3*sin(z)")
        );
        assert_eq!(
            (vec!["(z+1)", "(z-1)"], vec![Op::Div]),
            split("(z+1)/(z-1)")
        );
        assert_eq!((vec!["2", "z", "2"], vec![Op::Pow, Op::Pow]), split("2^z^2"));
    }

    #[test]
    fn attached_signs() {
        assert_eq!((vec!["2", "-3"], vec![Op::Mul]), split("2*-3"));
        assert_eq!((vec!["-3", "i"], vec![Op::Mul]), split("-3*i"));
        assert_eq!((vec!["-(z)"], vec![]), split("-(z)"));
        assert_eq!((vec!["-", "z"], vec![Op::Sub]), split("--z"));
    }

    #[test]
    fn sub_span() {
        let source = "cos(z+sin(z))";
        let tokens = tokenize(source, 4..12).unwrap();
        assert!(tokens.is_well_formed());
        assert_eq!(vec![4..5, 6..12], tokens.operands);
        assert_eq!(vec![(Op::Add, 5)], tokens.operators);
        assert!(tokens.has(Op::is_additive));
        assert!(!tokens.has(Op::is_multiplicative));
    }

    #[test]
    fn unclosed_group() {
        let err = tokenize("z*(z", 0..4).unwrap_err();
        assert_eq!(2..3, err.span);
    }
}
