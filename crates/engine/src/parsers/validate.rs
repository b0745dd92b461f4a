use std::collections::BTreeSet;

use lexer::Token;

use crate::error::{FormulaError, FormulaResult};

/// Letters that are valid outside of function names.
const VARIABLE_AND_UNIT: [char; 4] = ['z', 'Z', 'i', 'I'];

/// Cheap structural checks that every sub-formula must pass before it is split further.
/// `letters` holds the letters used by function names.
pub fn validate(text: &str, letters: &BTreeSet<char>) -> FormulaResult<()> {
    if text.trim_matches([' ', '\t']).is_empty() {
        return Err(FormulaError::validator(
            0..text.len(),
            "Empty formula".into(),
        ));
    }

    let lexicon = lexer::tokenize(text).map_err(|spans| {
        let start = spans.first().map_or(0, |span| span.start);
        let unsupported = text[start..].chars().next().unwrap_or(' ');
        FormulaError::lexer(
            start..start + unsupported.len_utf8(),
            format!("Unsupported character '{unsupported}'"),
        )
    })?;

    let mut depth = 0usize;
    for (index, (token, span)) in lexicon.iter().enumerate() {
        match token {
            Token::Word(word) => {
                if let Some(offset) = word
                    .char_indices()
                    .find(|(_, c)| !VARIABLE_AND_UNIT.contains(c) && !letters.contains(c))
                    .map(|(offset, _)| offset)
                {
                    let at = span.start + offset;
                    return Err(FormulaError::lexer(
                        at..at + 1,
                        format!("Unknown letter '{}'", &text[at..at + 1]),
                    ));
                }
            }
            Token::Caret => {
                if let Some((next, next_span)) = lexicon.get(index + 1) {
                    if next.is_sign() && next_span.start == span.end {
                        return Err(FormulaError::validator(
                            span.start..next_span.end,
                            format!("'^{next}' needs parentheses around the exponent"),
                        ));
                    }
                }
            }
            Token::LParens => depth += 1,
            Token::RParens => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    FormulaError::validator(span.clone(), "Unopened ')'".into())
                })?;
            }
            _ => (),
        }
    }

    if let Some((last, span)) = lexicon.last() {
        if last.dangles() {
            return Err(FormulaError::validator(
                span.clone(),
                format!("Formula cannot end with '{last}'"),
            ));
        }
    }

    if depth > 0 {
        return Err(FormulaError::validator(
            text.len()..text.len(),
            format!("{depth} unclosed '('"),
        ));
    }

    Ok(())
}
