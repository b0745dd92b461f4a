use std::{
    borrow::Cow,
    ops::Range,
    sync::{Arc, LazyLock},
};

use chumsky::Parser;
use log::{debug, trace};
use regex::Regex;

use crate::{
    ast::{Expression, Summand},
    error::{FormulaError, FormulaResult},
    functions::FunctionRegistry,
};

pub use atoms::Op;
pub use tokens::{Tokens, find_matching_brace, tokenize};
pub use validate::validate;

mod atoms;
mod expressions;
mod tokens;
mod validate;

pub const DEFAULT_MAX_DEPTH: usize = 256;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Strips the spaces and tabs a formula may contain anywhere.
pub fn normalize(text: &str) -> Cow<'_, str> {
    WHITESPACE.replace_all(text, "")
}

/// Recursive-descent parser from formula text to an [`Expression`].
#[derive(Debug, Clone)]
pub struct FormulaParser {
    optimize: bool,
    registry: Arc<FunctionRegistry>,
    max_depth: usize,
}

impl FormulaParser {
    /// With `optimize`, constant summands and factors are folded while parsing.
    pub fn new(optimize: bool) -> Self {
        Self {
            optimize,
            registry: Arc::new(FunctionRegistry::default()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_registry(mut self, registry: Arc<FunctionRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn optimize(&self) -> bool {
        self.optimize
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// The tree for `text`, or `None` if it is not a well-formed formula.
    pub fn parse(&self, text: &str) -> Option<Expression> {
        self.diagnose(text)
            .inspect_err(|err| debug!("rejected formula '{text}': {err}"))
            .ok()
    }

    pub fn is_parseable(&self, text: &str) -> bool {
        self.parse(text).is_some()
    }

    /// Like [`FormulaParser::parse`], but explains a rejection.
    /// Error spans point into the normalized formula.
    pub fn diagnose(&self, text: &str) -> FormulaResult<Expression> {
        let source = normalize(text);
        self.parse_span(&source, 0..source.len(), 0)
    }

    fn parse_span(
        &self,
        source: &str,
        span: Range<usize>,
        depth: usize,
    ) -> FormulaResult<Expression> {
        if depth > self.max_depth {
            return Err(FormulaError::limit(
                span,
                format!("Formula nests deeper than {} levels", self.max_depth),
            ));
        }
        let text = &source[span.clone()];
        trace!("{:depth$}parsing '{text}'", "");
        validate(text, self.registry.letters()).map_err(|err| err.shifted(span.start))?;

        if text.starts_with('(') && find_matching_brace(text, 0) == Some(text.len() - 1) {
            return self.parse_span(source, span.start + 1..span.end - 1, depth + 1);
        }

        if let Ok(atom) = atoms::atom().parse(text).into_result() {
            return atom.to_expression().ok_or_else(|| {
                FormulaError::parser(span, format!("Literal '{text}' is out of range"))
            });
        }

        let tokens = tokenize(source, span.clone())?;
        if !tokens.is_well_formed() {
            return Err(FormulaError::parser(
                span,
                "Operands and operators do not alternate".into(),
            ));
        }

        if tokens.operators.is_empty() {
            let unsigned = span.start + 1..span.end;
            return match text.as_bytes()[0] {
                b'-' => Ok(Expression::sum(vec![Summand::minus(
                    self.parse_span(source, unsigned, depth + 1)?,
                )])),
                b'+' => self.parse_span(source, unsigned, depth + 1),
                _ => self.parse_function(source, span, depth),
            };
        }

        if tokens.has(Op::is_additive) {
            self.parse_sum(source, span, &tokens, depth)
        } else if tokens.has(Op::is_multiplicative) {
            self.parse_product(source, span, &tokens, depth)
        } else {
            self.parse_power(source, span, &tokens, depth)
        }
    }
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self::new(true)
    }
}
