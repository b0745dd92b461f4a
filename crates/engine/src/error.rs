use std::{fmt::Display, ops::Range};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

pub type FormulaResult<T> = Result<T, FormulaError>;

#[derive(Debug, Clone, PartialEq)]
pub struct FormulaError {
    pub kind: FormulaErrorKind,
    pub span: Range<usize>,
    pub msg: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaErrorKind {
    Lexical,
    Validation,
    Parse,
    Limit,
    Command,
}

impl FormulaError {
    pub fn lexer(span: Range<usize>, msg: String) -> Self {
        Self {
            kind: FormulaErrorKind::Lexical,
            span,
            msg,
        }
    }

    pub fn validator(span: Range<usize>, msg: String) -> Self {
        Self {
            kind: FormulaErrorKind::Validation,
            span,
            msg,
        }
    }

    pub fn parser(span: Range<usize>, msg: String) -> Self {
        Self {
            kind: FormulaErrorKind::Parse,
            span,
            msg,
        }
    }

    pub fn limit(span: Range<usize>, msg: String) -> Self {
        Self {
            kind: FormulaErrorKind::Limit,
            span,
            msg,
        }
    }

    pub fn command(span: Range<usize>, msg: String) -> Self {
        Self {
            kind: FormulaErrorKind::Command,
            span,
            msg,
        }
    }

    pub fn is_command(&self) -> bool {
        self.kind == FormulaErrorKind::Command
    }

    /// Moves the span from sub-formula coordinates into the enclosing formula.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.span = self.span.start + offset..self.span.end + offset;
        self
    }

    /// Draws the error as an ariadne report against the (normalized) formula.
    pub fn render(&self, name: &str, source: &str) -> String {
        if source.is_empty() {
            return format!("{self}");
        }
        // Zero-width spans still need one visible column to point at
        let mut start = self.span.start.min(source.len() - 1);
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        let mut end = self.span.end.clamp(start + 1, source.len());
        while !source.is_char_boundary(end) {
            end += 1;
        }
        let span = start..end;
        let mut buffer = Vec::new();
        let config = Config::default()
            .with_color(false)
            .with_index_type(IndexType::Byte);
        let written = Report::build(ReportKind::Error, (name, span.clone()))
            .with_config(config)
            .with_message(&self.msg)
            .with_label(
                Label::new((name, span))
                    .with_message(format!("{:?} problem here", self.kind))
                    .with_color(Color::Red),
            )
            .finish()
            .write((name, Source::from(source)), &mut buffer);
        match written {
            Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(_) => format!("{self}"),
        }
    }
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} error at {}..{}: {}",
            self.kind, self.span.start, self.span.end, self.msg
        )
    }
}

impl std::error::Error for FormulaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = FormulaError::validator(3..5, "'^-' needs parentheses".into());
        assert_eq!(
            "Validation error at 3..5: '^-' needs parentheses",
            err.to_string()
        );
        assert_eq!(3..5, err.span);
    }

    #[test]
    fn render_report() {
        let err = FormulaError::lexer(1..2, "Unsupported character '%'".into());
        let report = err.render("formula", "z%3");
        assert!(report.contains("Unsupported character '%'"));
        assert!(report.contains("Lexical problem here"));
        assert!(report.contains("formula"));
    }

    #[test]
    fn render_empty_span() {
        let err = FormulaError::validator(0..0, "Empty formula".into());
        let report = err.render("formula", "");
        assert!(report.contains("Empty formula"));
    }

    #[test]
    fn render_past_the_end() {
        let err = FormulaError::validator(4..4, "1 unclosed '('".into());
        let report = err.render("formula", "((z)");
        assert!(report.contains("1 unclosed '('"));
        assert!(report.contains("Validation problem here"));
    }

    #[test]
    fn render_counts_bytes() {
        let err = FormulaError::lexer(2..4, "Unsupported character".into());
        let wide = err.render("formula", "z+é");
        let narrow = FormulaError::lexer(2..3, "Unsupported character".into()).render("formula", "z+%");
        assert_eq!(narrow, wide.replace('é', "%"));

        // A span ending inside a character still covers all of it
        let inside = FormulaError::lexer(2..3, "Unsupported character".into()).render("formula", "z+é");
        assert_eq!(wide, inside);
    }

    #[test]
    fn shifting() {
        let err = FormulaError::parser(0..3, "Unknown function 'foo'".into()).shifted(5);
        assert_eq!(5..8, err.span);
        assert!(!err.is_command());
        assert!(FormulaError::command(0..0, "Nothing to do".into()).is_command());
    }
}
