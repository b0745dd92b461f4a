use std::fmt::Display;

use logos::{Lexer, Logos, Span};

fn verbatim(lex: &mut Lexer<Token>) -> String {
    lex.slice().to_string()
}

/// All the Tokens that the lexer can produce
#[rustfmt::skip]
#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    // Operands
    #[regex(r"[0-9]+",verbatim)]        Digits(String),
    #[regex(r"[A-Za-z]+",verbatim)]     Word(String),
    #[token(".")] #[token(",")]         Separator,

    // Operators
    #[token("+")]                       Plus,
    #[token("-")]                       Minus,
    #[token("*")]                       Asterisk,
    #[token("/")]                       Slash,
    #[token("^")]                       Caret,

    // Grouping
    #[token("(")]                       LParens,
    #[token(")")]                       RParens,
}

impl Token {
    /// True for the five binary operators.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus | Self::Minus | Self::Asterisk | Self::Slash | Self::Caret
        )
    }

    /// True for the tokens that can never end a formula.
    pub fn dangles(&self) -> bool {
        self.is_operator() || *self == Self::LParens
    }

    pub fn is_sign(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Digits(digits) => write!(f, "{digits}"),
            Self::Word(word) => write!(f, "{word}"),
            Self::Separator => write!(f, "."),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Asterisk => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::LParens => write!(f, "("),
            Self::RParens => write!(f, ")"),
        }
    }
}

pub type Lexicon = Vec<(Token, Span)>;

/// Lexes the source string into a vector of tokens and their source spans.
/// On failure, returns the spans of every character the lexer could not match.
pub fn tokenize(source: &str) -> Result<Lexicon, Vec<Span>> {
    let mut lex = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut errs = Vec::new();

    while let Some(token) = lex.next() {
        let span = lex.span();
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => errs.push(span),
        }
    }

    if errs.is_empty() { Ok(tokens) } else { Err(errs) }
}
