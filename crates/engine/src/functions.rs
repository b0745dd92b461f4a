//! The table of function names a formula may call.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::OnceLock,
};

use log::debug;

use crate::ast::{Expression, MathFn};

/// Builds the tree for a call, given the already parsed argument.
pub type CreateFunction = fn(Expression) -> Expression;

const BUILTINS: [(&str, CreateFunction); 11] = [
    ("sin", |arg| Expression::function(MathFn::Sine, arg)),
    ("cos", |arg| Expression::function(MathFn::Cosine, arg)),
    ("tan", |arg| Expression::function(MathFn::Tangent, arg)),
    ("sqrt", |arg| Expression::function(MathFn::SquareRoot, arg)),
    ("exp", |arg| Expression::function(MathFn::Exponential, arg)),
    ("ln", |arg| Expression::function(MathFn::Logarithm, arg)),
    ("Re", |arg| Expression::function(MathFn::RealPart, arg)),
    ("Im", |arg| Expression::function(MathFn::ImaginaryPart, arg)),
    ("abs", |arg| Expression::function(MathFn::Magnitude, arg)),
    ("norm", |arg| Expression::function(MathFn::Norm, arg)),
    ("conj", |arg| Expression::function(MathFn::Conjugate, arg)),
];

#[derive(Debug)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, CreateFunction>,
    letters: OnceLock<BTreeSet<char>>,
}

impl FunctionRegistry {
    /// A registry without any functions.
    pub fn empty() -> Self {
        Self {
            functions: BTreeMap::new(),
            letters: OnceLock::new(),
        }
    }

    /// Adds a function under `name`. Fails if the name is taken or is not purely alphabetic.
    pub fn register(&mut self, name: impl Into<String>, create: CreateFunction) -> bool {
        let name = name.into();
        if name.is_empty()
            || !name.chars().all(|c| c.is_ascii_alphabetic())
            || self.functions.contains_key(&name)
        {
            return false;
        }
        debug!("registering function '{name}'");
        self.functions.insert(name, create);
        self.letters.take();
        true
    }

    pub fn lookup(&self, name: &str) -> Option<CreateFunction> {
        self.functions.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Every letter used by a registered name. Computed once per registry state.
    pub fn letters(&self) -> &BTreeSet<char> {
        self.letters
            .get_or_init(|| self.functions.keys().flat_map(|name| name.chars()).collect())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (name, create) in BUILTINS {
            registry.register(name, create);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(arg: Expression) -> Expression {
        Expression::power(arg, Expression::constant(2.0, 0.0))
    }

    #[test]
    fn builtins() {
        let registry = FunctionRegistry::default();
        assert_eq!(11, registry.len());
        for math_fn in MathFn::ALL {
            let create = registry.lookup(math_fn.name()).unwrap();
            assert_eq!(
                Expression::function(math_fn, Expression::Variable),
                create(Expression::Variable)
            );
        }
        assert!(registry.lookup("sinh").is_none());
        assert!(registry.lookup("SIN").is_none());
    }

    #[test]
    fn letters_follow_registrations() {
        let mut registry = FunctionRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.letters().is_empty());

        assert!(registry.register("ln", |arg| Expression::function(MathFn::Logarithm, arg)));
        assert_eq!(&BTreeSet::from(['l', 'n']), registry.letters());

        assert!(registry.register("sq", square));
        assert_eq!(&BTreeSet::from(['l', 'n', 'q', 's']), registry.letters());
        assert_eq!(vec!["ln", "sq"], registry.names().collect::<Vec<_>>());
    }

    #[test]
    fn rejected_names() {
        let mut registry = FunctionRegistry::default();
        assert!(!registry.register("sin", square));
        assert!(!registry.register("", square));
        assert!(!registry.register("x2", square));
        // Digits would lex as a separate number, so `log2(z)` could never be called
        assert!(!registry.register("log2", square));
        assert!(!registry.register("é", square));
        assert!(!registry.register("f(x)", square));
        assert!(registry.register("sq", square));
        assert_eq!(12, registry.len());
        assert!(registry.letters().contains(&'q'));
        assert!(!registry.letters().contains(&'Y'));
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FunctionRegistry>();
        assert_send_sync::<Expression>();
    }
}
