//! Parsing and evaluation of complex-valued functions of one variable `z`.
//!
//! ```
//! use complexation_lib::prelude::*;
//!
//! let parser = FormulaParser::new(true);
//! let function = parser.parse("1/(z-i)").unwrap();
//! assert_eq!(Some(Complex64::new(0.0, 1.0)), function.eval(Complex64::new(0.0, 0.0)));
//! assert_eq!(None, function.eval(Complex64::new(0.0, 1.0)));
//! ```

pub mod ast;
pub mod error;
pub mod functions;
pub mod grid;
pub mod parsers;
pub mod samples;
pub mod session;
mod utils;

pub mod prelude {
    pub use crate::{
        ast::{EPSILON, Eval, Exponent, Expression, Factor, MathFn, Sign, Summand},
        error::{FormulaError, FormulaErrorKind, FormulaResult},
        functions::{CreateFunction, FunctionRegistry},
        grid::{GridGenerator, GridShape},
        parsers::{DEFAULT_MAX_DEPTH, FormulaParser, normalize},
        session::{Command, Output, Session},
    };
    pub use num_complex::Complex64;
}
