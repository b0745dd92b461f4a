//! Contains `include_str!` of all the help files
//! These can then be used easily for help functions

pub const HELP_GENERAL: &str = include_str!("h01_general.help");
pub const HELP_TOPICS: &str = include_str!("h02_topics.help");

pub const EXAMPLE_FORMULAS: &str = include_str!("ex01_formulas.help");
pub const EXAMPLE_NUMBERS: &str = include_str!("ex02_numbers.help");
pub const EXAMPLE_PITFALLS: &str = include_str!("ex03_pitfalls.help");
pub const EXAMPLE_FUNCTIONS: &str = include_str!("ex04_functions.help");

pub const EXAMPLE_AT: &str = include_str!("ex11_at.help");
pub const EXAMPLE_GRID: &str = include_str!("ex12_grid.help");
pub const EXAMPLE_CHECK: &str = include_str!("ex13_check.help");
