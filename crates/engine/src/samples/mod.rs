//! Contains include_str! of all the sample formula files
//! These can then be used easily for testing or elsewhere

/// One formula per line, each accepted by the parser.
pub const VALID_FORMULAS: &str = include_str!("valid_formulas.txt");
/// One formula per line, each rejected by the parser.
pub const INVALID_FORMULAS: &str = include_str!("invalid_formulas.txt");
/// Short formulas whose prefixes and subsequences stand in for half-typed input.
pub const TYPING_SEEDS: &str = include_str!("typing_seeds.txt");
