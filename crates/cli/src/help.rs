//! Contains functions related to displaying help

use std::str::SplitWhitespace;

#[allow(clippy::wildcard_imports)] // Everything in snippets is a Verbosely named const
use crate::{print_arrowed, print_sidebarred, snippets::*};

pub fn help(lc_input: &str) {
    let mut help_strs = lc_input.split_whitespace();
    help_strs.next();
    if let Some(topic) = help_strs.next() {
        match Topic::from(topic) {
            // All the .help files have a trailing newline, so this is print! instead of println!
            Topic::Formula => formula_help(&mut help_strs),
            Topic::Function => flanked_example("Functions", EXAMPLE_FUNCTIONS),
            Topic::At => flanked_example("Evaluating at a Point", EXAMPLE_AT),
            Topic::Grid => flanked_example("Evaluating over a Grid", EXAMPLE_GRID),
            Topic::Check => flanked_example("Checking a Formula", EXAMPLE_CHECK),
            Topic::Topics => print!("{HELP_TOPICS}"),
            Topic::Unknown(topic) => {
                print_sidebarred(&format!("Unknown help topic: {topic}"));
                print_sidebarred("Type: 'help topics' for a list of valid topics");
            }
        }
    } else {
        print!("{HELP_GENERAL}");
    }
}

fn formula_help(help_strs: &mut SplitWhitespace) {
    match help_strs.next() {
        Some("numbers") => flanked_example("Numbers", EXAMPLE_NUMBERS),
        Some("pitfalls") => flanked_example("Formula Pitfalls", EXAMPLE_PITFALLS),
        _ => {
            flanked_example("Formula Basics", EXAMPLE_FORMULAS);
            print_sidebarred("Type: 'help formula numbers' or 'help formula pitfalls'");
            print_sidebarred("      for more information.");
        }
    }
}

#[derive(Debug, PartialEq)]
enum Topic<'a> {
    Formula,
    Function,
    At,
    Grid,
    Check,
    Topics,
    Unknown(&'a str),
}

impl<'a> From<&'a str> for Topic<'a> {
    fn from(value: &'a str) -> Self {
        match value {
            "formula" | "formulas" => Topic::Formula,
            "function" | "functions" => Topic::Function,
            "at" | "point" | "points" => Topic::At,
            "grid" | "grids" => Topic::Grid,
            "check" => Topic::Check,
            "topics" => Topic::Topics,
            other => Self::Unknown(other),
        }
    }
}

fn flanked_example(name: &str, example: &str) {
    print_arrowed(name);
    println!();
    println!("{example}");
    print_arrowed("End of Example");
}
