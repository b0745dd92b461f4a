use clap::Parser;
use help::help;
use log::warn;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};

use complexation_lib::prelude::*;

mod help;
mod snippets;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Function of z to start with, e.g. "sin(z)/z"
    formula: Option<String>,

    /// Keep constant parts of a formula as written instead of folding them
    #[arg(long)]
    no_optimize: bool,

    /// Deepest nesting a formula may use
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Grids cover -max_x..=max_x along the real axis
    #[arg(long, default_value_t = 10.0)]
    max_x: f64,

    /// Grids cover -max_y..=max_y along the imaginary axis
    #[arg(long, default_value_t = 10.0)]
    max_y: f64,
}

const LOAD_LINE: &str = "CPLX +-  Loading:";
const WELCOME: &str = "Welcome to complexation!";
const TIP: &str =
    "Type a function of z to get started, 'help' if you're unsure what to do, or CTRL+C to exit.";
const PROMPT: &str = "CPLX +-> ";
const SIDEBAR: &str = "     |   ";

fn print_arrowed(banner: &str) {
    let padded = format!(" {banner} ");
    println!("-----+-{padded:-<21}->");
}

fn print_sidebarred(text: &str) {
    println!("{SIDEBAR}{text}");
}

fn process_input(session: &mut Session, input: &str) {
    let lc_input = input.trim().to_lowercase();
    if lc_input.is_empty() {
        return;
    }
    if lc_input.starts_with("help") {
        help(lc_input.as_str());
        return;
    }
    match session.execute(input) {
        Ok(output) => output.render(SIDEBAR),
        Err(err) => {
            warn!("{err}");
            for line in session.diagnostic(input, &err).lines() {
                print_sidebarred(line);
            }
        }
    }
}

fn repl(mut session: Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    #[cfg(feature = "with-file-history")]
    if rl.load_history(".complexation_history").is_err() {
        println!("No previous history.");
    }

    loop {
        let readline = rl.readline(PROMPT);
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                process_input(&mut session, &line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL+C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL+D");
                break;
            }
            Err(err) => {
                println!("Error: {err:?}");
                break;
            }
        }
    }

    #[cfg(feature = "with-file-history")]
    if let Err(err) = rl.save_history(".complexation_history") {
        eprintln!("Failed to save history file:");
        eprintln!("{err}");
    };

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let parser = FormulaParser::new(!cli.no_optimize).with_max_depth(cli.max_depth);
    let mut session = Session::new(parser, GridGenerator::new(cli.max_x, cli.max_y));

    if let Some(formula) = &cli.formula {
        println!("{LOAD_LINE} {formula}");
        process_input(&mut session, formula);
    }
    print_arrowed(WELCOME);
    print_sidebarred(TIP);
    repl(session)
}
