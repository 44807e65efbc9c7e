// src/cli/mod.rs
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod logger;
mod output;
mod pipeline;
mod stages;
mod traits;

pub use logger::*;
pub use output::*;
pub use pipeline::*;
pub use stages::*;
pub use traits::*;

#[derive(Parser, Debug)]
#[command(name = "bigo")]
#[command(about = "A static complexity analyzer for textbook pseudocode")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Input pseudocode file (omit when using --example)
    pub input: Option<PathBuf>,

    /// Processing mode - each mode includes all previous stages
    #[arg(short = 'm', long = "mode", default_value = "analyze")]
    pub mode: Mode,

    /// Procedure to analyze (defaults to the first declared procedure)
    #[arg(short = 'p', long = "procedure")]
    pub procedure: Option<String>,

    /// Analyze a built-in example instead of a file
    #[arg(long = "example")]
    pub example: Option<String>,

    /// List the built-in examples and exit
    #[arg(long = "list-examples")]
    pub list_examples: bool,

    /// Emit the result as JSON (analyze mode only)
    #[arg(long = "json")]
    pub json: bool,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Show source spans in AST output
    #[arg(long = "show-spans")]
    pub show_spans: bool,

    /// Quiet mode - minimal output
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, PartialEq, Debug)]
pub enum Mode {
    /// Parse the pseudocode and print the AST
    Ast,
    /// Build the symbolic cost model (includes AST stage)
    Cost,
    /// Solve the cost model and classify the complexity (includes all previous stages)
    Analyze,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.list_examples {
            return Ok(());
        }

        if self.input.is_some() && self.example.is_some() {
            return Err("Cannot specify both an input file and --example".to_string());
        }
        if self.input.is_none() && self.example.is_none() {
            return Err(
                "Specify an input file, --example <name>, or --list-examples".to_string(),
            );
        }

        if self.json && self.mode != Mode::Analyze {
            return Err("--json is only valid for analyze mode".to_string());
        }

        if self.show_spans && self.mode != Mode::Ast {
            return Err("--show-spans is only valid for ast mode".to_string());
        }

        // Quiet and verbose are mutually exclusive
        if self.quiet && self.verbose {
            return Err("Cannot use both --quiet and --verbose flags".to_string());
        }

        Ok(())
    }
}
