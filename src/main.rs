use clap::Parser;
use colored::*;
use std::fs;

use bigo::catalog;
use bigo::cli::{Cli, Pipeline};

fn main() {
    let cli = Cli::parse();

    // Handle no-color option using colored::control
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        eprintln!("{} {}", "ERROR:".red().bold(), e.bright_red());
        std::process::exit(1);
    }

    if cli.list_examples {
        println!("Built-in examples:");
        for example in catalog::EXAMPLES {
            println!(" - {:18} {}", example.name, example.description);
        }
        return;
    }

    // Read source from the input file or the example catalog
    let source_code = if let Some(name) = &cli.example {
        match catalog::find(name) {
            Some(example) => example.source.to_string(),
            None => {
                eprintln!(
                    "{} Unknown example '{}'. Use --list-examples to see the catalog.",
                    "ERROR:".red().bold(),
                    name.bright_red()
                );
                std::process::exit(1);
            }
        }
    } else if let Some(input) = &cli.input {
        match fs::read_to_string(input) {
            Ok(content) => content,
            Err(e) => {
                eprintln!(
                    "{} Failed to read file {:?}: {}",
                    "ERROR:".red().bold(),
                    input,
                    e.to_string().bright_red()
                );
                std::process::exit(1);
            }
        }
    } else {
        // validate() guarantees one of the two is present
        unreachable!("validated CLI always has an input source");
    };

    // Create and execute pipeline
    let mut pipeline = Pipeline::new(&cli);
    if let Err(e) = pipeline.execute(source_code, cli.mode.clone(), &cli) {
        eprintln!(
            "{} Pipeline execution failed: {}",
            "ERROR:".red().bold(),
            e.bright_red()
        );
        std::process::exit(1);
    }
}
