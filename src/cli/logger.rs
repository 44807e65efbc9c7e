// src/cli/logger.rs
//! Centralized output system with structured verbosity levels and selective color usage

use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only errors and critical failures
    Quiet,
    /// Default level - key progress and results
    Normal,
    /// Detailed information and debug data
    Verbose,
}

impl LogLevel {
    pub fn should_show(self, target: LogLevel) -> bool {
        match (self, target) {
            (LogLevel::Quiet, LogLevel::Quiet) => true,
            (LogLevel::Normal, LogLevel::Quiet | LogLevel::Normal) => true,
            (LogLevel::Verbose, _) => true,
            _ => false,
        }
    }
}

pub struct Logger {
    level: LogLevel,
}

impl Logger {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let level = if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        };

        Self { level }
    }

    // Stage progress messages (Normal level)
    pub fn stage_start(&self, stage_num: usize, total: usize, name: &str) {
        if self.level.should_show(LogLevel::Normal) {
            print!(
                "{} {}: ",
                "Stage".bright_blue().bold(),
                format!("{}/{}", stage_num, total).bright_blue().bold()
            );
            print!("({}): ", name.bright_blue());
        }
    }

    pub fn stage_success(&self) {
        if self.level.should_show(LogLevel::Normal) {
            println!("{}", "OK".green().bold());
        }
    }

    pub fn stage_error(&self, error_count: usize) {
        if self.level.should_show(LogLevel::Normal) {
            println!(
                "{} – {} error{} found.",
                "ERROR".red().bold(),
                error_count,
                if error_count == 1 { "" } else { "s" }
            );
        }
    }

    // Pipeline abortion message
    pub fn abort_pipeline(&self) {
        if self.level.should_show(LogLevel::Normal) {
            println!("Aborting pipeline due to errors.");
        }
    }

    // Detailed information (Verbose level)
    pub fn detail(&self, message: &str) {
        if self.level.should_show(LogLevel::Verbose) {
            println!("  {}", message);
        }
    }
}
