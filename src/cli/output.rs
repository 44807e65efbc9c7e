// src/cli/output.rs
use super::{Cli, FileOutput};
use crate::ast::SpannedError;
use crate::report::AnalysisResponse;
use std::fs;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

pub struct OutputManager;

impl OutputManager {
    /// Get a writer for file output
    pub fn get_file_writer(
        output_path: &Option<PathBuf>,
        quiet: bool,
    ) -> Result<BufWriter<Box<dyn Write>>, String> {
        match output_path {
            Some(path) => {
                let file = fs::File::create(path)
                    .map_err(|e| format!("Failed to create file {:?}: {}", path, e))?;
                if !quiet {
                    println!("💾 Output will be written to: {}", path.display());
                }
                Ok(BufWriter::new(Box::new(file)))
            }
            None => Ok(BufWriter::new(Box::new(stdout()))),
        }
    }

    /// Handle file output for a stage
    pub fn handle_file_output<T, S>(stage: &S, data: &T, cli: &Cli) -> Result<(), String>
    where
        S: FileOutput<Data = T>,
    {
        let mut writer = Self::get_file_writer(&cli.output, cli.quiet)?;
        stage.write_output(data, &mut writer, cli)?;
        writer
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))?;
        Ok(())
    }

    /// Write an analysis response as JSON (used for both success and failure
    /// in --json mode, so malformed input still yields a well-formed body)
    pub fn write_json(response: &AnalysisResponse, cli: &Cli) -> Result<(), String> {
        let mut writer = Self::get_file_writer(&cli.output, cli.quiet)?;
        serde_json::to_writer_pretty(&mut writer, response)
            .map_err(|e| format!("Failed to serialize response: {}", e))?;
        writeln!(writer).map_err(|e| format!("Failed to write output: {}", e))?;
        writer
            .flush()
            .map_err(|e| format!("Failed to flush output: {}", e))
    }
}

/// Error handling utilities
pub fn print_spanned_error(spanned_error: &SpannedError, source_code: &str) {
    if let Some(span_value) = &spanned_error.span {
        eprintln!(
            "Error: {} at line {}, column {}",
            spanned_error.error, span_value.line, span_value.column
        );
        if let Some(line_content) = source_code.lines().nth(span_value.line.saturating_sub(1)) {
            eprintln!("  |\n{} | {}", span_value.line, line_content);
            eprintln!("  | {}{}", " ".repeat(span_value.column), "^");
        }
    } else {
        eprintln!("Error: {}", spanned_error.error);
    }
}

/// The message for a failure response: the first error's rendering.
pub fn primary_error(errors: &[SpannedError]) -> String {
    errors
        .first()
        .map(|e| e.error.to_string())
        .unwrap_or_else(|| "analysis failed".to_string())
}
