//! Human-readable rendering of cost models and analysis results.

use std::io::{Result, Write};

use crate::cost::{Case, ProcedureAnalysis};
use crate::report::AnalysisSuccess;

#[derive(Debug, Clone)]
pub struct AnalysisPrintOptions {
    pub verbose: bool,
}

impl Default for AnalysisPrintOptions {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Prints the symbolic per-case cost model of a procedure.
pub fn print_cost_model(
    analysis: &ProcedureAnalysis,
    opts: &AnalysisPrintOptions,
    writer: &mut (impl Write + ?Sized),
) -> Result<()> {
    writeln!(writer, "Cost model for {}:", analysis.name)?;
    for case in Case::ALL {
        let cost = analysis.costs.get(case);
        writeln!(writer, " - {} case: {}", case.label(), cost.expr)?;
        if opts.verbose {
            for note in &cost.notes {
                writeln!(writer, "     {}", note)?;
            }
        }
    }
    Ok(())
}

/// Prints the classified result with its reasoning trace.
pub fn print_analysis(
    success: &AnalysisSuccess,
    opts: &AnalysisPrintOptions,
    writer: &mut (impl Write + ?Sized),
) -> Result<()> {
    let c = &success.complexity;
    writeln!(writer, "{}:", success.procedure_name)?;
    writeln!(writer, " - Worst case:   {}", c.big_o)?;
    writeln!(writer, " - Best case:    {}", c.big_omega)?;
    writeln!(writer, " - Tight bound:  {}", c.big_theta)?;
    if let Some(recurrence) = &c.recurrence {
        writeln!(writer, " - Recurrence:   {}", recurrence)?;
    }
    if opts.verbose {
        writeln!(writer, "Reasoning:")?;
        for (i, step) in c.reasoning.iter().enumerate() {
            writeln!(writer, " {:2}. {}", i + 1, step)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse_program;
    use crate::cost::Resolver;
    use crate::report;

    #[test]
    fn renders_through_a_trait_object_writer() {
        let program = parse_program("PROCEDURE P(n)\nBEGIN\n    RETURN n\nEND\n").unwrap();
        let mut resolver = Resolver::new(&program);
        let analysis = resolver.resolve("P").unwrap();
        let success = report::report(&analysis);
        let mut buf: Vec<u8> = Vec::new();
        let writer: &mut dyn Write = &mut buf;
        print_analysis(&success, &AnalysisPrintOptions::default(), writer).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Worst case"), "got {:?}", text);
    }
}
