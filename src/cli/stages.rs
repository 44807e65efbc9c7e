// src/cli/stages.rs
use super::{FileOutput, PipelineStage};
use crate::{
    ast::{parse_program, Program, SpannedError},
    cost::{ProcedureAnalysis, Resolver},
    pretty::{
        print_analysis, print_cost_model, print_program_to_writer, AnalysisPrintOptions,
        PrintMode, PrintOptions,
    },
    report::{self, AnalysisResponse, AnalysisSuccess},
};
use std::io::Write;

// Parse Stage
pub struct ParseStage;

impl PipelineStage for ParseStage {
    type Input = String; // source code
    type Output = Program;
    type Error = Vec<SpannedError>;

    fn execute(&mut self, source_code: String) -> Result<Self::Output, Self::Error> {
        parse_program(&source_code)
    }

    fn name(&self) -> &'static str {
        "Parsing"
    }

    fn stage_number(&self) -> usize {
        1
    }
}

impl FileOutput for ParseStage {
    type Data = Program;

    fn write_output(
        &self,
        data: &Self::Data,
        writer: &mut dyn Write,
        cli: &super::Cli,
    ) -> Result<(), String> {
        let opts = PrintOptions {
            mode: if cli.verbose {
                PrintMode::Verbose
            } else {
                PrintMode::Summary
            },
            show_spans: cli.show_spans,
        };

        print_program_to_writer(data, &opts, writer)
            .map_err(|e| format!("Failed to print AST: {}", e))
    }
}

// Cost Stage: builds the symbolic cost model and solves it per case
pub struct CostStage {
    pub procedure: Option<String>,
}

impl PipelineStage for CostStage {
    type Input = Program;
    type Output = ProcedureAnalysis;
    type Error = Vec<SpannedError>;

    fn execute(&mut self, program: Program) -> Result<Self::Output, Self::Error> {
        let mut resolver = Resolver::new(&program);
        match &self.procedure {
            Some(name) => resolver.resolve(name),
            None => resolver.resolve_first(),
        }
    }

    fn name(&self) -> &'static str {
        "Cost model"
    }

    fn stage_number(&self) -> usize {
        2
    }
}

impl FileOutput for CostStage {
    type Data = ProcedureAnalysis;

    fn write_output(
        &self,
        data: &Self::Data,
        writer: &mut dyn Write,
        cli: &super::Cli,
    ) -> Result<(), String> {
        let opts = AnalysisPrintOptions {
            verbose: cli.verbose,
        };
        print_cost_model(data, &opts, writer)
            .map_err(|e| format!("Failed to print cost model: {}", e))
    }
}

// Analyze Stage: assembles the classified report
pub struct AnalyzeStage;

impl PipelineStage for AnalyzeStage {
    type Input = ProcedureAnalysis;
    type Output = AnalysisSuccess;
    type Error = String;

    fn execute(&mut self, analysis: ProcedureAnalysis) -> Result<Self::Output, Self::Error> {
        Ok(report::report(&analysis))
    }

    fn name(&self) -> &'static str {
        "Classification"
    }

    fn stage_number(&self) -> usize {
        3
    }
}

impl FileOutput for AnalyzeStage {
    type Data = AnalysisSuccess;

    fn write_output(
        &self,
        data: &Self::Data,
        writer: &mut dyn Write,
        cli: &super::Cli,
    ) -> Result<(), String> {
        if cli.json {
            let response = AnalysisResponse::Success(data.clone());
            serde_json::to_writer_pretty(&mut *writer, &response)
                .map_err(|e| format!("Failed to serialize response: {}", e))?;
            writeln!(writer).map_err(|e| format!("Failed to write output: {}", e))?;
            return Ok(());
        }

        let opts = AnalysisPrintOptions {
            verbose: cli.verbose,
        };
        print_analysis(data, &opts, writer).map_err(|e| format!("Failed to print report: {}", e))
    }
}
