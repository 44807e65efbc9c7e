// src/cli/pipeline.rs
use super::{output::*, stages::*, traits::*, Cli, Logger, Mode};
use crate::report::AnalysisResponse;

pub struct Pipeline {
    pub parse_stage: ParseStage,
    pub cost_stage: CostStage,
    pub analyze_stage: AnalyzeStage,
    pub logger: Logger,
}

impl Pipeline {
    pub fn new(cli: &Cli) -> Self {
        Self {
            parse_stage: ParseStage,
            cost_stage: CostStage {
                procedure: cli.procedure.clone(),
            },
            analyze_stage: AnalyzeStage,
            logger: Logger::new(cli.verbose, cli.quiet),
        }
    }

    /// Calculate the total number of stages for a given mode
    fn total_stages_for_mode(mode: &Mode) -> usize {
        match mode {
            Mode::Ast => 1,
            Mode::Cost => 2,
            Mode::Analyze => 3,
        }
    }

    pub fn execute(
        &mut self,
        source_code: String,
        target_mode: Mode,
        cli: &Cli,
    ) -> Result<(), String> {
        let total_stages = Self::total_stages_for_mode(&target_mode);

        // Stage 1: Parse
        self.logger.stage_start(
            self.parse_stage.stage_number(),
            total_stages,
            self.parse_stage.name(),
        );

        let program = match self.parse_stage.execute(source_code.clone()) {
            Ok(program) => {
                self.logger.stage_success();
                program
            }
            Err(errors) => {
                self.logger.stage_error(errors.len());
                // In --json mode, malformed input is still a well-formed
                // response body rather than a process failure.
                if cli.json && target_mode == Mode::Analyze {
                    let response = AnalysisResponse::failure(primary_error(&errors));
                    return OutputManager::write_json(&response, cli);
                }
                for error in &errors {
                    print_spanned_error(error, &source_code);
                }
                self.logger.abort_pipeline();
                return Err("parse stage failed".to_string());
            }
        };

        if target_mode == Mode::Ast {
            return OutputManager::handle_file_output(&self.parse_stage, &program, cli);
        }

        // Stage 2: Cost model (building and solving per case)
        self.logger.stage_start(
            self.cost_stage.stage_number(),
            total_stages,
            self.cost_stage.name(),
        );

        let analysis = match self.cost_stage.execute(program) {
            Ok(analysis) => {
                self.logger.stage_success();
                analysis
            }
            Err(errors) => {
                self.logger.stage_error(errors.len());
                if cli.json && target_mode == Mode::Analyze {
                    let response = AnalysisResponse::failure(primary_error(&errors));
                    return OutputManager::write_json(&response, cli);
                }
                for error in &errors {
                    print_spanned_error(error, &source_code);
                }
                self.logger.abort_pipeline();
                return Err("cost stage failed".to_string());
            }
        };

        for note in &analysis.trace {
            self.logger.detail(note);
        }

        if target_mode == Mode::Cost {
            return OutputManager::handle_file_output(&self.cost_stage, &analysis, cli);
        }

        // Stage 3: Classification
        self.logger.stage_start(
            self.analyze_stage.stage_number(),
            total_stages,
            self.analyze_stage.name(),
        );

        let success = self.analyze_stage.execute(analysis)?;
        self.logger.stage_success();

        OutputManager::handle_file_output(&self.analyze_stage, &success, cli)
    }
}
