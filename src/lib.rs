pub mod ast;
pub mod catalog;
pub mod cli;
pub mod cost;
pub mod pretty;
pub mod report;
pub mod solve;

// Re-export
pub use ast::{format_errors, normalize_source, parse_program, AnalyzeError, Results, SpannedError};
pub use cost::{ProcedureAnalysis, Resolver};
pub use report::{AnalysisResponse, AnalysisSuccess, Complexity};
pub use solve::growth::Growth;

/// Parses the source and analyzes one procedure: the named one, or the first
/// declared procedure when no name is given.
pub fn analyze(source: &str, procedure: Option<&str>) -> Results<ProcedureAnalysis> {
    let program = ast::parse_program(source)?;
    let mut resolver = Resolver::new(&program);
    match procedure {
        Some(name) => resolver.resolve(name),
        None => resolver.resolve_first(),
    }
}

/// Full analysis to the serializable response shape; errors become a
/// `{error}` body instead of a `Result::Err`.
pub fn analyze_to_response(source: &str, procedure: Option<&str>) -> AnalysisResponse {
    match analyze(source, procedure) {
        Ok(analysis) => AnalysisResponse::Success(report::report(&analysis)),
        Err(errors) => {
            let message = errors
                .first()
                .map(|e| e.error.to_string())
                .unwrap_or_else(|| "analysis failed".to_string());
            AnalysisResponse::failure(message)
        }
    }
}
