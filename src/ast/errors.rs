use crate::ast::Span;

pub type Results<T> = Result<T, Vec<SpannedError>>;

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedError {
    pub error: AnalyzeError,
    pub span: Option<Span>,
}

/// Error taxonomy for the analyzer.
///
/// `Syntax` is always fatal. `UnknownProcedure` is fatal only when it names
/// the analysis target itself; a `CALL` to an undeclared helper is downgraded
/// to an opaque constant cost with a trace note. `UnsupportedConstruct`
/// covers control-flow or recurrence shapes the analyzer cannot model.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeError {
    /// Malformed pseudocode, with the parser's expectation.
    Syntax(String),

    /// Valid syntax, but a shape the analyzer cannot classify.
    UnsupportedConstruct(String),

    /// A procedure name that is not declared in the input.
    UnknownProcedure(String),

    /// The same procedure name declared twice.
    DuplicateProcedure(String),

    /// Input with no `PROCEDURE` declaration at all.
    NoProcedures,
}

impl std::fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(msg) => write!(f, "Syntax error: {}", msg),
            Self::UnsupportedConstruct(msg) => {
                write!(f, "Unsupported construct: {}", msg)
            }
            Self::UnknownProcedure(name) => {
                write!(f, "Procedure '{}' not found", name)
            }
            Self::DuplicateProcedure(name) => {
                write!(f, "Duplicate procedure: {}", name)
            }
            Self::NoProcedures => write!(f, "No procedures found in code"),
        }
    }
}

impl std::error::Error for AnalyzeError {}

pub fn format_errors(errors: &[SpannedError]) -> String {
    errors
        .iter()
        .map(|e| {
            if let Some(span) = &e.span {
                format!("Error at {}:{}: {}", span.line, span.column, e.error)
            } else {
                format!("Error: {}", e.error)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
