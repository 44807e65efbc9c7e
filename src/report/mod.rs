//! Report assembly.
//!
//! Turns a solved [`ProcedureAnalysis`] into the canonical classification
//! strings (`O(...)`, `Ω(...)`, `Θ(...)`) and the serializable response
//! shapes used by the CLI's JSON output.

use serde::{Deserialize, Serialize};

use crate::cost::ProcedureAnalysis;
use crate::solve::growth::Growth;

/// The classified complexity of one procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complexity {
    pub big_o: String,
    pub big_omega: String,
    pub big_theta: String,
    pub recurrence: Option<String>,
    pub reasoning: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSuccess {
    pub procedure_name: String,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub error: String,
    pub complexity: Option<Complexity>,
}

/// The wire shape: either a classified procedure or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success(AnalysisSuccess),
    Failure(AnalysisFailure),
}

impl AnalysisResponse {
    pub fn failure(message: String) -> Self {
        AnalysisResponse::Failure(AnalysisFailure {
            error: message,
            complexity: None,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResponse::Success(_))
    }
}

/// Builds the report for a solved procedure, appending the concluding
/// summary line to the reasoning trace.
pub fn report(analysis: &ProcedureAnalysis) -> AnalysisSuccess {
    let big_o = format!("O({})", analysis.worst);
    let big_omega = format!("Ω({})", analysis.best);
    let big_theta = theta(&analysis.best, &analysis.worst, &analysis.average);

    let mut reasoning = analysis.trace.clone();
    reasoning.push(summary_line(analysis, &big_o, &big_omega, &big_theta));

    AnalysisSuccess {
        procedure_name: analysis.name.clone(),
        complexity: Complexity {
            big_o,
            big_omega,
            big_theta,
            recurrence: analysis.recurrence.clone(),
            reasoning,
        },
    }
}

/// The Θ class: the matching bound when best and worst coincide, otherwise
/// the average case when it is definite, otherwise "not tight".
fn theta(best: &Growth, worst: &Growth, average: &Growth) -> String {
    if best.is_unknown() && worst.is_unknown() {
        return "Θ(?)".to_string();
    }
    if best.same_order(worst) {
        return format!("Θ({})", worst);
    }
    if !average.is_unknown() {
        return format!("Θ({})", average);
    }
    "not tight".to_string()
}

fn summary_line(
    analysis: &ProcedureAnalysis,
    big_o: &str,
    big_omega: &str,
    big_theta: &str,
) -> String {
    if big_theta == "not tight" {
        format!(
            "conclusion: {} runs in {} worst case and {} best case; the bounds do not meet, so no Θ class is reported",
            analysis.name, big_o, big_omega
        )
    } else if analysis.best.same_order(&analysis.worst) {
        format!(
            "conclusion: {} runs in {} in every case",
            analysis.name, big_theta
        )
    } else {
        format!(
            "conclusion: {} runs in {} worst case, {} best case, {} on average",
            analysis.name, big_o, big_omega, big_theta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth_pair(best: Growth, worst: Growth, average: Growth) -> String {
        theta(&best, &worst, &average)
    }

    #[test]
    fn matching_bounds_give_theta() {
        assert_eq!(
            growth_pair(Growth::linear(), Growth::linear(), Growth::linear()),
            "Θ(n)"
        );
    }

    #[test]
    fn definite_average_breaks_the_tie() {
        assert_eq!(
            growth_pair(Growth::constant(), Growth::linear(), Growth::linear()),
            "Θ(n)"
        );
    }

    #[test]
    fn unknown_everywhere_is_theta_question_mark() {
        assert_eq!(
            growth_pair(Growth::Unknown, Growth::Unknown, Growth::Unknown),
            "Θ(?)"
        );
    }

    #[test]
    fn indefinite_average_is_not_tight() {
        assert_eq!(
            growth_pair(Growth::constant(), Growth::linear(), Growth::Unknown),
            "not tight"
        );
    }

    #[test]
    fn responses_serialize_without_a_tag() {
        let failure = AnalysisResponse::failure("Syntax error: bad input".to_string());
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["error"], "Syntax error: bad input");
        assert!(json["complexity"].is_null());
    }
}
