//! Response shapes and reasoning-trace structure.

use bigo::{analyze_to_response, catalog, AnalysisResponse};

#[test]
fn success_serializes_to_the_wire_shape() {
    let example = catalog::find("linear-search").expect("example exists");
    let response = analyze_to_response(example.source, None);
    let json = serde_json::to_value(&response).expect("serialize");

    assert_eq!(json["procedure_name"], "LinearSearch");
    assert_eq!(json["complexity"]["big_o"], "O(n)");
    assert_eq!(json["complexity"]["big_omega"], "Ω(1)");
    assert_eq!(json["complexity"]["big_theta"], "Θ(n)");
    assert!(json["complexity"]["reasoning"].is_array());
    assert!(json.get("error").is_none());
}

#[test]
fn failure_serializes_with_a_null_complexity() {
    let response = analyze_to_response("PROCEDURE Broken(", None);
    let json = serde_json::to_value(&response).expect("serialize");

    assert!(json["error"]
        .as_str()
        .expect("error message")
        .starts_with("Syntax error"));
    assert!(json["complexity"].is_null());
    assert!(json.get("procedure_name").is_none());
}

#[test]
fn responses_round_trip_through_the_untagged_enum() {
    let example = catalog::find("fibonacci").expect("example exists");
    let response = analyze_to_response(example.source, None);
    let json = serde_json::to_string(&response).expect("serialize");
    let back: AnalysisResponse = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, response);
    assert!(back.is_success());
}

#[test]
fn reasoning_ends_with_a_conclusion() {
    let example = catalog::find("merge-sort").expect("example exists");
    match analyze_to_response(example.source, None) {
        AnalysisResponse::Success(s) => {
            let last = s.complexity.reasoning.last().expect("non-empty trace");
            assert!(last.starts_with("conclusion:"), "got {:?}", last);
        }
        AnalysisResponse::Failure(f) => panic!("analysis failed: {}", f.error),
    }
}

#[test]
fn reasoning_mentions_the_size_model() {
    let example = catalog::find("binary-search-rec").expect("example exists");
    match analyze_to_response(example.source, None) {
        AnalysisResponse::Success(s) => {
            let first = s.complexity.reasoning.first().expect("non-empty trace");
            assert!(first.contains("problem size"), "got {:?}", first);
        }
        AnalysisResponse::Failure(f) => panic!("analysis failed: {}", f.error),
    }
}

#[test]
fn recursive_reports_carry_their_recurrence() {
    let example = catalog::find("hanoi").expect("example exists");
    match analyze_to_response(example.source, None) {
        AnalysisResponse::Success(s) => {
            assert!(s.complexity.recurrence.is_some());
            assert!(s
                .complexity
                .reasoning
                .iter()
                .any(|n| n.contains("recursive call")));
        }
        AnalysisResponse::Failure(f) => panic!("analysis failed: {}", f.error),
    }
}
