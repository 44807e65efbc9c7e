//! End-to-end classification of the built-in example catalog.

use bigo::{analyze, analyze_to_response, catalog, AnalysisResponse, AnalyzeError, Complexity};

fn classify(name: &str) -> Complexity {
    let example = catalog::find(name).expect("example exists");
    match analyze_to_response(example.source, None) {
        AnalysisResponse::Success(s) => s.complexity,
        AnalysisResponse::Failure(f) => panic!("analysis of {} failed: {}", name, f.error),
    }
}

#[test]
fn every_catalog_entry_analyzes() {
    for example in catalog::EXAMPLES {
        let response = analyze_to_response(example.source, None);
        assert!(response.is_success(), "{} failed to analyze", example.name);
    }
}

#[test]
fn insertion_sort_is_quadratic_with_linear_best_case() {
    let c = classify("insertion-sort");
    assert_eq!(c.big_o, "O(n^2)");
    assert_eq!(c.big_omega, "Ω(n)");
    assert_eq!(c.big_theta, "Θ(n^2)");
    assert!(c.recurrence.is_none());
}

#[test]
fn selection_sort_is_quadratic_in_every_case() {
    let c = classify("selection-sort");
    assert_eq!(c.big_o, "O(n^2)");
    assert_eq!(c.big_omega, "Ω(n^2)");
    assert_eq!(c.big_theta, "Θ(n^2)");
}

#[test]
fn bubble_sort_is_quadratic_in_every_case() {
    let c = classify("bubble-sort");
    assert_eq!(c.big_theta, "Θ(n^2)");
    assert_eq!(c.big_omega, "Ω(n^2)");
}

#[test]
fn merge_sort_solves_its_recurrence() {
    let c = classify("merge-sort");
    assert_eq!(c.big_o, "O(n log n)");
    assert_eq!(c.big_omega, "Ω(n log n)");
    assert_eq!(c.big_theta, "Θ(n log n)");
    assert_eq!(c.recurrence.as_deref(), Some("T(n) = 2T(n/2) + O(n)"));
}

#[test]
fn quick_sort_distinguishes_worst_and_average() {
    let c = classify("quick-sort");
    assert_eq!(c.big_o, "O(n^2)");
    assert_eq!(c.big_omega, "Ω(n log n)");
    assert_eq!(c.big_theta, "Θ(n log n)");
    assert_eq!(c.recurrence.as_deref(), Some("T(n) = T(n-1) + O(n)"));
}

#[test]
fn heap_sort_is_linearithmic() {
    let c = classify("heap-sort");
    assert_eq!(c.big_o, "O(n log n)");
    assert_eq!(c.big_omega, "Ω(n log n)");
    assert_eq!(c.big_theta, "Θ(n log n)");
}

#[test]
fn linear_search_has_a_constant_best_case() {
    let c = classify("linear-search");
    assert_eq!(c.big_o, "O(n)");
    assert_eq!(c.big_omega, "Ω(1)");
    assert_eq!(c.big_theta, "Θ(n)");
    assert!(c.recurrence.is_none());
    assert!(
        c.reasoning.iter().any(|n| n.contains("first iteration")),
        "expected an early-exit note in {:?}",
        c.reasoning
    );
}

#[test]
fn iterative_binary_search_is_logarithmic_in_every_case() {
    // The trip count of a halving loop is structural, so the best case is
    // log n as well.
    let c = classify("binary-search");
    assert_eq!(c.big_o, "O(log n)");
    assert_eq!(c.big_omega, "Ω(log n)");
    assert_eq!(c.big_theta, "Θ(log n)");
}

#[test]
fn recursive_binary_search_matches_the_iterative_one() {
    let c = classify("binary-search-rec");
    assert_eq!(c.big_theta, "Θ(log n)");
    assert_eq!(c.recurrence.as_deref(), Some("T(n) = T(n/2) + O(1)"));
}

#[test]
fn factorial_iterative_and_recursive_agree() {
    let iterative = classify("factorial");
    assert_eq!(iterative.big_theta, "Θ(n)");
    assert!(iterative.recurrence.is_none());

    let recursive = classify("factorial-rec");
    assert_eq!(recursive.big_theta, "Θ(n)");
    assert_eq!(recursive.big_omega, "Ω(n)");
    assert_eq!(recursive.recurrence.as_deref(), Some("T(n) = T(n-1) + O(1)"));
}

#[test]
fn naive_fibonacci_is_golden_ratio_exponential() {
    let c = classify("fibonacci");
    assert_eq!(c.big_o, "O(φ^n)");
    assert_eq!(c.big_theta, "Θ(φ^n)");
    assert_eq!(
        c.recurrence.as_deref(),
        Some("T(n) = T(n-1) + T(n-2) + O(1)")
    );
}

#[test]
fn fast_power_halves_its_exponent() {
    let c = classify("fast-power");
    assert_eq!(c.big_theta, "Θ(log n)");
    assert_eq!(c.recurrence.as_deref(), Some("T(n) = T(n/2) + O(1)"));
}

#[test]
fn array_sum_is_linear() {
    let c = classify("array-sum");
    assert_eq!(c.big_theta, "Θ(n)");
}

#[test]
fn matrix_multiply_is_cubic() {
    let c = classify("matrix-multiply");
    assert_eq!(c.big_theta, "Θ(n^3)");
}

#[test]
fn euclid_gcd_is_logarithmic() {
    let c = classify("gcd");
    assert_eq!(c.big_theta, "Θ(log n)");
    assert_eq!(c.recurrence.as_deref(), Some("T(n) = T(n mod m) + O(1)"));
}

#[test]
fn trial_division_is_square_root_bounded() {
    let c = classify("is-prime");
    assert_eq!(c.big_o, "O(sqrt(n))");
    assert_eq!(c.big_omega, "Ω(1)");
    assert_eq!(c.big_theta, "Θ(sqrt(n))");
}

#[test]
fn hanoi_is_base_two_exponential() {
    let c = classify("hanoi");
    assert_eq!(c.big_theta, "Θ(2^n)");
    assert_eq!(c.recurrence.as_deref(), Some("T(n) = 2T(n-1) + O(1)"));
}

#[test]
fn analysis_is_deterministic() {
    let example = catalog::find("quick-sort").expect("example exists");
    let first = analyze_to_response(example.source, None);
    let second = analyze_to_response(example.source, None);
    assert_eq!(first, second);
}

#[test]
fn named_procedure_selects_a_helper() {
    let example = catalog::find("merge-sort").expect("example exists");
    match analyze_to_response(example.source, Some("Merge")) {
        AnalysisResponse::Success(s) => {
            assert_eq!(s.procedure_name, "Merge");
            assert_eq!(s.complexity.big_theta, "Θ(n)");
        }
        AnalysisResponse::Failure(f) => panic!("Merge analysis failed: {}", f.error),
    }
}

#[test]
fn unknown_target_procedure_is_an_error() {
    let example = catalog::find("linear-search").expect("example exists");
    let errors = analyze(example.source, Some("Missing")).unwrap_err();
    assert!(matches!(
        errors[0].error,
        AnalyzeError::UnknownProcedure(_)
    ));
}

#[test]
fn mutual_recursion_is_rejected() {
    let src = "\
PROCEDURE Ping(n)
BEGIN
    RETURN Pong(n - 1)
END

PROCEDURE Pong(n)
BEGIN
    RETURN Ping(n - 1)
END
";
    let errors = analyze(src, None).unwrap_err();
    assert!(matches!(
        errors[0].error,
        AnalyzeError::UnsupportedConstruct(_)
    ));
}

#[test]
fn non_reducing_recursion_has_no_closed_form() {
    let src = "\
PROCEDURE Forever(n)
BEGIN
    RETURN Forever(n)
END
";
    match analyze_to_response(src, None) {
        AnalysisResponse::Success(s) => {
            assert_eq!(s.complexity.big_o, "O(?)");
            assert_eq!(s.complexity.big_theta, "Θ(?)");
            assert!(s
                .complexity
                .reasoning
                .iter()
                .any(|n| n.contains("does not reduce")));
        }
        AnalysisResponse::Failure(f) => panic!("expected a classified unknown: {}", f.error),
    }
}

#[test]
fn undeclared_helper_calls_are_treated_as_constant() {
    let src = "\
PROCEDURE Driver(n)
BEGIN
    CALL Mystery(n)
END
";
    match analyze_to_response(src, None) {
        AnalysisResponse::Success(s) => {
            assert_eq!(s.complexity.big_theta, "Θ(1)");
            assert!(s
                .complexity
                .reasoning
                .iter()
                .any(|n| n.contains("undeclared")));
        }
        AnalysisResponse::Failure(f) => panic!("expected success: {}", f.error),
    }
}

#[test]
fn extreme_constant_loop_bounds_fall_back_to_linear() {
    // The literal bounds span nearly the whole i64 range; counting the trip
    // difference would overflow, so the loop classifies as O(n) instead.
    let src = "\
PROCEDURE Wide(n)
BEGIN
    FOR i <- -9223372036854775807 TO 9223372036854775807 DO
        CALL print(i)
    END
END
";
    match analyze_to_response(src, None) {
        AnalysisResponse::Success(s) => {
            assert_eq!(s.complexity.big_theta, "Θ(n)");
        }
        AnalysisResponse::Failure(f) => panic!("expected success: {}", f.error),
    }
}

#[test]
fn nested_loops_multiply_their_bounds() {
    let src = "\
PROCEDURE Pairs(n)
BEGIN
    FOR i <- 1 TO n DO
        FOR j <- 1 TO n DO
            CALL print(i, j)
        END
    END
END
";
    match analyze_to_response(src, None) {
        AnalysisResponse::Success(s) => {
            assert_eq!(s.complexity.big_theta, "Θ(n^2)");
        }
        AnalysisResponse::Failure(f) => panic!("expected success: {}", f.error),
    }
}
