//! Case policies.
//!
//! Data-dependent control flow (early returns, value-guarded loops,
//! pivot-style splits) has no single trip count; turning it into best, worst
//! and average bounds requires an assumption. The assumptions live behind
//! [`CasePolicy`] so that the builder and the solver stay mechanical, and the
//! note text that justifies each assumption is produced in exactly one place.

/// Produces the assumption applied for each data-dependent construct, per
/// analysis case, together with the reasoning-trace note that records it.
pub trait CasePolicy {
    fn name(&self) -> &'static str;

    /// Average over an `IF`/`ELSE` whose branches differ in cost.
    fn branch_average(&self) -> String;

    /// A conditional `RETURN` inside a counted loop, best case.
    fn early_exit_best(&self) -> String;

    /// A conditional `RETURN` inside a counted loop, average case.
    fn early_exit_average(&self) -> String;

    /// A loop whose trip count depends on data values, worst case.
    fn loop_worst(&self, condition: &str) -> String;

    /// A value-guarded `WHILE` that may fail immediately, best case.
    fn loop_best(&self) -> String;

    /// A value-guarded loop, average case.
    fn loop_average(&self) -> String;

    /// A value-guarded `REPEAT`, which always runs at least once, best case.
    fn repeat_best(&self) -> String;

    /// A data-dependent split (pivot, partition), worst case.
    fn split_worst(&self) -> String;

    /// A data-dependent split, best and average cases.
    fn split_balanced(&self) -> String;
}

/// The textbook assumptions: uniformly distributed inputs, equally likely
/// branches, maximally unbalanced splits in the worst case and even splits
/// otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicPolicy;

impl CasePolicy for ClassicPolicy {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn branch_average(&self) -> String {
        "average case: branches are assumed equally likely, so the heavier branch sets the growth class".to_string()
    }

    fn early_exit_best(&self) -> String {
        "best case: the conditional return can fire on the first iteration".to_string()
    }

    fn early_exit_average(&self) -> String {
        "average case: the conditional return fires about halfway through the loop, which keeps the same growth class".to_string()
    }

    fn loop_worst(&self, condition: &str) -> String {
        format!(
            "worst case: the loop condition `{}` depends on data values; assuming up to a linear number of iterations",
            condition
        )
    }

    fn loop_best(&self) -> String {
        "best case: the value-guarded loop condition can fail immediately".to_string()
    }

    fn loop_average(&self) -> String {
        "average case: the value-guarded loop runs about half its maximum iterations, which keeps the same growth class".to_string()
    }

    fn repeat_best(&self) -> String {
        "best case: the exit condition can hold after the first pass".to_string()
    }

    fn split_worst(&self) -> String {
        "worst case: the data-dependent split is maximally unbalanced, leaving one subproblem of size n-1".to_string()
    }

    fn split_balanced(&self) -> String {
        "assuming each data-dependent split divides its input roughly in half".to_string()
    }
}
