//! Recurrence solving.
//!
//! A case's [`CostExpr`] either contains no recursive terms, in which case
//! its growth is read off structurally, or it describes a recurrence
//! `T(n) = sum of T(reduced n) + f(n)` where `f` is the non-recursive work.
//! Divide-style recurrences go through the master theorem, subtract-style
//! ones through depth counting or characteristic-root iteration, and
//! anything else through bounded numeric unrolling.

use crate::cost::policy::CasePolicy;
use crate::cost::{Case, CostExpr, Reduction};

pub mod growth;

use growth::Growth;

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// The solver's answer for one case.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub growth: Growth,
    pub recurrence: Option<String>,
    pub notes: Vec<String>,
}

impl SolveOutcome {
    fn closed(growth: Growth) -> Self {
        SolveOutcome {
            growth,
            recurrence: None,
            notes: Vec::new(),
        }
    }
}

pub fn solve(expr: &CostExpr, case: Case, policy: &dyn CasePolicy) -> SolveOutcome {
    let mut recs = Vec::new();
    let mut rec_in_loop = false;
    collect_recs(expr, false, &mut recs, &mut rec_in_loop);

    if recs.is_empty() {
        return SolveOutcome::closed(growth_of(expr));
    }
    if rec_in_loop {
        return SolveOutcome {
            growth: Growth::Unknown,
            recurrence: None,
            notes: vec![
                "a recursive call inside a loop whose trip count grows with n has no closed form here"
                    .to_string(),
            ],
        };
    }

    let work = growth_of(expr);
    solve_recurrence(recs, work, case, policy)
}

/// Gathers the recursive terms of the expression. A term multiplied by a
/// non-constant factor (a recursive call inside a growing loop) is flagged:
/// the call count is no longer the plain number of `Rec` nodes.
fn collect_recs(expr: &CostExpr, scaled: bool, recs: &mut Vec<Reduction>, flagged: &mut bool) {
    match expr {
        CostExpr::Rec(r) => {
            if scaled {
                *flagged = true;
            }
            recs.push(*r);
        }
        CostExpr::Sum(v) => {
            for e in v {
                collect_recs(e, scaled, recs, flagged);
            }
        }
        CostExpr::Prod(v) => {
            for (i, e) in v.iter().enumerate() {
                let grown_sibling = v
                    .iter()
                    .enumerate()
                    .any(|(j, s)| j != i && !growth_of(s).is_constant());
                collect_recs(e, scaled || grown_sibling, recs, flagged);
            }
        }
        CostExpr::Max(a, b) | CostExpr::Min(a, b) => {
            collect_recs(a, scaled, recs, flagged);
            collect_recs(b, scaled, recs, flagged);
        }
        _ => {}
    }
}

/// Structural growth of a cost expression, treating recursive terms as
/// constant placeholders. Sums take the dominant term, products compose.
pub fn growth_of(expr: &CostExpr) -> Growth {
    match expr {
        CostExpr::Const(_) | CostExpr::Rec(_) => Growth::constant(),
        CostExpr::Bound(b) => b.growth(),
        CostExpr::Solved(g) => g.clone(),
        CostExpr::Sum(v) => v
            .iter()
            .map(growth_of)
            .fold(Growth::constant(), Growth::max),
        CostExpr::Prod(v) => v
            .iter()
            .map(growth_of)
            .fold(Growth::constant(), Growth::mul),
        CostExpr::Max(a, b) => growth_of(a).max(growth_of(b)),
        CostExpr::Min(a, b) => growth_of(a).min(growth_of(b)),
    }
}

fn solve_recurrence(
    reductions: Vec<Reduction>,
    work: Growth,
    case: Case,
    policy: &dyn CasePolicy,
) -> SolveOutcome {
    let mut notes = Vec::new();

    // Data-dependent splits get a concrete shape from the policy: maximally
    // unbalanced in the worst case, even halves otherwise.
    let reductions = if reductions.contains(&Reduction::DataDependent) {
        match case {
            Case::Worst => {
                notes.push(policy.split_worst());
                let mut mapped = Vec::new();
                let mut first = true;
                for r in reductions {
                    match r {
                        Reduction::DataDependent if first => {
                            first = false;
                            mapped.push(Reduction::Sub(1));
                        }
                        // The sibling half is constant-sized in a maximally
                        // unbalanced split; it adds no further level.
                        Reduction::DataDependent => {}
                        other => mapped.push(other),
                    }
                }
                mapped
            }
            Case::Best | Case::Average => {
                notes.push(policy.split_balanced());
                reductions
                    .into_iter()
                    .map(|r| match r {
                        Reduction::DataDependent => Reduction::Div(2),
                        other => other,
                    })
                    .collect()
            }
        }
    } else {
        reductions
    };

    if reductions.iter().any(|r| matches!(r, Reduction::Same)) {
        notes.push(
            "a recursive call does not reduce its input, so no closed form exists".to_string(),
        );
        return SolveOutcome {
            growth: Growth::Unknown,
            recurrence: Some(recurrence_string(&reductions, &work)),
            notes,
        };
    }
    if reductions.iter().any(|r| matches!(r, Reduction::Unknown)) {
        notes.push(
            "could not determine how the recursion reduces its input; no closed form".to_string(),
        );
        return SolveOutcome {
            growth: Growth::Unknown,
            recurrence: Some(recurrence_string(&reductions, &work)),
            notes,
        };
    }

    let recurrence = Some(recurrence_string(&reductions, &work));

    if reductions.iter().any(|r| matches!(r, Reduction::EuclidMod)) {
        notes.push(
            "the modulo step at least halves one argument every two calls, so the recursion depth is O(log n)"
                .to_string(),
        );
        return SolveOutcome {
            growth: Growth::log().mul(work),
            recurrence,
            notes,
        };
    }

    let divs: Vec<u64> = reductions
        .iter()
        .filter_map(|r| match r {
            Reduction::Div(b) => Some(*b),
            _ => None,
        })
        .collect();
    let subs: Vec<u64> = reductions
        .iter()
        .filter_map(|r| match r {
            Reduction::Sub(c) => Some(*c),
            _ => None,
        })
        .collect();

    if subs.is_empty() && !divs.is_empty() && divs.iter().all(|&b| b == divs[0]) {
        return master_theorem(divs.len() as u64, divs[0], work, recurrence, notes);
    }
    if divs.is_empty() && !subs.is_empty() {
        return subtract_recurrence(&subs, work, recurrence, notes);
    }

    numeric_unrolling(&reductions, work, recurrence, notes)
}

fn master_theorem(
    a: u64,
    b: u64,
    work: Growth,
    recurrence: Option<String>,
    mut notes: Vec<String>,
) -> SolveOutcome {
    let critical = (a as f64).ln() / (b as f64).ln();
    let (work_exp, work_log) = match &work {
        Growth::Term { exp, log, .. } => (*exp, *log),
        // Exponential work dominates any polynomial leaf count outright.
        Growth::Exponential { .. } => {
            notes.push("the per-call work is already exponential and dominates".to_string());
            return SolveOutcome {
                growth: work,
                recurrence,
                notes,
            };
        }
        Growth::Unknown => {
            return SolveOutcome {
                growth: Growth::Unknown,
                recurrence,
                notes,
            }
        }
    };

    notes.push(format!(
        "master theorem with a = {}, b = {}: the critical exponent is log_{}({}) = {:.3}",
        a, b, b, a, critical
    ));

    let eps = 1e-6;
    let growth = if work_exp < critical - eps {
        notes.push("the leaves of the recursion tree dominate the per-level work".to_string());
        Growth::Term {
            exp: critical,
            log: 0,
            exp_label: exponent_label(critical, a, b),
        }
    } else if (work_exp - critical).abs() <= eps {
        notes.push(
            "the per-level work balances the leaf count, adding a logarithmic factor".to_string(),
        );
        Growth::Term {
            exp: critical,
            log: work_log + 1,
            exp_label: exponent_label(critical, a, b),
        }
    } else {
        notes.push("the per-call work dominates the recursion tree".to_string());
        work
    };

    SolveOutcome {
        growth,
        recurrence,
        notes,
    }
}

/// A display label for critical exponents that are not nice numbers, such as
/// `log_2(3)` for Karatsuba-shaped recurrences.
fn exponent_label(critical: f64, a: u64, b: u64) -> Option<String> {
    let nice = (critical - critical.round()).abs() < 1e-6 || (critical - 0.5).abs() < 1e-6;
    if nice {
        None
    } else {
        Some(format!("log_{}({})", b, a))
    }
}

fn subtract_recurrence(
    subs: &[u64],
    work: Growth,
    recurrence: Option<String>,
    mut notes: Vec<String>,
) -> SolveOutcome {
    if subs.len() == 1 {
        let c = subs[0];
        notes.push(format!(
            "the recursion removes a constant amount ({}) per call, giving O(n) depth",
            c
        ));
        return SolveOutcome {
            growth: Growth::linear().mul(work),
            recurrence,
            notes,
        };
    }

    if subs.iter().all(|&c| c == subs[0]) {
        let a = subs.len() as f64;
        let c = subs[0];
        let ratio = a.powf(1.0 / c as f64);
        notes.push(format!(
            "each call spawns {} subproblems that are only {} smaller, so the call tree is exponential",
            subs.len(),
            c
        ));
        let base = if c == 1 {
            subs.len().to_string()
        } else {
            format!("{:.3}", ratio)
        };
        return SolveOutcome {
            growth: Growth::Exponential { base, ratio },
            recurrence,
            notes,
        };
    }

    // Mixed offsets, e.g. T(n-1) + T(n-2): iterate the recurrence far enough
    // for the ratio of consecutive terms to settle on the dominant
    // characteristic root.
    let max_c = subs.iter().copied().max().unwrap_or(1) as usize;
    let depth = 48 + max_c;
    let mut t = vec![1.0f64; depth + 1];
    for k in (max_c + 1)..=depth {
        t[k] = 1.0;
        for &c in subs {
            t[k] += t[k - c as usize];
        }
    }
    let ratio = t[depth] / t[depth - 1];
    let base = if (ratio - GOLDEN_RATIO).abs() < 5e-3 {
        "φ".to_string()
    } else {
        format!("{:.3}", ratio)
    };
    notes.push(format!(
        "the dominant characteristic root of the recurrence is about {:.3}",
        ratio
    ));
    SolveOutcome {
        growth: Growth::Exponential { base, ratio },
        recurrence,
        notes,
    }
}

/// Last resort for mixed subtract/divide recurrences: unroll numerically and
/// look for a stable geometric ratio.
fn numeric_unrolling(
    reductions: &[Reduction],
    work: Growth,
    recurrence: Option<String>,
    mut notes: Vec<String>,
) -> SolveOutcome {
    let depth = 64usize;
    let mut t = vec![1.0f64; depth + 1];
    for k in 2..=depth {
        t[k] = 1.0;
        for r in reductions {
            let m = match r {
                Reduction::Sub(c) => k.saturating_sub(*c as usize),
                Reduction::Div(b) => k / (*b as usize).max(1),
                _ => 0,
            };
            if m >= 1 && m < k {
                t[k] += t[m];
            }
        }
    }
    let ratio = t[depth] / t[depth - 1];
    if ratio > 1.02 {
        notes.push(format!(
            "numeric unrolling of the recurrence settles on a geometric ratio of about {:.2}",
            ratio
        ));
        return SolveOutcome {
            growth: Growth::Exponential {
                base: format!("{:.2}", ratio),
                ratio,
            },
            recurrence,
            notes,
        };
    }

    let degree = (t[depth].ln() - t[depth / 2].ln())
        / ((depth as f64).ln() - ((depth / 2) as f64).ln());
    if (degree - degree.round()).abs() < 0.15 && degree.round() >= 0.0 {
        notes.push(format!(
            "numeric unrolling of the recurrence suggests polynomial growth of degree {}",
            degree.round() as i64
        ));
        return SolveOutcome {
            growth: Growth::poly(degree.round()).mul(work),
            recurrence,
            notes,
        };
    }

    notes.push("could not determine a closed form for this recurrence".to_string());
    SolveOutcome {
        growth: Growth::Unknown,
        recurrence,
        notes,
    }
}

/// Renders a recurrence like `T(n) = 2T(n/2) + O(n)`, grouping identical
/// recursive terms under one coefficient.
fn recurrence_string(reductions: &[Reduction], work: &Growth) -> String {
    let mut groups: Vec<(String, usize)> = Vec::new();
    for r in reductions {
        let term = r.to_string();
        if let Some(g) = groups.iter_mut().find(|(t, _)| *t == term) {
            g.1 += 1;
        } else {
            groups.push((term, 1));
        }
    }
    let terms: Vec<String> = groups
        .iter()
        .map(|(t, c)| {
            if *c == 1 {
                format!("T({})", t)
            } else {
                format!("{}T({})", c, t)
            }
        })
        .collect();
    format!("T(n) = {} + O({})", terms.join(" + "), work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::policy::ClassicPolicy;
    use crate::cost::BoundExpr;

    fn solve_case(expr: &CostExpr, case: Case) -> SolveOutcome {
        solve(expr, case, &ClassicPolicy)
    }

    #[test]
    fn merge_sort_shape_is_linearithmic() {
        // T(n) = 2T(n/2) + O(n)
        let expr = CostExpr::Sum(vec![
            CostExpr::Rec(Reduction::Div(2)),
            CostExpr::Rec(Reduction::Div(2)),
            CostExpr::Solved(Growth::linear()),
        ]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "n log n");
        assert_eq!(out.recurrence.as_deref(), Some("T(n) = 2T(n/2) + O(n)"));
    }

    #[test]
    fn halving_with_constant_work_is_logarithmic() {
        let expr = CostExpr::Sum(vec![CostExpr::Const(1), CostExpr::Rec(Reduction::Div(2))]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "log n");
    }

    #[test]
    fn single_decrement_is_linear() {
        let expr = CostExpr::Sum(vec![CostExpr::Const(1), CostExpr::Rec(Reduction::Sub(1))]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "n");
        assert_eq!(out.recurrence.as_deref(), Some("T(n) = T(n-1) + O(1)"));
    }

    #[test]
    fn fibonacci_shape_finds_the_golden_ratio() {
        let expr = CostExpr::Sum(vec![
            CostExpr::Rec(Reduction::Sub(1)),
            CostExpr::Rec(Reduction::Sub(2)),
            CostExpr::Const(1),
        ]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "φ^n");
        assert_eq!(
            out.recurrence.as_deref(),
            Some("T(n) = T(n-1) + T(n-2) + O(1)")
        );
    }

    #[test]
    fn doubled_decrement_is_base_two_exponential() {
        let expr = CostExpr::Sum(vec![
            CostExpr::Rec(Reduction::Sub(1)),
            CostExpr::Rec(Reduction::Sub(1)),
            CostExpr::Const(1),
        ]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "2^n");
    }

    #[test]
    fn data_dependent_split_depends_on_the_case() {
        // Quicksort shape: two data-dependent calls plus linear partitioning.
        let expr = CostExpr::Sum(vec![
            CostExpr::Rec(Reduction::DataDependent),
            CostExpr::Rec(Reduction::DataDependent),
            CostExpr::Solved(Growth::linear()),
        ]);
        let worst = solve_case(&expr, Case::Worst);
        assert_eq!(worst.growth.to_string(), "n^2");
        let average = solve_case(&expr, Case::Average);
        assert_eq!(average.growth.to_string(), "n log n");
    }

    #[test]
    fn recursion_inside_a_growing_loop_has_no_closed_form() {
        let expr = CostExpr::Prod(vec![
            CostExpr::Bound(BoundExpr::Linear),
            CostExpr::Rec(Reduction::Sub(1)),
        ]);
        let out = solve_case(&expr, Case::Worst);
        assert!(out.growth.is_unknown());
    }

    #[test]
    fn euclid_reduction_is_logarithmic() {
        let expr = CostExpr::Sum(vec![
            CostExpr::Const(1),
            CostExpr::Rec(Reduction::EuclidMod),
        ]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "log n");
    }

    #[test]
    fn no_recursion_reads_growth_structurally() {
        let expr = CostExpr::Prod(vec![
            CostExpr::Bound(BoundExpr::Linear),
            CostExpr::Sum(vec![
                CostExpr::Const(1),
                CostExpr::Prod(vec![
                    CostExpr::Bound(BoundExpr::Linear),
                    CostExpr::Const(1),
                ]),
            ]),
        ]);
        let out = solve_case(&expr, Case::Worst);
        assert_eq!(out.growth.to_string(), "n^2");
        assert!(out.recurrence.is_none());
    }
}
