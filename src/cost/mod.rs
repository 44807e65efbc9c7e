//! The symbolic cost model.
//!
//! A procedure body is translated into a [`CostExpr`] per analysis case: a
//! tree of constants, loop-bound symbols, sums, products, branch maxima and
//! unresolved recursive calls. The [`Resolver`] drives the whole analysis:
//! helpers are resolved before their callers so their growth can be
//! substituted as a closed term, then each case's cost is handed to the
//! solver and the results are assembled into a [`ProcedureAnalysis`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::ast::{AnalyzeError, Procedure, Program, Results, SpannedError};
use crate::solve::{self, growth::Growth};

pub mod bounds;
pub mod build;
pub mod policy;

use build::CostBuilder;
use policy::ClassicPolicy;

/// The three asymptotic cases a procedure is analyzed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    Best,
    Worst,
    Average,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Worst, Case::Best, Case::Average];

    pub fn label(self) -> &'static str {
        match self {
            Case::Best => "best",
            Case::Worst => "worst",
            Case::Average => "average",
        }
    }
}

/// A loop trip-count symbol in terms of the problem size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundExpr {
    Const(u64),
    Log,
    Sqrt,
    Linear,
}

impl BoundExpr {
    pub fn growth(self) -> Growth {
        match self {
            BoundExpr::Const(_) => Growth::constant(),
            BoundExpr::Log => Growth::log(),
            BoundExpr::Sqrt => Growth::sqrt(),
            BoundExpr::Linear => Growth::linear(),
        }
    }
}

impl fmt::Display for BoundExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundExpr::Const(c) => write!(f, "{}", c),
            BoundExpr::Log => write!(f, "log n"),
            BoundExpr::Sqrt => write!(f, "sqrt(n)"),
            BoundExpr::Linear => write!(f, "n"),
        }
    }
}

/// How a recursive call shrinks the problem size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// `T(n - c)`
    Sub(u64),
    /// `T(n / b)`
    Div(u64),
    /// A modulo step, as in Euclid's algorithm.
    EuclidMod,
    /// The subproblem size comes from a data-dependent split point.
    DataDependent,
    /// The argument does not shrink at all.
    Same,
    /// No recognizable reduction.
    Unknown,
}

impl Reduction {
    /// Precedence when several arguments of one call carry different
    /// signals; the strongest one describes the call.
    pub fn strength(self) -> u8 {
        match self {
            Reduction::Same => 0,
            Reduction::Unknown => 1,
            Reduction::DataDependent => 2,
            Reduction::Sub(_) => 3,
            Reduction::Div(_) => 4,
            Reduction::EuclidMod => 5,
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Sub(c) => write!(f, "n-{}", c),
            Reduction::Div(b) => write!(f, "n/{}", b),
            Reduction::EuclidMod => write!(f, "n mod m"),
            Reduction::DataDependent => write!(f, "n'"),
            Reduction::Same => write!(f, "n"),
            Reduction::Unknown => write!(f, "?"),
        }
    }
}

/// Symbolic cost of a statement sequence for one analysis case.
#[derive(Debug, Clone)]
pub enum CostExpr {
    Const(u64),
    Bound(BoundExpr),
    Sum(Vec<CostExpr>),
    Prod(Vec<CostExpr>),
    Max(Box<CostExpr>, Box<CostExpr>),
    Min(Box<CostExpr>, Box<CostExpr>),
    /// A helper call whose growth is already known.
    Solved(Growth),
    /// An unresolved self-call; the solver turns these into a recurrence.
    Rec(Reduction),
}

impl CostExpr {
    pub fn count_recs(&self) -> usize {
        match self {
            CostExpr::Rec(_) => 1,
            CostExpr::Sum(v) | CostExpr::Prod(v) => v.iter().map(CostExpr::count_recs).sum(),
            CostExpr::Max(a, b) | CostExpr::Min(a, b) => a.count_recs() + b.count_recs(),
            _ => 0,
        }
    }

}

impl fmt::Display for CostExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostExpr::Const(c) => write!(f, "{}", c),
            CostExpr::Bound(b) => write!(f, "{}", b),
            CostExpr::Sum(v) => {
                let parts: Vec<String> = v.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", parts.join(" + "))
            }
            CostExpr::Prod(v) => {
                let parts: Vec<String> = v
                    .iter()
                    .map(|e| match e {
                        CostExpr::Sum(_) => format!("({})", e),
                        _ => e.to_string(),
                    })
                    .collect();
                write!(f, "{}", parts.join(" * "))
            }
            CostExpr::Max(a, b) => write!(f, "max({}, {})", a, b),
            CostExpr::Min(a, b) => write!(f, "min({}, {})", a, b),
            CostExpr::Solved(g) => write!(f, "O({})", g),
            CostExpr::Rec(r) => write!(f, "T({})", r),
        }
    }
}

/// A case's symbolic cost together with the notes recorded while building it.
#[derive(Debug, Clone)]
pub struct CaseCost {
    pub expr: CostExpr,
    pub notes: Vec<String>,
}

/// One slot per analysis case.
#[derive(Debug, Clone)]
pub struct CaseTable<T> {
    pub best: T,
    pub worst: T,
    pub average: T,
}

impl<T> CaseTable<T> {
    pub fn get(&self, case: Case) -> &T {
        match case {
            Case::Best => &self.best,
            Case::Worst => &self.worst,
            Case::Average => &self.average,
        }
    }
}

/// The complete result for one procedure: per-case symbolic costs, solved
/// growth classes, the recurrence (if the procedure recurses) and the
/// ordered reasoning trace.
#[derive(Debug, Clone)]
pub struct ProcedureAnalysis {
    pub name: String,
    pub costs: CaseTable<CaseCost>,
    pub best: Growth,
    pub worst: Growth,
    pub average: Growth,
    pub recurrence: Option<String>,
    pub trace: Vec<String>,
}

/// Resolves procedures to their analyses, memoizing results so shared
/// helpers are analyzed once. Helpers are resolved depth-first before their
/// callers; a cycle between distinct procedures is rejected.
pub struct Resolver<'p> {
    program: &'p Program,
    policy: ClassicPolicy,
    cache: HashMap<String, ProcedureAnalysis>,
    in_progress: HashSet<String>,
}

impl<'p> Resolver<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            policy: ClassicPolicy,
            cache: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Analyzes the first procedure declared in the program.
    pub fn resolve_first(&mut self) -> Results<ProcedureAnalysis> {
        let first = self.program.root_procedures.first().copied().ok_or_else(|| {
            vec![SpannedError {
                error: AnalyzeError::NoProcedures,
                span: None,
            }]
        })?;
        let name = self.program.procedure(first).name.clone();
        self.resolve(&name)
    }

    pub fn resolve(&mut self, name: &str) -> Results<ProcedureAnalysis> {
        if let Some(found) = self.cache.get(name) {
            return Ok(found.clone());
        }
        let pid = *self.program.procedure_map.get(name).ok_or_else(|| {
            vec![SpannedError {
                error: AnalyzeError::UnknownProcedure(name.to_string()),
                span: None,
            }]
        })?;
        if !self.in_progress.insert(name.to_string()) {
            return Err(vec![SpannedError {
                error: AnalyzeError::UnsupportedConstruct(format!(
                    "mutual recursion involving '{}' cannot be analyzed",
                    name
                )),
                span: None,
            }]);
        }

        let result = self.resolve_inner(name, pid);
        self.in_progress.remove(name);
        let analysis = result?;
        self.cache.insert(name.to_string(), analysis.clone());
        Ok(analysis)
    }

    fn resolve_inner(
        &mut self,
        name: &str,
        pid: crate::ast::ProcedureId,
    ) -> Results<ProcedureAnalysis> {
        let program = self.program;
        let proc: &Procedure = program.procedure(pid);

        let mut helpers: HashMap<String, ProcedureAnalysis> = HashMap::new();
        for callee in bounds::collect_callees(program, proc) {
            if callee == name || !program.procedure_map.contains_key(&callee) {
                continue;
            }
            let sub = self.resolve(&callee)?;
            helpers.insert(callee, sub);
        }

        let policy = self.policy;
        let costs = CaseTable {
            best: CostBuilder::build(program, proc, &helpers, &policy, Case::Best),
            worst: CostBuilder::build(program, proc, &helpers, &policy, Case::Worst),
            average: CostBuilder::build(program, proc, &helpers, &policy, Case::Average),
        };

        let worst_out = solve::solve(&costs.worst.expr, Case::Worst, &policy);
        let best_out = solve::solve(&costs.best.expr, Case::Best, &policy);
        let average_out = solve::solve(&costs.average.expr, Case::Average, &policy);

        // The worst case anchors the trace; the other cases contribute only
        // the notes that differ from it.
        let mut trace: Vec<String> = Vec::new();
        for note in costs
            .worst
            .notes
            .iter()
            .chain(worst_out.notes.iter())
            .chain(costs.best.notes.iter())
            .chain(best_out.notes.iter())
            .chain(costs.average.notes.iter())
            .chain(average_out.notes.iter())
        {
            if !trace.contains(note) {
                trace.push(note.clone());
            }
        }

        Ok(ProcedureAnalysis {
            name: name.to_string(),
            costs,
            best: best_out.growth,
            worst: worst_out.growth,
            average: average_out.growth,
            recurrence: worst_out.recurrence,
            trace,
        })
    }
}
