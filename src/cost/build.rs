//! Translates a procedure body into a symbolic [`CostExpr`] for one case.
//!
//! The walk is syntax-directed: sequences become sums, loops become products
//! of a trip-count bound and the body, branches become maxima or minima
//! depending on the case, and calls become either a solved helper growth, a
//! constant, or an unresolved recurrence term. All case-specific assumptions
//! go through the policy so every one of them leaves a note.

use std::collections::HashMap;

use crate::ast::{ExpressionId, ExpressionKind, Procedure, Program, StatementId, StatementKind};

use super::bounds::{self, SizeModel, VarOrigin, WhileClass};
use super::policy::CasePolicy;
use super::{BoundExpr, Case, CaseCost, CostExpr, ProcedureAnalysis};

/// Built-in operations treated as constant-time primitives.
const INTRINSICS: [&str; 12] = [
    "floor", "ceil", "sqrt", "abs", "min", "max", "length", "swap", "exchange", "print", "output",
    "read",
];

pub struct CostBuilder<'p> {
    program: &'p Program,
    proc: &'p Procedure,
    size: SizeModel,
    origins: HashMap<String, VarOrigin>,
    helpers: &'p HashMap<String, ProcedureAnalysis>,
    policy: &'p dyn CasePolicy,
    case: Case,
    notes: Vec<String>,
    loop_vars: Vec<String>,
}

impl<'p> CostBuilder<'p> {
    pub fn build(
        program: &'p Program,
        proc: &'p Procedure,
        helpers: &'p HashMap<String, ProcedureAnalysis>,
        policy: &'p dyn CasePolicy,
        case: Case,
    ) -> CaseCost {
        let size = SizeModel::for_procedure(program, proc);
        let origins = bounds::scan_origins(program, proc);
        let mut builder = CostBuilder {
            program,
            proc,
            size,
            origins,
            helpers,
            policy,
            case,
            notes: Vec::new(),
            loop_vars: Vec::new(),
        };
        let size_note = builder.size.note.clone();
        builder.note(size_note);
        let body = builder.block(&proc.body);
        CaseCost {
            expr: CostExpr::Sum(vec![CostExpr::Const(1), body]),
            notes: builder.notes,
        }
    }

    fn note(&mut self, text: String) {
        if !self.notes.contains(&text) {
            self.notes.push(text);
        }
    }

    fn block(&mut self, body: &[StatementId]) -> CostExpr {
        let parts: Vec<CostExpr> = body.iter().map(|&sid| self.statement(sid)).collect();
        if parts.is_empty() {
            CostExpr::Const(1)
        } else {
            CostExpr::Sum(parts)
        }
    }

    fn statement(&mut self, sid: StatementId) -> CostExpr {
        let program = self.program;
        match &program.statement(sid).node {
            StatementKind::Assign(a) => {
                let rhs = self.expr_cost(a.value);
                CostExpr::Sum(vec![CostExpr::Const(1), rhs])
            }
            StatementKind::Return(r) => {
                let value = match r.value {
                    Some(v) => self.expr_cost(v),
                    None => CostExpr::Const(0),
                };
                CostExpr::Sum(vec![CostExpr::Const(1), value])
            }
            StatementKind::Call(c) => {
                let call = self.call_cost(&c.name, &c.args);
                let mut parts = vec![CostExpr::Const(1), call];
                for &a in &c.args {
                    parts.push(self.expr_cost(a));
                }
                CostExpr::Sum(parts)
            }
            StatementKind::For(f) => {
                let (bound, note) = bounds::classify_for(program, f, &self.loop_vars);
                self.note(note);

                let mut parts = vec![self.expr_cost(f.start), self.expr_cost(f.end)];
                self.loop_vars.push(f.var.clone());
                parts.push(self.block(&f.body));
                self.loop_vars.pop();
                let per_iteration = CostExpr::Sum(parts);

                let early_exit = bounds::has_conditional_exit(program, &f.body);
                match (self.case, early_exit) {
                    (Case::Best, true) => {
                        let n = self.policy.early_exit_best();
                        self.note(n);
                        per_iteration
                    }
                    (Case::Average, true) => {
                        let n = self.policy.early_exit_average();
                        self.note(n);
                        CostExpr::Prod(vec![CostExpr::Bound(bound), per_iteration])
                    }
                    _ => CostExpr::Prod(vec![CostExpr::Bound(bound), per_iteration]),
                }
            }
            StatementKind::While(w) => {
                let class =
                    bounds::classify_while(program, w.condition, &w.body, &self.origins);
                let cond = self.expr_cost(w.condition);
                let body = self.block(&w.body);
                let per_iteration = CostExpr::Sum(vec![cond, body]);
                self.condition_loop(class, per_iteration, false)
            }
            StatementKind::Repeat(r) => {
                let class =
                    bounds::classify_while(program, r.condition, &r.body, &self.origins);
                let cond = self.expr_cost(r.condition);
                let body = self.block(&r.body);
                let per_iteration = CostExpr::Sum(vec![body, cond]);
                self.condition_loop(class, per_iteration, true)
            }
            StatementKind::If(i) => {
                let cond = self.expr_cost(i.condition);
                let then = self.block(&i.then_branch);
                let els = match &i.else_branch {
                    Some(b) => self.block(b),
                    None => CostExpr::Const(1),
                };
                let picked = self.pick_branch(then, els, i.else_branch.is_some());
                CostExpr::Sum(vec![cond, picked])
            }
            StatementKind::Empty => CostExpr::Const(1),
        }
    }

    /// Combines a condition-driven loop's per-iteration cost with its
    /// trip-count class.
    fn condition_loop(
        &mut self,
        class: WhileClass,
        per_iteration: CostExpr,
        at_least_once: bool,
    ) -> CostExpr {
        match class {
            WhileClass::Static { bound, note } => {
                self.note(note);
                CostExpr::Prod(vec![CostExpr::Bound(bound), per_iteration])
            }
            WhileClass::DataDependent { condition } => match self.case {
                Case::Worst => {
                    let n = self.policy.loop_worst(&condition);
                    self.note(n);
                    CostExpr::Prod(vec![CostExpr::Bound(BoundExpr::Linear), per_iteration])
                }
                Case::Best => {
                    let n = if at_least_once {
                        self.policy.repeat_best()
                    } else {
                        self.policy.loop_best()
                    };
                    self.note(n);
                    if at_least_once {
                        per_iteration
                    } else {
                        CostExpr::Const(1)
                    }
                }
                Case::Average => {
                    let n = self.policy.loop_average();
                    self.note(n);
                    CostExpr::Prod(vec![CostExpr::Bound(BoundExpr::Linear), per_iteration])
                }
            },
        }
    }

    /// Selects the branch cost for the current case. Branches containing a
    /// recursive call are never minimized away: the non-recursive side is
    /// the base-case guard, and reaching it still takes the full recursion
    /// depth.
    fn pick_branch(&mut self, then: CostExpr, els: CostExpr, has_else: bool) -> CostExpr {
        let then_recs = then.count_recs();
        let else_recs = els.count_recs();
        if then_recs > 0 || else_recs > 0 {
            return match self.case {
                Case::Worst | Case::Average => {
                    if else_recs > then_recs {
                        els
                    } else {
                        then
                    }
                }
                Case::Best => {
                    if then_recs == 0 {
                        els
                    } else if else_recs == 0 {
                        then
                    } else if else_recs < then_recs {
                        els
                    } else {
                        then
                    }
                }
            };
        }
        match self.case {
            Case::Worst => CostExpr::Max(Box::new(then), Box::new(els)),
            Case::Best => CostExpr::Min(Box::new(then), Box::new(els)),
            Case::Average => {
                if has_else {
                    let n = self.policy.branch_average();
                    self.note(n);
                }
                CostExpr::Max(Box::new(then), Box::new(els))
            }
        }
    }

    /// Cost of all call expressions nested anywhere in the expression.
    fn expr_cost(&mut self, id: ExpressionId) -> CostExpr {
        let mut parts = Vec::new();
        self.collect_expr_calls(id, &mut parts);
        match parts.len() {
            0 => CostExpr::Const(0),
            1 => parts.into_iter().next().unwrap_or(CostExpr::Const(0)),
            _ => CostExpr::Sum(parts),
        }
    }

    fn collect_expr_calls(&mut self, id: ExpressionId, out: &mut Vec<CostExpr>) {
        let program = self.program;
        match &program.expression(id).node {
            ExpressionKind::Call { name, args } => {
                out.push(self.call_cost(name, args));
                for &a in args {
                    self.collect_expr_calls(a, out);
                }
            }
            ExpressionKind::ArrayAccess { indexes, .. } => {
                for &i in indexes {
                    self.collect_expr_calls(i, out);
                }
            }
            ExpressionKind::UnaryOp { expr, .. } => self.collect_expr_calls(*expr, out),
            ExpressionKind::BinaryOp { left, right, .. } => {
                self.collect_expr_calls(*left, out);
                self.collect_expr_calls(*right, out);
            }
            _ => {}
        }
    }

    fn call_cost(&mut self, name: &str, args: &[ExpressionId]) -> CostExpr {
        let program = self.program;
        if name == self.proc.name {
            let reduction = bounds::extract_reduction(program, self.proc, args, &self.origins);
            let rendered: Vec<String> = args.iter().map(|&a| program.expr_to_string(a)).collect();
            self.note(format!(
                "recursive call {}({}) sets up a recurrence",
                name,
                rendered.join(", ")
            ));
            return CostExpr::Rec(reduction);
        }
        if let Some(sub) = self.helpers.get(name) {
            let growth = match self.case {
                Case::Best => sub.best.clone(),
                Case::Worst => sub.worst.clone(),
                Case::Average => sub.average.clone(),
            };
            self.note(format!("each call to {} costs O({})", name, sub.worst));
            return CostExpr::Solved(growth);
        }
        if INTRINSICS.iter().any(|i| i.eq_ignore_ascii_case(name)) {
            return CostExpr::Const(1);
        }
        self.note(format!(
            "treating the call to undeclared procedure '{}' as O(1)",
            name
        ));
        CostExpr::Const(1)
    }
}
