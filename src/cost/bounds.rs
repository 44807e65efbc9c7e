//! Symbolic bound extraction.
//!
//! Everything here answers one of three questions about a procedure body:
//! what the problem size is, how many times a loop runs as a function of that
//! size, and how a recursive call's arguments shrink it. The answers are
//! heuristic pattern matches over the AST; each carries the note text that
//! records the deduction in the reasoning trace.

use std::collections::HashMap;

use crate::ast::{
    BinaryOp, ExpressionId, ExpressionKind, ForStatement, Procedure, Program, Statement,
    StatementId, StatementKind,
};

use super::{BoundExpr, Reduction};

/// How the problem size `n` is read off the parameter list.
#[derive(Debug, Clone)]
pub enum SizeKind {
    /// A single scalar parameter carries the size.
    Param(String),
    /// A pair of index parameters; the size is the width of the range.
    Range { lo: String, hi: String },
    /// No usable parameter; `n` stands for the input size abstractly.
    Anonymous,
}

#[derive(Debug, Clone)]
pub struct SizeModel {
    pub kind: SizeKind,
    pub note: String,
}

const RANGE_PAIRS: [(&str, &str); 8] = [
    ("lo", "hi"),
    ("low", "high"),
    ("left", "right"),
    ("l", "r"),
    ("p", "r"),
    ("first", "last"),
    ("start", "end"),
    ("begin", "end"),
];

impl SizeModel {
    pub fn for_procedure(program: &Program, proc: &Procedure) -> SizeModel {
        let names: Vec<String> = proc
            .parameters
            .iter()
            .map(|&p| program.parameter(p).name.clone())
            .collect();

        if let Some(n) = names.iter().find(|p| p.eq_ignore_ascii_case("n")) {
            return SizeModel {
                kind: SizeKind::Param(n.clone()),
                note: format!("using parameter '{}' as the problem size n", n),
            };
        }

        for (a, b) in RANGE_PAIRS {
            let lo = names.iter().find(|p| p.eq_ignore_ascii_case(a));
            let hi = names.iter().find(|p| p.eq_ignore_ascii_case(b));
            if let (Some(lo), Some(hi)) = (lo, hi) {
                return SizeModel {
                    kind: SizeKind::Range {
                        lo: lo.clone(),
                        hi: hi.clone(),
                    },
                    note: format!(
                        "using the index range {}..{} as the problem size, n = {} - {} + 1",
                        lo, hi, hi, lo
                    ),
                };
            }
        }

        if let Some(last) = names.last() {
            return SizeModel {
                kind: SizeKind::Param(last.clone()),
                note: format!("using parameter '{}' as the problem size n", last),
            };
        }

        SizeModel {
            kind: SizeKind::Anonymous,
            note: "no parameters; treating the input size as n".to_string(),
        }
    }
}

/// What a local variable's assignments say about the values flowing into it.
/// A single flat scan plus one propagation pass; good enough to recognize
/// midpoints (`mid <- (lo + hi) / 2`), heap child indexes (`l <- 2 * i`) and
/// pivot positions returned by calls (`q <- Partition(A, p, r)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarOrigin {
    Halved,
    Doubled,
    FromCall,
    Other,
}

pub fn scan_origins(program: &Program, proc: &Procedure) -> HashMap<String, VarOrigin> {
    let mut origins: HashMap<String, VarOrigin> = HashMap::new();

    let mut assigns: Vec<(String, ExpressionId)> = Vec::new();
    visit_statements(program, &proc.body, &mut |s| {
        if let StatementKind::Assign(a) = &s.node {
            if a.target.indexes.is_empty() {
                assigns.push((a.target.name.clone(), a.value));
            }
        }
    });

    for (name, value) in &assigns {
        let origin = match &program.expression(*value).node {
            ExpressionKind::Call { .. } => VarOrigin::FromCall,
            _ if expr_div_by_const(program, *value).is_some() => VarOrigin::Halved,
            _ if expr_mul_by_const(program, *value) => VarOrigin::Doubled,
            _ => VarOrigin::Other,
        };
        merge_origin(&mut origins, name, origin);
    }

    // One propagation pass: an assignment whose right-hand side mentions a
    // halved or doubled variable inherits that origin (`left <- mid + 1`).
    for (name, value) in &assigns {
        if origins.get(name) != Some(&VarOrigin::Other) {
            continue;
        }
        let mut mentioned = Vec::new();
        program.expr_idents(*value, &mut mentioned);
        for m in &mentioned {
            if m == name {
                continue;
            }
            match origins.get(m) {
                Some(VarOrigin::Halved) => {
                    origins.insert(name.clone(), VarOrigin::Halved);
                    break;
                }
                Some(VarOrigin::Doubled) => {
                    origins.insert(name.clone(), VarOrigin::Doubled);
                    break;
                }
                _ => {}
            }
        }
    }

    origins
}

fn merge_origin(origins: &mut HashMap<String, VarOrigin>, name: &str, origin: VarOrigin) {
    let current = origins.get(name).copied();
    let keep = match (current, origin) {
        (None, o) => o,
        (Some(VarOrigin::Other), o) => o,
        (Some(c), VarOrigin::Other) => c,
        (Some(c), _) => c,
    };
    origins.insert(name.to_string(), keep);
}

/// Walks a statement list depth-first, visiting every nested statement.
pub fn visit_statements<'a>(
    program: &'a Program,
    body: &[StatementId],
    f: &mut dyn FnMut(&'a Statement),
) {
    for &sid in body {
        let s = program.statement(sid);
        f(s);
        match &s.node {
            StatementKind::For(x) => visit_statements(program, &x.body, f),
            StatementKind::While(x) => visit_statements(program, &x.body, f),
            StatementKind::Repeat(x) => visit_statements(program, &x.body, f),
            StatementKind::If(x) => {
                visit_statements(program, &x.then_branch, f);
                if let Some(e) = &x.else_branch {
                    visit_statements(program, e, f);
                }
            }
            _ => {}
        }
    }
}

/// Every procedure name invoked from the body, statement position or
/// expression position, in first-appearance order.
pub fn collect_callees(program: &Program, proc: &Procedure) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut exprs: Vec<ExpressionId> = Vec::new();
    visit_statements(program, &proc.body, &mut |s| match &s.node {
        StatementKind::Assign(a) => exprs.push(a.value),
        StatementKind::For(x) => {
            exprs.push(x.start);
            exprs.push(x.end);
            if let Some(step) = x.step {
                exprs.push(step);
            }
        }
        StatementKind::While(x) => exprs.push(x.condition),
        StatementKind::Repeat(x) => exprs.push(x.condition),
        StatementKind::If(x) => exprs.push(x.condition),
        StatementKind::Call(c) => {
            if !out.contains(&c.name) {
                out.push(c.name.clone());
            }
            exprs.extend(c.args.iter().copied());
        }
        StatementKind::Return(r) => {
            if let Some(v) = r.value {
                exprs.push(v);
            }
        }
        StatementKind::Empty => {}
    });
    for e in exprs {
        expr_calls(program, e, &mut out);
    }
    out
}

fn expr_calls(program: &Program, id: ExpressionId, out: &mut Vec<String>) {
    match &program.expression(id).node {
        ExpressionKind::Call { name, args } => {
            if !out.contains(name) {
                out.push(name.clone());
            }
            for &a in args {
                expr_calls(program, a, out);
            }
        }
        ExpressionKind::ArrayAccess { indexes, .. } => {
            for &i in indexes {
                expr_calls(program, i, out);
            }
        }
        ExpressionKind::UnaryOp { expr, .. } => expr_calls(program, *expr, out),
        ExpressionKind::BinaryOp { left, right, .. } => {
            expr_calls(program, *left, out);
            expr_calls(program, *right, out);
        }
        _ => {}
    }
}

/// Trip-count class of a counted `FOR` loop, with its trace note.
pub fn classify_for(
    program: &Program,
    f: &ForStatement,
    loop_vars: &[String],
) -> (BoundExpr, String) {
    let start_txt = program.expr_to_string(f.start);
    let end_txt = program.expr_to_string(f.end);

    let start_num = expr_number(program, f.start);
    let end_num = expr_number(program, f.end);
    if let (Some(a), Some(b)) = (start_num, end_num) {
        // Bounds too far apart to count overflow; fall through to the
        // linear class below.
        if let Some(diff) = b.checked_sub(a) {
            let iters = diff.unsigned_abs() + 1;
            return (
                BoundExpr::Const(iters),
                format!(
                    "loop from {} to {} runs a constant number of times",
                    start_txt, end_txt
                ),
            );
        }
    }

    if expr_calls_name(program, f.end, "sqrt") || expr_calls_name(program, f.start, "sqrt") {
        return (
            BoundExpr::Sqrt,
            format!(
                "loop bound {} grows like the square root of the input, so the loop runs O(sqrt(n)) times",
                end_txt
            ),
        );
    }

    if loop_vars
        .iter()
        .any(|v| program.expr_mentions(f.end, v) || program.expr_mentions(f.start, v))
    {
        return (
            BoundExpr::Linear,
            format!(
                "loop bound {} depends on an outer loop variable; over all outer iterations this still contributes a linear factor",
                end_txt
            ),
        );
    }

    (
        BoundExpr::Linear,
        format!("loop from {} to {} runs O(n) times", start_txt, end_txt),
    )
}

/// Trip-count class of a condition-driven loop (`WHILE`, `REPEAT`).
#[derive(Debug, Clone)]
pub enum WhileClass {
    /// The trip count follows from how the loop variable is updated; the
    /// bound is the same in every case.
    Static { bound: BoundExpr, note: String },
    /// The trip count depends on data values; a policy assumption is needed.
    DataDependent { condition: String },
}

pub fn classify_while(
    program: &Program,
    condition: ExpressionId,
    body: &[StatementId],
    origins: &HashMap<String, VarOrigin>,
) -> WhileClass {
    let mut cond_vars = Vec::new();
    program.expr_idents(condition, &mut cond_vars);
    let cond_opaque = expr_has_array_or_call(program, condition);

    let mut scaled = false;
    let mut modded = false;
    let mut counting = false;
    let mut opaque_update = false;
    visit_statements(program, body, &mut |s| {
        if let StatementKind::Assign(a) = &s.node {
            if !a.target.indexes.is_empty() || !cond_vars.contains(&a.target.name) {
                return;
            }
            if is_scaling_update(program, &a.target.name, a.value, origins) {
                scaled = true;
            } else if expr_has_op(program, a.value, BinaryOp::Mod) {
                modded = true;
            } else if is_counting_update(program, &a.target.name, a.value) {
                counting = true;
            } else {
                opaque_update = true;
            }
        }
    });

    if scaled {
        return WhileClass::Static {
            bound: BoundExpr::Log,
            note: "the loop variable is rescaled by a constant factor each iteration, so the loop runs O(log n) times".to_string(),
        };
    }
    if modded {
        return WhileClass::Static {
            bound: BoundExpr::Log,
            note: "a modulo update at least halves its operand every two iterations, so the loop runs O(log n) times".to_string(),
        };
    }
    if counting && !cond_opaque && !opaque_update {
        return WhileClass::Static {
            bound: BoundExpr::Linear,
            note: "the loop variable moves by a constant step toward the bound, so the loop runs O(n) times".to_string(),
        };
    }
    WhileClass::DataDependent {
        condition: program.expr_to_string(condition),
    }
}

/// A variable update that rescales the variable: `v <- v / 2`, `v <- 2 * v`,
/// or an assignment reached from a halved or doubled midpoint variable.
fn is_scaling_update(
    program: &Program,
    var: &str,
    rhs: ExpressionId,
    origins: &HashMap<String, VarOrigin>,
) -> bool {
    if expr_div_by_const(program, rhs).is_some() && program.expr_mentions(rhs, var) {
        return true;
    }
    if expr_mul_by_const(program, rhs) && program.expr_mentions(rhs, var) {
        return true;
    }
    let mut ids = Vec::new();
    program.expr_idents(rhs, &mut ids);
    ids.iter().any(|v| {
        v != var
            && matches!(
                origins.get(v.as_str()),
                Some(VarOrigin::Halved) | Some(VarOrigin::Doubled)
            )
    })
}

/// `v <- v + c` or `v <- v - c` with a literal step.
fn is_counting_update(program: &Program, var: &str, rhs: ExpressionId) -> bool {
    if let ExpressionKind::BinaryOp { left, op, right } = &program.expression(rhs).node {
        if !matches!(op, BinaryOp::Add | BinaryOp::Sub) {
            return false;
        }
        let l_is_var = matches!(&program.expression(*left).node,
            ExpressionKind::Ident(n) if n == var);
        let r_is_var = matches!(&program.expression(*right).node,
            ExpressionKind::Ident(n) if n == var);
        let l_is_num = expr_number(program, *left).is_some();
        let r_is_num = expr_number(program, *right).is_some();
        return (l_is_var && r_is_num) || (r_is_var && l_is_num && *op == BinaryOp::Add);
    }
    false
}

/// Does any nested `IF` branch inside the body reach a `RETURN`?
pub fn has_conditional_exit(program: &Program, body: &[StatementId]) -> bool {
    let mut found = false;
    visit_statements(program, body, &mut |s| {
        if let StatementKind::If(i) = &s.node {
            if branch_returns(program, &i.then_branch)
                || i.else_branch
                    .as_ref()
                    .map_or(false, |e| branch_returns(program, e))
            {
                found = true;
            }
        }
    });
    found
}

fn branch_returns(program: &Program, body: &[StatementId]) -> bool {
    let mut found = false;
    visit_statements(program, body, &mut |s| {
        if matches!(s.node, StatementKind::Return(_)) {
            found = true;
        }
    });
    found
}

/// How a recursive call shrinks the problem, judged from its argument list.
/// Each argument is classified independently; the strongest signal wins.
pub fn extract_reduction(
    program: &Program,
    proc: &Procedure,
    args: &[ExpressionId],
    origins: &HashMap<String, VarOrigin>,
) -> Reduction {
    let params: Vec<String> = proc
        .parameters
        .iter()
        .map(|&p| program.parameter(p).name.clone())
        .collect();

    let mut best = Reduction::Same;
    for &arg in args {
        let r = classify_argument(program, &params, arg, origins);
        if r.strength() > best.strength() {
            best = r;
        }
    }
    best
}

fn classify_argument(
    program: &Program,
    params: &[String],
    arg: ExpressionId,
    origins: &HashMap<String, VarOrigin>,
) -> Reduction {
    if expr_has_op(program, arg, BinaryOp::Mod) {
        return Reduction::EuclidMod;
    }
    if let Some(c) = expr_div_by_const(program, arg) {
        return Reduction::Div(c);
    }

    let mut ids = Vec::new();
    program.expr_idents(arg, &mut ids);
    if ids
        .iter()
        .any(|v| origins.get(v.as_str()) == Some(&VarOrigin::Halved))
    {
        return Reduction::Div(2);
    }

    if let ExpressionKind::BinaryOp { left, op, right } = &program.expression(arg).node {
        if *op == BinaryOp::Sub {
            let l_is_param = matches!(&program.expression(*left).node,
                ExpressionKind::Ident(n) if params.contains(n));
            if l_is_param {
                if let Some(c) = expr_number(program, *right) {
                    if c > 0 {
                        return Reduction::Sub(c as u64);
                    }
                }
            }
        }
    }

    if ids
        .iter()
        .any(|v| origins.get(v.as_str()) == Some(&VarOrigin::FromCall))
    {
        return Reduction::DataDependent;
    }

    match &program.expression(arg).node {
        ExpressionKind::Number(_) => Reduction::Same,
        ExpressionKind::Ident(n) if params.contains(n) => Reduction::Same,
        ExpressionKind::ArrayAccess { .. } => Reduction::Same,
        _ => Reduction::Unknown,
    }
}

pub fn expr_number(program: &Program, id: ExpressionId) -> Option<i64> {
    match &program.expression(id).node {
        ExpressionKind::Number(v) => Some(*v),
        ExpressionKind::UnaryOp {
            op: crate::ast::UnaryOp::Neg,
            expr,
        } => expr_number(program, *expr).map(|v| -v),
        _ => None,
    }
}

/// Is there a division by a literal constant >= 2 anywhere in the expression?
pub fn expr_div_by_const(program: &Program, id: ExpressionId) -> Option<u64> {
    match &program.expression(id).node {
        ExpressionKind::BinaryOp { left, op, right } => {
            if *op == BinaryOp::Div {
                if let Some(c) = expr_number(program, *right) {
                    if c >= 2 {
                        return Some(c as u64);
                    }
                }
            }
            expr_div_by_const(program, *left).or_else(|| expr_div_by_const(program, *right))
        }
        ExpressionKind::UnaryOp { expr, .. } => expr_div_by_const(program, *expr),
        _ => None,
    }
}

/// Is there a multiplication by a literal constant >= 2 anywhere?
pub fn expr_mul_by_const(program: &Program, id: ExpressionId) -> bool {
    match &program.expression(id).node {
        ExpressionKind::BinaryOp { left, op, right } => {
            if *op == BinaryOp::Mul {
                let lc = expr_number(program, *left).map_or(false, |c| c >= 2);
                let rc = expr_number(program, *right).map_or(false, |c| c >= 2);
                if lc || rc {
                    return true;
                }
            }
            expr_mul_by_const(program, *left) || expr_mul_by_const(program, *right)
        }
        ExpressionKind::UnaryOp { expr, .. } => expr_mul_by_const(program, *expr),
        _ => false,
    }
}

pub fn expr_has_op(program: &Program, id: ExpressionId, wanted: BinaryOp) -> bool {
    match &program.expression(id).node {
        ExpressionKind::BinaryOp { left, op, right } => {
            *op == wanted
                || expr_has_op(program, *left, wanted)
                || expr_has_op(program, *right, wanted)
        }
        ExpressionKind::UnaryOp { expr, .. } => expr_has_op(program, *expr, wanted),
        ExpressionKind::Call { args, .. } => {
            args.iter().any(|&a| expr_has_op(program, a, wanted))
        }
        ExpressionKind::ArrayAccess { indexes, .. } => {
            indexes.iter().any(|&i| expr_has_op(program, i, wanted))
        }
        _ => false,
    }
}

pub fn expr_has_array_or_call(program: &Program, id: ExpressionId) -> bool {
    match &program.expression(id).node {
        ExpressionKind::ArrayAccess { .. } | ExpressionKind::Call { .. } => true,
        ExpressionKind::UnaryOp { expr, .. } => expr_has_array_or_call(program, *expr),
        ExpressionKind::BinaryOp { left, right, .. } => {
            expr_has_array_or_call(program, *left) || expr_has_array_or_call(program, *right)
        }
        _ => false,
    }
}

pub fn expr_calls_name(program: &Program, id: ExpressionId, name: &str) -> bool {
    match &program.expression(id).node {
        ExpressionKind::Call { name: n, args } => {
            n.eq_ignore_ascii_case(name) || args.iter().any(|&a| expr_calls_name(program, a, name))
        }
        ExpressionKind::ArrayAccess { indexes, .. } => {
            indexes.iter().any(|&i| expr_calls_name(program, i, name))
        }
        ExpressionKind::UnaryOp { expr, .. } => expr_calls_name(program, *expr, name),
        ExpressionKind::BinaryOp { left, right, .. } => {
            expr_calls_name(program, *left, name) || expr_calls_name(program, *right, name)
        }
        _ => false,
    }
}
