//! Abstract syntax tree for the pseudocode dialect.
//!
//! The AST is arena-based: every procedure, statement and expression lives in
//! an `id_arena::Arena` owned by [`Program`], and nodes reference each other
//! through typed ids. Procedures are collected in declaration order and keyed
//! by name in `procedure_map`, which is the first of the two resolution
//! passes; the cost builder performs the second pass over that map so that
//! forward references between procedures never require recursive descent.

use id_arena::{Arena, Id};
use std::collections::HashMap;

mod builder;
pub mod errors;
mod preprocess;

pub use builder::parse_program;
pub use errors::{format_errors, AnalyzeError, Results, SpannedError};
pub use preprocess::normalize_source;

/// A span in the source code with start and end byte offsets, line, and column.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn from_pest(span: pest::Span) -> Self {
        let (line, column) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }
}

pub type ProcedureId = Id<Procedure>;
pub type ParameterId = Id<ParameterDecl>;
pub type StatementId = Id<Statement>;
pub type ExpressionId = Id<Expression>;

#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

pub type Statement = Spanned<StatementKind>;
pub type Expression = Spanned<ExpressionKind>;

/// The parsed program: arena storage plus declaration-order roots and a
/// by-name lookup map for call resolution.
#[derive(Debug)]
pub struct Program {
    pub procedures: Arena<Procedure>,
    pub parameters: Arena<ParameterDecl>,
    pub statements: Arena<Statement>,
    pub expressions: Arena<Expression>,

    pub root_procedures: Vec<ProcedureId>,
    pub procedure_map: HashMap<String, ProcedureId>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            procedures: Arena::new(),
            parameters: Arena::new(),
            statements: Arena::new(),
            expressions: Arena::new(),
            root_procedures: Vec::new(),
            procedure_map: HashMap::new(),
        }
    }

    pub fn procedure(&self, id: ProcedureId) -> &Procedure {
        &self.procedures[id]
    }

    pub fn statement(&self, id: StatementId) -> &Statement {
        &self.statements[id]
    }

    pub fn expression(&self, id: ExpressionId) -> &Expression {
        &self.expressions[id]
    }

    pub fn parameter(&self, id: ParameterId) -> &ParameterDecl {
        &self.parameters[id]
    }

    /// Does the expression mention `name` as an identifier or array base?
    pub fn expr_mentions(&self, id: ExpressionId, name: &str) -> bool {
        match &self.expression(id).node {
            ExpressionKind::Ident(n) => n == name,
            ExpressionKind::Number(_) => false,
            ExpressionKind::ArrayAccess { array, indexes } => {
                array == name || indexes.iter().any(|&i| self.expr_mentions(i, name))
            }
            ExpressionKind::Call { args, .. } => {
                args.iter().any(|&a| self.expr_mentions(a, name))
            }
            ExpressionKind::UnaryOp { expr, .. } => self.expr_mentions(*expr, name),
            ExpressionKind::BinaryOp { left, right, .. } => {
                self.expr_mentions(*left, name) || self.expr_mentions(*right, name)
            }
        }
    }

    /// All identifiers mentioned by the expression, in source order.
    pub fn expr_idents(&self, id: ExpressionId, out: &mut Vec<String>) {
        match &self.expression(id).node {
            ExpressionKind::Ident(n) => {
                if !out.contains(n) {
                    out.push(n.clone());
                }
            }
            ExpressionKind::Number(_) => {}
            ExpressionKind::ArrayAccess { array, indexes } => {
                if !out.contains(array) {
                    out.push(array.clone());
                }
                for &i in indexes {
                    self.expr_idents(i, out);
                }
            }
            ExpressionKind::Call { args, .. } => {
                for &a in args {
                    self.expr_idents(a, out);
                }
            }
            ExpressionKind::UnaryOp { expr, .. } => self.expr_idents(*expr, out),
            ExpressionKind::BinaryOp { left, right, .. } => {
                self.expr_idents(*left, out);
                self.expr_idents(*right, out);
            }
        }
    }

    /// Renders an expression back to source-like text, for reasoning traces.
    pub fn expr_to_string(&self, id: ExpressionId) -> String {
        match &self.expression(id).node {
            ExpressionKind::Ident(n) => n.clone(),
            ExpressionKind::Number(v) => v.to_string(),
            ExpressionKind::ArrayAccess { array, indexes } => {
                let idx: Vec<String> = indexes
                    .iter()
                    .map(|&i| format!("[{}]", self.expr_to_string(i)))
                    .collect();
                format!("{}{}", array, idx.join(""))
            }
            ExpressionKind::Call { name, args } => {
                let a: Vec<String> = args.iter().map(|&x| self.expr_to_string(x)).collect();
                format!("{}({})", name, a.join(", "))
            }
            ExpressionKind::UnaryOp { op, expr } => {
                let inner = self.expr_to_string(*expr);
                match op {
                    UnaryOp::Neg => format!("-{}", inner),
                    UnaryOp::Not => format!("not {}", inner),
                }
            }
            ExpressionKind::BinaryOp { left, op, right } => format!(
                "{} {} {}",
                self.expr_to_string(*left),
                op.symbol(),
                self.expr_to_string(*right)
            ),
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Procedure {
    pub name: String,
    pub parameters: Vec<ParameterId>,
    pub body: Vec<StatementId>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    Assign(AssignStatement),
    For(ForStatement),
    While(WhileStatement),
    Repeat(RepeatStatement),
    If(IfStatement),
    Call(CallStatement),
    Return(ReturnStatement),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    pub target: LValue,
    pub value: ExpressionId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LValue {
    pub name: String,
    pub indexes: Vec<ExpressionId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub var: String,
    pub start: ExpressionId,
    pub end: ExpressionId,
    pub step: Option<ExpressionId>,
    pub body: Vec<StatementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: ExpressionId,
    pub body: Vec<StatementId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub body: Vec<StatementId>,
    pub condition: ExpressionId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: ExpressionId,
    pub then_branch: Vec<StatementId>,
    pub else_branch: Option<Vec<StatementId>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallStatement {
    pub name: String,
    pub args: Vec<ExpressionId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<ExpressionId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Ident(String),
    Number(i64),
    ArrayAccess {
        array: String,
        indexes: Vec<ExpressionId>,
    },
    Call {
        name: String,
        args: Vec<ExpressionId>,
    },
    UnaryOp {
        op: UnaryOp,
        expr: ExpressionId,
    },
    BinaryOp {
        left: ExpressionId,
        op: BinaryOp,
        right: ExpressionId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "mod",
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}
