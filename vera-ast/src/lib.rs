#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use miette::SourceSpan;

pub type Span = SourceSpan;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spanned<T> {
    pub span: Span,
    pub node: T,
}

impl<T> Spanned<T> {
    pub fn new(span: Span, node: T) -> Self {
        Self { span, node }
    }
}

pub fn span(start: usize, len: usize) -> Span {
    SourceSpan::new(start.into(), len)
}

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    span(start, end - start)
}

pub type Ident = Spanned<String>;

/// A fully parsed program, immutable once constructed: an ordered command
/// sequence, the set of variables bound from `input()`, and the single
/// post-condition checked at the end of every path.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub commands: Vec<Command>,
    pub inputs: BTreeSet<String>,
    pub post: Comparison,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Assign(Assignment),
    If(IfCommand),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub span: Span,
    pub lhs: Ident,
    pub rhs: Expr,
}

/// `if (condition) { body }`. The body holds only assignments; it runs on
/// the path where the condition is assumed to hold.
#[derive(Clone, Debug, PartialEq)]
pub struct IfCommand {
    pub span: Span,
    pub condition: Comparison,
    pub body: Vec<Assignment>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Var(Ident),
    /// A value supplied by an external caller, unknown at verification time.
    Input,
    Binary {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub span: Span,
    pub op: CmpOp,
    pub left: Expr,
    pub right: Expr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CmpOp {
    /// The logical opposite, used to construct the false branch of a fork.
    pub fn opposite(self) -> CmpOp {
        match self {
            CmpOp::Eq => CmpOp::Ne,
            CmpOp::Ne => CmpOp::Eq,
            CmpOp::Lt => CmpOp::Ge,
            CmpOp::Ge => CmpOp::Lt,
            CmpOp::Gt => CmpOp::Le,
            CmpOp::Le => CmpOp::Gt,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Int(n) => write!(f, "{n}"),
            ExprKind::Var(id) => f.write_str(&id.node),
            ExprKind::Input => f.write_str("input()"),
            ExprKind::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
