//! Abstract Syntax Tree types
//!
//! Nodes are immutable once built and shared through `Rc`, so routine and
//! process bodies are parsed once and executed any number of times.

pub use crate::runtime::literal::{Literal, LiteralKind};
use crate::util::span::Span;
use crate::util::Spanned;
use std::rc::Rc;

pub type ExprRef = Rc<Expr>;
pub type StmtRef = Rc<Stmt>;

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal, Span),
    Binary {
        op: BinOp,
        left: ExprRef,
        right: ExprRef,
        span: Span,
    },
    /// `and` / `or` / `xor`; both operands are always evaluated
    Logical {
        op: LogicalOp,
        left: ExprRef,
        right: ExprRef,
        span: Span,
    },
    /// `-x`, `!x`, `not x`, and prefix or postfix `++`/`--`.
    /// Increment and decrement operands are always `Expr::Variable`.
    Unary {
        op: UnOp,
        operand: ExprRef,
        prefix: bool,
        span: Span,
    },
    Grouping(ExprRef, Span),
    Variable(String, Span),
    Assign {
        name: String,
        value: ExprRef,
        span: Span,
    },
    /// Seconds since the interpreter started
    Now(Span),
    FunctionCall(Call),
    NativeCall(Call),
    ProcessCall(Call),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(_, span)
            | Expr::Grouping(_, span)
            | Expr::Variable(_, span)
            | Expr::Now(span) => *span,
            Expr::Binary { span, .. }
            | Expr::Logical { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Assign { span, .. } => *span,
            Expr::FunctionCall(call) | Expr::NativeCall(call) | Expr::ProcessCall(call) => call.span,
        }
    }

    pub fn line(&self) -> usize {
        self.span().line()
    }
}

/// A call site: callee name, ordered arguments and the arity to validate
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<ExprRef>,
    pub arity: usize,
    pub span: Span,
}

impl Call {
    pub fn new(
        name: String,
        args: Vec<ExprRef>,
        span: Span,
    ) -> Self {
        let arity = args.len();
        Self {
            name,
            args,
            arity,
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Xor,
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
            LogicalOp::Xor => "xor",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
    Inc,
    Dec,
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "!",
            UnOp::Inc => "++",
            UnOp::Dec => "--",
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(
        kind: StmtKind,
        span: Span,
    ) -> Self {
        Self { kind, span }
    }

    pub fn line(&self) -> usize {
        self.span.line()
    }
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(Vec<StmtRef>),
    Program(Program),
    VarDecl {
        ty: LiteralKind,
        names: Vec<Spanned<String>>,
        initializer: Option<ExprRef>,
    },
    Print(ExprRef),
    Expression(ExprRef),
    If {
        condition: ExprRef,
        then_branch: StmtRef,
        elif_branches: Vec<ElifBranch>,
        else_branch: Option<StmtRef>,
    },
    While {
        condition: ExprRef,
        body: StmtRef,
    },
    /// Body runs before the first condition check; stops once it holds
    Repeat {
        body: StmtRef,
        condition: ExprRef,
    },
    Loop(StmtRef),
    For {
        initializer: Option<StmtRef>,
        condition: Option<ExprRef>,
        step: Option<ExprRef>,
        body: StmtRef,
    },
    Switch {
        subject: ExprRef,
        cases: Vec<SwitchCase>,
        default: Option<StmtRef>,
    },
    Break,
    Continue,
    Return(Option<ExprRef>),
    ProcedureDecl(Rc<RoutineDecl>),
    FunctionDecl(Rc<RoutineDecl>),
    ProcessDecl(Rc<RoutineDecl>),
    ProcedureCall(Call),
}

/// `program NAME; <declarations> begin ... end.`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub declarations: Vec<StmtRef>,
    pub body: StmtRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElifBranch {
    pub condition: ExprRef,
    pub body: StmtRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub value: ExprRef,
    pub body: StmtRef,
}

/// Typed parameter with its per-type default literal
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: LiteralKind,
    pub default: Literal,
}

impl Param {
    pub fn new(
        name: String,
        ty: LiteralKind,
    ) -> Self {
        Self {
            name,
            ty,
            default: Literal::default_for(ty),
        }
    }
}

/// Procedure, function or process declaration
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDecl {
    pub name: String,
    pub params: Vec<Param>,
    /// Declared return type; functions only
    pub return_type: Option<LiteralKind>,
    pub body: StmtRef,
    pub span: Span,
}

impl RoutineDecl {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Top-level statements of the body (the body itself if not a block)
    pub fn body_statements(&self) -> Vec<StmtRef> {
        match &self.body.kind {
            StmtKind::Block(stmts) => stmts.clone(),
            _ => vec![Rc::clone(&self.body)],
        }
    }
}
