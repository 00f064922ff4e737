//! AST node types produced by the parser and walked by the interpreter.

use crate::basic::value::Value;
use crate::error::SourcePos;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntegerLit(i64),
    NumberLit(f64),
    StringLit(String),
    Var(String),
    /// `name(args)` — ambiguous between array subscript, builtin, and
    /// user-defined `FN` until the evaluator resolves `name` at run time.
    Call(String, Vec<Expr>),
    Unary(UnaryOp, Box<Expr>, SourcePos),
    Binary(BinaryOp, Box<Expr>, Box<Expr>, SourcePos),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LValue {
    pub name: String,
    pub indices: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSep {
    Semicolon,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintItem {
    pub expr: Expr,
    pub trailing_sep: Option<PrintSep>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LValue, Expr),
    Print(Vec<PrintItem>),
    Input {
        prompt: Option<String>,
        targets: Vec<LValue>,
    },
    IfThen {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    IfBlockStart(Expr),
    ElseBlock,
    EndIfBlock,
    For {
        var: String,
        from: Expr,
        to: Expr,
        step: Option<Expr>,
    },
    Next(Option<String>),
    While(Expr),
    Wend,
    Do,
    LoopWhile(Expr),
    LoopUntil(Expr),
    LoopForever,
    Goto(u32),
    Gosub(u32),
    Return,
    OnGoto(Expr, Vec<u32>),
    OnGosub(Expr, Vec<u32>),
    Dim(Vec<(String, Vec<Expr>)>),
    Read(Vec<LValue>),
    Data(Vec<Value>),
    Restore(Option<u32>),
    DefFn {
        name: String,
        params: Vec<String>,
        body: Expr,
    },
    Sys(Expr),
    Rem,
    End,
    Stop,
}

/// A parsed program: line number -> the statements on that line, in the
/// order the line-numbered source declared them.
pub type Program = BTreeMap<u32, Vec<Stmt>>;
