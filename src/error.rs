//! Error kinds shared by the memory manager, CPU core, and BASIC interpreter.
//!
//! Every fallible operation in this crate returns `Result<T, EngineError>`.
//! Variants map one-to-one onto the error-kind table in the BASIC language
//! reference this core implements; `Display` renders the historical error
//! banners (`?SYNTAX ERROR IN nn`, `?OUT OF DATA`, ...).

use std::fmt;

/// Source position for tokenizer/parser errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("?SYNTAX ERROR IN {line}: expected {expected}, got {got}")]
    SyntaxError {
        line: u32,
        column: u32,
        expected: String,
        got: String,
    },

    #[error("unterminated string literal at line {line}, column {column}")]
    UnterminatedString { line: u32, column: u32 },

    #[error("unknown opcode ${opcode:02X} at ${addr:04X}")]
    UnknownOpcode { opcode: u8, addr: u16 },

    #[error("access denied: {op} at ${addr:04X} ({reason})")]
    AccessDenied {
        addr: u16,
        op: AccessKind,
        reason: &'static str,
    },

    #[error("invalid address ${0:X}")]
    InvalidAddress(u32),

    #[error("invalid byte value {0}")]
    InvalidValue(i64),

    #[error("invalid length {0}")]
    InvalidLength(i64),

    #[error("unknown memory bank '{0}'")]
    UnknownBank(String),

    #[error("bank '{0}' already exists")]
    DuplicateBank(String),

    #[error("cannot remove the primary or currently-selected bank '{0}'")]
    BankInUse(String),

    #[error("?UNDEFINED STATEMENT ERROR IN {0}")]
    UndefinedLine(u32),

    #[error("?RETURN WITHOUT GOSUB ERROR")]
    ReturnWithoutGosub,

    #[error("?NEXT WITHOUT FOR ERROR")]
    NextWithoutFor { var: Option<String> },

    #[error("?TYPE MISMATCH ERROR{}", pos_suffix(.0))]
    TypeMismatch(Option<SourcePos>),

    #[error("?DIVISION BY ZERO ERROR")]
    DivisionByZero,

    #[error("?ILLEGAL FUNCTION CALL ERROR")]
    IllegalFunctionCall,

    #[error("?OUT OF DATA ERROR")]
    OutOfData,

    #[error("?OUT OF MEMORY ERROR")]
    OutOfMemory,

    #[error("?OUT OF FOR/GOSUB STACK SPACE ERROR")]
    StackOverflow,

    #[error("?SUBSCRIPT OUT OF RANGE ERROR")]
    SubscriptOutOfRange,

    #[error("?REDIM'D ARRAY ERROR")]
    RedimensionedArray(String),

    #[error("interrupted")]
    Interrupted,

    #[error("?CPU FAULT: {0}")]
    CpuFault(Box<EngineError>),
}

fn pos_suffix(pos: &Option<SourcePos>) -> String {
    match pos {
        Some(p) => format!(" IN {}", p.line),
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Read => write!(f, "read"),
            AccessKind::Write => write!(f, "write"),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
