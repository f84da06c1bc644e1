use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexer,
    Parser,
    DuplicateDeclaration,
    ConstReassignment,
    UndefinedVariable,
    TypeMismatch,
    UndefinedProperty,
    Native,
}

impl ErrorKind {
    /// Lexer and parser failures are bad input, everything else happened while running.
    pub fn is_runtime(&self) -> bool {
        !matches!(self, ErrorKind::Lexer | ErrorKind::Parser)
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_runtime() { 70 } else { 65 }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexer => write!(f, "LexError"),
            ErrorKind::Parser => write!(f, "ParseError"),
            ErrorKind::DuplicateDeclaration => write!(f, "DuplicateDeclaration"),
            ErrorKind::ConstReassignment => write!(f, "ConstReassignment"),
            ErrorKind::UndefinedVariable => write!(f, "UndefinedVariable"),
            ErrorKind::TypeMismatch => write!(f, "TypeMismatch"),
            ErrorKind::UndefinedProperty => write!(f, "UndefinedProperty"),
            ErrorKind::Native => write!(f, "NativeError"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
            line: None,
            column: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.line, &self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{}: {} (line {}, column {})", self.kind, self.message, line, column)
            }
            (Some(line), None) => {
                write!(f, "{}: {} (line {})", self.kind, self.message, line)
            }
            _ => {
                write!(f, "{}: {}", self.kind, self.message)
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! lexer_error {
    ($msg:expr, $line:expr, $col:expr) => {
        Err($crate::language::error::Error {
            kind: $crate::language::error::ErrorKind::Lexer,
            message: $msg.to_string(),
            line: Some($line),
            column: Some($col),
        })
    };
}

#[macro_export]
macro_rules! parser_error {
    ($msg:expr, $line:expr, $col:expr) => {
        Err($crate::language::error::Error {
            kind: $crate::language::error::ErrorKind::Parser,
            message: $msg.to_string(),
            line: Some($line),
            column: Some($col),
        })
    };
}

#[macro_export]
macro_rules! runtime_error {
    ($kind:ident, $msg:expr) => {
        Err($crate::language::error::Error {
            kind: $crate::language::error::ErrorKind::$kind,
            message: $msg.to_string(),
            line: None,
            column: None,
        })
    };
}
