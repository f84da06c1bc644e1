pub mod token;
pub mod operators;
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod value;
pub mod environment;
pub mod error;
pub mod interpreter;

pub use error::{Error, ErrorKind, Result};
pub use ast::AstNode;
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_source, Parser};
pub use value::Value;
pub use environment::Environment;
pub use interpreter::{evaluate, Interpreter};
