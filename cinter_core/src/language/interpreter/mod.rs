mod evaluator;
pub mod builtin;

use log::{debug, info};
use crate::language::ast::AstNode;
use crate::language::environment::Environment;
use crate::language::error::Result;
use crate::language::parser;
use crate::language::value::Value;
use builtin::io::Output;

pub use evaluator::{evaluate, Evaluator};

/// Owns the global environment of one run (or one REPL session).
#[derive(Debug)]
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    /// An interpreter whose globals hold the prelude, printing to stdout.
    pub fn new() -> Result<Self> {
        Self::with_output(builtin::io::stdout())
    }

    /// Same as [`Interpreter::new`] but `print` writes to `output`.
    pub fn with_output(output: Output) -> Result<Self> {
        let mut environment = Environment::new();
        builtin::install(&mut environment, output)?;
        Ok(Interpreter { environment })
    }

    /// An interpreter over a caller-prepared environment, without the prelude.
    pub fn with_environment(environment: Environment) -> Self {
        Interpreter { environment }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    pub fn interpret(&mut self, ast: &AstNode) -> Result<Value> {
        debug!("Interpreting {}", ast.kind_name());

        match evaluate(ast, &mut self.environment) {
            Ok(value) => {
                info!("Interpretation finished with {}", value);
                Ok(value)
            }
            Err(e) => {
                debug!("Interpretation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Tokenizes, parses and evaluates `source` against this interpreter's globals.
    pub fn run(&mut self, source: &str) -> Result<Value> {
        let program = parser::parse_source(source)?;
        self.interpret(&program)
    }
}
