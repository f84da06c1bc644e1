pub mod inspect;
pub mod repl;
pub mod run;

use std::fs;
use std::path::Path;
use cinter_core::{Environment, Interpreter};
use crate::config::RuntimeConfig;

pub fn read_source(path: &Path) -> Result<String, std::io::Error> {
    fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Failed to read '{}': {}", path.display(), e))
    })
}

/// A fresh interpreter with or without the prelude, per config.
pub fn build_interpreter(runtime: &RuntimeConfig) -> cinter_core::Result<Interpreter> {
    if runtime.prelude {
        Interpreter::new()
    } else {
        Ok(Interpreter::with_environment(Environment::new()))
    }
}
