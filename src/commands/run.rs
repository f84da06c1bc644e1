use std::path::Path;
use log::info;
use cinter_core::{Report, Value};
use crate::config::RuntimeConfig;
use super::{build_interpreter, read_source};

pub fn run_file(path: &Path, json: bool, runtime: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_source(path)?;
    info!("Running {}", path.display());
    run_source(&source, json, runtime)
}

pub fn run_source(source: &str, json: bool, runtime: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut interpreter = build_interpreter(runtime)?;
    let result = interpreter.run(source);

    if json {
        println!("{}", Report::from(&result).to_json()?);
    }

    let value = result?;
    if !json && runtime.echo_result && value != Value::Null {
        println!("{}", value);
    }

    Ok(())
}
