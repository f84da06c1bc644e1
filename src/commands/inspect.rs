use std::path::Path;
use cinter_core::language::{parse, tokenize};
use super::read_source;

/// Prints one `kind text line:column` row per token.
pub fn print_tokens(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_source(path)?;
    for token in tokenize(&source)? {
        println!(
            "{:<16} {:<12} {}:{}",
            format!("{:?}", token.token_type),
            token.text,
            token.line,
            token.column
        );
    }
    Ok(())
}

pub fn print_ast(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_source(path)?;
    let program = parse(tokenize(&source)?)?;
    println!("{:#?}", program);
    Ok(())
}
