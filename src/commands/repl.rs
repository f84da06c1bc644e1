use std::io::{self, BufRead, Write};
use log::{debug, warn};
use crate::config::RuntimeConfig;
use super::build_interpreter;

const PROMPT: &str = "> ";

/// Line-by-line session over one global environment. Errors are reported and
/// the session goes on; `exit` or end of input stops it.
pub fn repl(runtime: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut interpreter = build_interpreter(runtime)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Cinter REPL v{} (type 'exit' to quit)", env!("CARGO_PKG_VERSION"));

    loop {
        print!("{}", PROMPT);
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" {
            break;
        }

        match interpreter.run(line) {
            Ok(value) => println!("{}", value),
            Err(e) => {
                warn!("REPL input failed: {}", e);
                eprintln!("error: {}", e);
            }
        }
    }

    debug!("REPL session ended");
    Ok(())
}
