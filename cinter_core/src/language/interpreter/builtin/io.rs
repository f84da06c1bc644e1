use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use crate::language::error::{Error, ErrorKind, Result};
use crate::language::value::Value;

/// Where `print` writes. Shared so the host can keep a handle to it.
pub type Output = Rc<RefCell<dyn Write>>;

pub fn stdout() -> Output {
    Rc::new(RefCell::new(std::io::stdout()))
}

/// Writes the arguments separated by spaces and ends the line.
pub fn print(output: &Output, args: &[Value]) -> Result<Value> {
    let line = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = output.borrow_mut();
    writeln!(out, "{}", line)
        .and_then(|_| out.flush())
        .map_err(|e| Error::new(ErrorKind::Native, format!("print() failed to write output: {}", e)))?;

    Ok(Value::Null)
}
