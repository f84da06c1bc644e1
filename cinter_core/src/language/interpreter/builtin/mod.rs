pub mod io;
pub mod math;

use log::debug;
use crate::language::environment::Environment;
use crate::language::error::Result;
use crate::language::value::Value;
use io::Output;
use math::Math;

/// Declares the prelude as constants in the current scope: `null`, `true`,
/// `false`, `print` (writing to `output`) and the math helpers.
pub fn install(env: &mut Environment, output: Output) -> Result<()> {
    env.declare("null", Value::Null, true)?;
    env.declare("true", Value::Boolean(true), true)?;
    env.declare("false", Value::Boolean(false), true)?;

    env.declare(
        "print",
        Value::native("print", move |args, _env| io::print(&output, &args)),
        true,
    )?;

    for (name, function) in Math::FUNCTIONS {
        env.declare(name, Value::native(name, function), true)?;
    }

    debug!("Prelude installed: {}", env.local_names().join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use super::*;
    use crate::language::error::ErrorKind;

    #[test]
    fn prelude_names_are_constant() {
        let mut env = Environment::new();
        install(&mut env, io::stdout()).unwrap();

        for name in ["null", "true", "false", "print", "abs", "sqrt", "floor", "min", "max", "time"] {
            assert!(env.is_constant(name), "{} should be constant", name);
        }
        assert_eq!(env.lookup("true").unwrap(), Value::Boolean(true));
        assert_eq!(env.assign("print", Value::Null).unwrap_err().kind, ErrorKind::ConstReassignment);
    }

    #[test]
    fn installing_twice_into_one_scope_fails() {
        let mut env = Environment::new();
        let output: Output = Rc::new(RefCell::new(Vec::<u8>::new()));
        install(&mut env, output.clone()).unwrap();
        assert_eq!(install(&mut env, output).unwrap_err().kind, ErrorKind::DuplicateDeclaration);
    }
}
