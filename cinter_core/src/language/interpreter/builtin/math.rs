use chrono::Utc;
use log::trace;
use crate::language::environment::Environment;
use crate::language::error::Result;
use crate::language::value::Value;
use crate::runtime_error;

pub struct Math {}

impl Math {
    pub const FUNCTIONS: [(&'static str, fn(Vec<Value>, &mut Environment) -> Result<Value>); 6] = [
        ("abs", Math::abs),
        ("sqrt", Math::sqrt),
        ("floor", Math::floor),
        ("min", Math::min),
        ("max", Math::max),
        ("time", Math::time),
    ];

    fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>> {
        args.iter()
            .enumerate()
            .map(|(i, arg)| match arg {
                Value::Number(n) => Ok(*n),
                other => runtime_error!(
                    TypeMismatch,
                    format!("{}() expects numbers, argument {} is {}", name, i + 1, other.type_name())
                ),
            })
            .collect()
    }

    fn single(name: &str, args: &[Value]) -> Result<f64> {
        match Self::numbers(name, args)?.as_slice() {
            [n] => Ok(*n),
            other => runtime_error!(
                TypeMismatch,
                format!("{}() takes 1 argument but {} were given", name, other.len())
            ),
        }
    }

    fn at_least_one(name: &str, args: &[Value]) -> Result<Vec<f64>> {
        let numbers = Self::numbers(name, args)?;
        if numbers.is_empty() {
            return runtime_error!(TypeMismatch, format!("{}() takes at least 1 argument", name));
        }
        Ok(numbers)
    }

    pub fn abs(args: Vec<Value>, _env: &mut Environment) -> Result<Value> {
        Ok(Value::Number(Self::single("abs", &args)?.abs()))
    }

    pub fn sqrt(args: Vec<Value>, _env: &mut Environment) -> Result<Value> {
        Ok(Value::Number(Self::single("sqrt", &args)?.sqrt()))
    }

    pub fn floor(args: Vec<Value>, _env: &mut Environment) -> Result<Value> {
        Ok(Value::Number(Self::single("floor", &args)?.floor()))
    }

    pub fn min(args: Vec<Value>, _env: &mut Environment) -> Result<Value> {
        let numbers = Self::at_least_one("min", &args)?;
        Ok(Value::Number(numbers.into_iter().fold(f64::INFINITY, f64::min)))
    }

    pub fn max(args: Vec<Value>, _env: &mut Environment) -> Result<Value> {
        let numbers = Self::at_least_one("max", &args)?;
        Ok(Value::Number(numbers.into_iter().fold(f64::NEG_INFINITY, f64::max)))
    }

    /// Milliseconds since the Unix epoch.
    pub fn time(args: Vec<Value>, _env: &mut Environment) -> Result<Value> {
        if !args.is_empty() {
            return runtime_error!(
                TypeMismatch,
                format!("time() takes no arguments but {} were given", args.len())
            );
        }
        let now = Utc::now().timestamp_millis();
        trace!("time() -> {}", now);
        Ok(Value::Number(now as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::error::ErrorKind;

    fn call(f: fn(Vec<Value>, &mut Environment) -> Result<Value>, args: &[f64]) -> Result<Value> {
        let args = args.iter().map(|n| Value::Number(*n)).collect();
        f(args, &mut Environment::new())
    }

    #[test]
    fn single_argument_helpers() {
        assert_eq!(call(Math::abs, &[-3.0]).unwrap(), Value::Number(3.0));
        assert_eq!(call(Math::sqrt, &[16.0]).unwrap(), Value::Number(4.0));
        assert_eq!(call(Math::floor, &[2.75]).unwrap(), Value::Number(2.0));
        assert_eq!(call(Math::abs, &[]).unwrap_err().kind, ErrorKind::TypeMismatch);
        assert_eq!(call(Math::abs, &[1.0, 2.0]).unwrap_err().kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn variadic_min_and_max() {
        assert_eq!(call(Math::min, &[3.0, -1.0, 2.0]).unwrap(), Value::Number(-1.0));
        assert_eq!(call(Math::max, &[3.0, -1.0, 2.0]).unwrap(), Value::Number(3.0));
        assert_eq!(call(Math::max, &[]).unwrap_err().kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn rejects_non_numbers() {
        let error = Math::abs(vec![Value::Null], &mut Environment::new()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::TypeMismatch);
        assert!(error.message.contains("argument 1 is null"), "{}", error.message);
    }

    #[test]
    fn time_is_after_2020() {
        match call(Math::time, &[]).unwrap() {
            Value::Number(ms) => assert!(ms > 1_577_836_800_000.0),
            other => panic!("expected a number, got {}", other),
        }
        assert!(call(Math::time, &[1.0]).is_err());
    }
}
