use serde::Serialize;
use log::info;

pub mod language;

pub use language::{Environment, Error, ErrorKind, Interpreter, Result, Value};

/// Runs `source` in a fresh interpreter with the standard prelude.
pub fn run(source: &str) -> Result<Value> {
    info!("Running {} bytes of source", source.len());
    let mut interpreter = Interpreter::new()?;
    interpreter.run(source)
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

/// Machine-readable outcome of a run.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    Ok { value: Value },
    Error { error: ErrorReport },
}

impl From<&Error> for ErrorReport {
    fn from(error: &Error) -> Self {
        ErrorReport {
            kind: error.kind.to_string(),
            message: error.message.clone(),
            line: error.line,
            column: error.column,
        }
    }
}

impl From<&Result<Value>> for Report {
    fn from(result: &Result<Value>) -> Self {
        match result {
            Ok(value) => Report::Ok { value: value.clone() },
            Err(error) => Report::Error { error: error.into() },
        }
    }
}

impl Report {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_success_as_json() {
        let report = Report::from(&Ok(Value::Number(15.0)));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["value"], 15.0);
    }

    #[test]
    fn reports_errors_with_kind_and_position() {
        let result = language::parse_source("let = 1").map(|_| Value::Null);
        let json: serde_json::Value =
            serde_json::from_str(&Report::from(&result).to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["kind"], "ParseError");
        assert_eq!(json["error"]["line"], 1);
        assert_eq!(json["error"]["column"], 5);

        let report = Report::from(&Err(Error::new(ErrorKind::TypeMismatch, "nope")));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(json["error"].get("line").is_none());
    }

    #[test]
    fn self_containing_objects_report_instead_of_overflowing() {
        let result = run("let o = {}; o.me = o; o");
        let json: serde_json::Value =
            serde_json::from_str(&Report::from(&result).to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["kind"], "TypeMismatch");

        // an embedder can still link an object to itself directly
        let object = Value::empty_object();
        if let Value::Object(properties) = &object {
            properties.borrow_mut().insert("me".to_string(), object.clone());
        }
        let json: serde_json::Value =
            serde_json::from_str(&Report::from(&Ok(object.clone())).to_json().unwrap()).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["value"]["me"]["me"].is_object());
        if let Value::Object(properties) = &object {
            properties.borrow_mut().clear();
        }
    }
}
