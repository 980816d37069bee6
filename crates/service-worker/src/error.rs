use js_sys::{Error as GenericJsError, RangeError, SyntaxError, TypeError};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// A `JsValue` thrown or rejected by a browser API, classified so it has a
/// useful `Display`
#[derive(Debug, Clone, Error)]
pub enum JsError {
    #[error("TypeError: {0}")]
    Type(String),
    #[error("RangeError: {0}")]
    Range(String),
    #[error("SyntaxError: {0}")]
    Syntax(String),
    #[error("{name}: {message}")]
    Generic { name: String, message: String },
    #[error("Expected {expected}, got {got}")]
    UnexpectedValue { expected: &'static str, got: String },
    #[error("Serde error: {0}")]
    Serde(String),
    #[error("Unknown JsValue: {0}")]
    Unknown(String),
}

impl JsError {
    pub fn unexpected(expected: &'static str, got: &JsValue) -> Self {
        JsError::UnexpectedValue {
            expected,
            got: format!("{got:?}"),
        }
    }
}

impl From<JsValue> for JsError {
    fn from(err: JsValue) -> JsError {
        // The subclasses have to be checked before the generic Error
        if let Some(e) = err.dyn_ref::<TypeError>() {
            return JsError::Type(e.message().into());
        }
        if let Some(e) = err.dyn_ref::<RangeError>() {
            return JsError::Range(e.message().into());
        }
        if let Some(e) = err.dyn_ref::<SyntaxError>() {
            return JsError::Syntax(e.message().into());
        }
        if let Some(e) = err.dyn_ref::<GenericJsError>() {
            return JsError::Generic {
                name: e.name().into(),
                message: e.message().into(),
            };
        }
        match err.as_string() {
            Some(s) => JsError::Unknown(s),
            None => JsError::Unknown(format!("{err:?}")),
        }
    }
}

impl From<serde_json::Error> for JsError {
    fn from(err: serde_json::Error) -> JsError {
        JsError::Serde(err.to_string())
    }
}

impl From<JsError> for JsValue {
    fn from(err: JsError) -> JsValue {
        GenericJsError::new(&err.to_string()).into()
    }
}
