// error.rs - Crate error type
//
// The simulation itself cannot fail. Errors only come from the host:
// canvas calls that throw, frame scheduling, config parsing, logging setup.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error("canvas call failed: {0}")]
    Surface(String),

    #[error("frame scheduling failed: {0}")]
    Schedule(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a thrown JS value as a surface error
    pub fn surface(value: JsValue) -> Self {
        Self::Surface(describe(&value))
    }

    /// Wrap a thrown JS value as a scheduling error
    pub fn schedule(value: JsValue) -> Self {
        Self::Schedule(describe(&value))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
