//! Failures that keep the mini-game from binding to the page.
//!
//! Binding fails closed: if any required element is absent nothing is
//! registered and the page simply has no game.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    NoWindow,
    NoDocument,
    /// A required element matched nothing. Holds the selector.
    MissingElement(&'static str),
    InvalidConfig(String),
    #[cfg(feature = "serde_json")]
    ConfigParse(String),
    /// A DOM call threw while wiring things up.
    Dom(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::NoWindow => write!(f, "no window"),
            InitError::NoDocument => write!(f, "no document"),
            InitError::MissingElement(sel) => write!(f, "missing required element `{sel}`"),
            InitError::InvalidConfig(why) => write!(f, "invalid game config: {why}"),
            #[cfg(feature = "serde_json")]
            InitError::ConfigParse(why) => write!(f, "could not parse game config: {why}"),
            InitError::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for InitError {}

impl From<InitError> for JsValue {
    fn from(err: InitError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl From<JsValue> for InitError {
    fn from(value: JsValue) -> Self {
        InitError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
