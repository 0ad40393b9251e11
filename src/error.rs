//! Crate error type.
//!
//! Only browser setup can fail in a way the caller sees. Storage hiccups are
//! logged and swallowed by the roaster, so most of these variants never leave
//! the crate.

use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("local storage unavailable")]
    NoStorage,

    #[error("canvas 2d context unavailable")]
    NoCanvasContext,

    #[error("javascript error: {0}")]
    Js(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(String),
}

impl Error {
    pub fn config(reason: impl std::fmt::Display) -> Self {
        Self::Config(reason.to_string())
    }
}

// web-sys hands back opaque JsValues; keep whatever text they carry.
impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Js(text)
    }
}

impl From<Error> for JsValue {
    fn from(value: Error) -> Self {
        JsValue::from_str(&value.to_string())
    }
}
