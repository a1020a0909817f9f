use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure talking to the key-value store behind the theme preference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

impl StorageError {
    pub(crate) fn unavailable(value: JsValue) -> Self {
        StorageError::Unavailable(describe(&value))
    }

    pub(crate) fn read(value: JsValue) -> Self {
        StorageError::Read(describe(&value))
    }

    pub(crate) fn write(value: JsValue) -> Self {
        StorageError::Write(describe(&value))
    }
}

/// Best-effort text for a thrown JS value (a `DOMException` usually).
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
