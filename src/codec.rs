/// JSON codec shared by export and import
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, TabPorterError};

pub const JSON_MIME_TYPE: &str = "application/json";

/// Encoded JSON text plus the MIME type it is offered under
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload {
    pub text: String,
    pub mime_type: &'static str,
}

impl JsonPayload {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Compact, deterministic JSON encoding
pub fn encode<T: Serialize>(value: &T) -> Result<JsonPayload> {
    let text = serde_json::to_string(value).map_err(TabPorterError::Encode)?;
    Ok(JsonPayload {
        text,
        mime_type: JSON_MIME_TYPE,
    })
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(TabPorterError::Parse)
}
