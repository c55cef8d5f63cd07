use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

pub fn encode_json<T: Serialize>(value: &T, field: &str) -> Result<String> {
    serde_json::to_string(value).with_context(|| format!("failed to serialize {field}"))
}

pub fn decode_json<T: DeserializeOwned>(value: &str, field: &str) -> Result<T> {
    serde_json::from_str(value).with_context(|| format!("failed to parse {field}"))
}
