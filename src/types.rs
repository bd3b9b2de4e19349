//! Common types and data structures

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A category the user asked to analyze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    category: String,
}

impl AnalysisRequest {
    /// Returns `None` when the input is empty after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let category = raw.trim();
        if category.is_empty() {
            return None;
        }
        Some(Self {
            category: category.to_string(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// One entry of the server's ranked word list
#[derive(Debug, Clone, PartialEq)]
pub struct WordFrequency {
    pub word: String,
    pub frequency: f64,
}

impl WordFrequency {
    pub fn new(word: impl Into<String>, frequency: f64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }

    /// Accepts `{ "word": string, "frequency": number }` with a finite,
    /// non-negative frequency. Anything else is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let word = value.get("word")?.as_str()?;
        let frequency = value.get("frequency")?.as_f64()?;
        if !frequency.is_finite() || frequency < 0.0 {
            return None;
        }
        Some(Self::new(word, frequency))
    }
}

/// `status` field of the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Success,
    Error,
    Unknown,
}

impl ResponseStatus {
    /// Anything other than the two known strings, including a missing or
    /// non-string field, is `Unknown`.
    pub fn from_value(value: &Value) -> Self {
        match value.as_str() {
            Some("success") => Self::Success,
            Some("error") => Self::Error,
            _ => Self::Unknown,
        }
    }

    pub fn is_error(self) -> bool {
        self == Self::Error
    }
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Unknown => "unknown",
        })
    }
}

/// Envelope exactly as it comes off the wire. Fields are read loosely: a
/// missing or ill-typed field falls back to its empty value.
#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    status: Value,
    #[serde(default)]
    message: Value,
    #[serde(default)]
    words: Value,
}

/// Decoded `/analyze/{category}` response with malformed words dropped
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    pub status: ResponseStatus,
    pub message: String,
    pub words: Vec<WordFrequency>,
}

impl AnalysisResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawResponse = serde_json::from_slice(body)?;
        let entries = match raw.words {
            Value::Array(entries) => entries,
            Value::Null => Vec::new(),
            other => {
                warn!(kind = json_kind(&other), "Ignoring non-array words field");
                Vec::new()
            }
        };
        let total = entries.len();
        let words: Vec<WordFrequency> =
            entries.iter().filter_map(WordFrequency::from_value).collect();

        if words.len() < total {
            warn!(
                skipped = total - words.len(),
                total,
                "Dropped malformed word entries"
            );
        }

        Ok(Self {
            status: ResponseStatus::from_value(&raw.status),
            message: raw.message.as_str().unwrap_or_default().to_string(),
            words,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
