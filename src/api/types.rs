//! Request and response types for the OpenAI-compatible API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Creation timestamp reported for every catalog entry.
pub const CATALOG_CREATED: i64 = 1686935002;

const CATALOG_IDS: [&str; 3] = [
    "llama-3.1-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
];

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize)]
pub struct ModelsResponse {
    pub object: &'static str,
    pub data: Vec<ModelInfo>,
}

#[derive(Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub object: &'static str,
    pub created: i64,
    pub owned_by: &'static str,
}

/// The fixed model list served by `GET /v1/models`.
pub fn model_catalog() -> ModelsResponse {
    ModelsResponse {
        object: "list",
        data: CATALOG_IDS
            .into_iter()
            .map(|id| ModelInfo {
                id,
                object: "model",
                created: CATALOG_CREATED,
                owned_by: "groq",
            })
            .collect(),
    }
}

/// Chat completion request as sent by the caller and forwarded upstream.
///
/// Deserializing applies the defaults and drops every field not named here,
/// so serializing the result yields exactly the upstream payload. Defaults
/// only fill absent keys; values the caller sent, `null` or otherwise, are
/// forwarded untouched and left for the upstream to judge.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatCompletionRequest {
    #[serde(default = "default_model")]
    pub model: Value,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub messages: Option<Value>,
    #[serde(default = "default_temperature")]
    pub temperature: Value,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: Value,
    #[serde(default = "default_stream")]
    pub stream: Value,
}

impl Default for ChatCompletionRequest {
    fn default() -> Self {
        Self {
            model: default_model(),
            messages: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            stream: default_stream(),
        }
    }
}

impl ChatCompletionRequest {
    /// Parse a raw request body.
    ///
    /// An empty body or a JSON array carries no fields and yields the
    /// defaults. Anything else must be a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(body)? {
            Value::Array(_) => Ok(Self::default()),
            value => serde_json::from_value(value),
        }
    }

    /// Whether the caller asked for a streamed response.
    pub fn is_streaming(&self) -> bool {
        is_truthy(&self.stream)
    }
}

/// Loose truthiness: `false`, `null`, `0` and `""` are false, everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn default_model() -> Value {
    Value::from(DEFAULT_MODEL)
}

fn default_temperature() -> Value {
    Value::from(DEFAULT_TEMPERATURE)
}

fn default_max_tokens() -> Value {
    Value::from(DEFAULT_MAX_TOKENS)
}

fn default_stream() -> Value {
    Value::Bool(false)
}

/// Keeps an explicit `null` as `Some(Value::Null)` instead of collapsing it to `None`.
fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}
