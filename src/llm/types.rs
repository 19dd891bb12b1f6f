use serde_json::Value;

/// Generic request structure that is mapped onto each provider's wire format
#[derive(Debug, Clone, Default)]
pub struct JsonRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Strict output schema for providers that support constrained decoding
    pub schema: Value,
    /// Caller-supplied credential, only consumed by key-gated providers
    pub api_key: Option<String>,
}

impl JsonRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            schema: Value::Null,
            api_key: None,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}
