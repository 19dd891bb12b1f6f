use crate::llm::{types::*, utils, JsonProvider, ProviderError};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

/// Fallback provider: Gemini structured generation with a response schema
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub const TEMPERATURE: f32 = 0.8;

    pub fn default_base_url() -> String {
        "https://generativelanguage.googleapis.com/v1beta".to_string()
    }

    pub fn default_model() -> String {
        "gemini-2.5-flash".to_string()
    }

    /// The key comes from configuration, never from the caller. `None` defers the
    /// failure to the first request.
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn try_send_request(&self, request: &JsonRequest, api_key: &str) -> Result<Value> {
        let url = self.get_url();
        debug!("Sending Gemini request to {}", self.model);

        let schema = Some(&request.schema).filter(|schema| !schema.is_null());
        let gemini_request = GeminiRequest {
            system_instruction: SystemInstruction {
                parts: vec![RequestPart {
                    text: &request.system_prompt,
                }],
            },
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.user_prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: Self::TEMPERATURE,
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        trace!(
            "Gemini request:\n{}",
            serde_json::to_string_pretty(&gemini_request)?
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let response = utils::check_response_error(response).await?;

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        trace!("Gemini response: {}", response_text);

        let gemini_response: GeminiResponse = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::Parse(format!("Failed to parse response: {e}")))?;

        let text = Self::extract_text(gemini_response);
        utils::parse_json_content("Gemini", text.as_deref())
    }

    /// Concatenates the answer parts of the first candidate, skipping thought parts
    fn extract_text(response: GeminiResponse) -> Option<String> {
        let candidate = response.candidates.into_iter().next()?;
        if let Some(reason) = &candidate.finish_reason {
            debug!("Gemini finish reason: {}", reason);
        }

        let text: String = candidate
            .content?
            .parts
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        Some(text)
    }
}

#[async_trait]
impl JsonProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_json(&self, request: &JsonRequest) -> Result<Value> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProviderError::Config(
                "Gemini API key not found (set GEMINI_API_KEY, VITE_GEMINI_API_KEY or API_KEY)"
                    .to_string(),
            )
        })?;

        self.try_send_request(request, api_key).await
    }
}
