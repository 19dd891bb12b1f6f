use crate::llm::{types::*, utils, JsonProvider, ProviderError};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

/// Body accepted by the proxy route
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    api_key: &'a str,
    system_prompt: &'a str,
    user_prompt: &'a str,
}

/// The proxy relays the upstream chat completion unmodified
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Primary provider. Requests go to the proxy instead of the DeepSeek API because
/// browsers cannot call the provider directly.
pub struct DeepSeekProxyClient {
    client: Client,
    base_url: String,
}

impl DeepSeekProxyClient {
    pub fn default_base_url() -> String {
        "http://localhost:3001".to_string()
    }

    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self) -> String {
        format!("{}/api/deepseek", self.base_url)
    }

    async fn try_send_request(&self, request: &JsonRequest, api_key: &str) -> Result<Value> {
        let url = self.get_url();
        debug!("Sending DeepSeek request via proxy {}", url);
        trace!("DeepSeek system prompt:\n{}", request.system_prompt);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&ProxyRequest {
                api_key,
                system_prompt: &request.system_prompt,
                user_prompt: &request.user_prompt,
            })
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let response = utils::check_response_error(response).await?;

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        trace!("DeepSeek response: {}", response_text);

        let completion: ChatCompletion = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::Parse(format!("Failed to parse proxy response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        utils::parse_json_content("DeepSeek", content.as_deref())
    }
}

#[async_trait]
impl JsonProvider for DeepSeekProxyClient {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    async fn generate_json(&self, request: &JsonRequest) -> Result<Value> {
        let api_key = request
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::Config("DeepSeek API key not configured".to_string()))?;

        self.try_send_request(request, api_key).await
    }
}
