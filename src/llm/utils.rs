use crate::llm::ProviderError;
use anyhow::Result;
use reqwest::Response;
use serde_json::Value;

/// Check the response status.
/// Returns Ok(Response) if successful, or a `ProviderError::Proxy` carrying the status and body.
pub async fn check_response_error(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    Err(ProviderError::Proxy {
        status: status.as_u16(),
        body,
    }
    .into())
}

/// Parse model output text as JSON, mapping empty or malformed content to `ProviderError::Parse`.
pub fn parse_json_content(provider: &str, content: Option<&str>) -> Result<Value> {
    let content = content
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ProviderError::Parse(format!("Empty response from {provider}")))?;

    let value = serde_json::from_str(content)
        .map_err(|e| ProviderError::Parse(format!("{provider} returned invalid JSON: {e}")))?;
    Ok(value)
}
