//! One-route HTTP proxy forwarding primary provider requests to the DeepSeek
//! chat completion API, for clients that cannot call it directly.

use crate::config::DeepSeekUpstreamConfig;
use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, trace};

const JSON_INSTRUCTION: &str = "\n\nIMPORTANT: You must respond with valid JSON.";
const TEMPERATURE: f32 = 1.0;

#[derive(Debug, Default)]
struct ProxyRequest {
    api_key: String,
    system_prompt: String,
    user_prompt: String,
}

impl ProxyRequest {
    /// Reads the request fields leniently; anything that is not a string is empty
    fn from_body(body: &Value) -> Self {
        let field = |key: &str| body[key].as_str().unwrap_or_default().to_string();
        Self {
            api_key: field("apiKey"),
            system_prompt: field("systemPrompt"),
            user_prompt: field("userPrompt"),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

struct ProxyState {
    client: reqwest::Client,
    upstream: DeepSeekUpstreamConfig,
}

pub fn router(upstream: DeepSeekUpstreamConfig) -> Router {
    let state = Arc::new(ProxyState {
        client: reqwest::Client::new(),
        upstream,
    });
    Router::new()
        .route("/api/deepseek", post(forward_deepseek))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the proxy on localhost and serves until the process ends
pub async fn serve(port: u16, upstream: DeepSeekUpstreamConfig) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Deep Dissect proxy listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(upstream)).await?;
    Ok(())
}

async fn forward_deepseek(
    State(state): State<Arc<ProxyState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(body)) => ProxyRequest::from_body(&body),
        Err(rejection) => {
            debug!("Unreadable proxy request body: {}", rejection);
            ProxyRequest::default()
        }
    };
    if request.api_key.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing API Key" })),
        )
            .into_response();
    }

    info!("Forwarding request to DeepSeek");
    match send_upstream(&state, &request).await {
        Ok(response) => response,
        Err(e) => {
            error!("Proxy error: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}

async fn send_upstream(state: &ProxyState, request: &ProxyRequest) -> Result<Response> {
    let body = ChatCompletionRequest {
        model: &state.upstream.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: format!("{}{}", request.system_prompt, JSON_INSTRUCTION),
            },
            ChatMessage {
                role: "user",
                content: request.user_prompt.clone(),
            },
        ],
        response_format: ResponseFormat {
            kind: "json_object",
        },
        temperature: TEMPERATURE,
    };

    let response = state
        .client
        .post(&state.upstream.url)
        .header("Content-Type", "application/json")
        .bearer_auth(&request.api_key)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await?;
        error!("DeepSeek API error: {} - {}", status, error_text);
        let status =
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return Ok((status, error_text).into_response());
    }

    let data: Value = response.json().await?;
    trace!("DeepSeek upstream response: {}", data);
    Ok(Json(data).into_response())
}
