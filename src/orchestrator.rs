//! Runs a tool against the primary provider with a single fallback, then checks,
//! normalizes and records the result.

use crate::config::AppConfig;
use crate::history::HistoryStore;
use crate::integrity;
use crate::llm::{DeepSeekProxyClient, GeminiClient, JsonProvider, JsonRequest, ProviderError};
use crate::settings::{CredentialSource, SettingsStore};
use crate::storage::{FileStorage, Storage};
use crate::tools::ToolConfig;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Orchestrator {
    primary: Arc<dyn JsonProvider>,
    fallback: Arc<dyn JsonProvider>,
    credentials: Arc<dyn CredentialSource>,
    history: HistoryStore,
}

impl Orchestrator {
    pub fn new(
        primary: Arc<dyn JsonProvider>,
        fallback: Arc<dyn JsonProvider>,
        credentials: Arc<dyn CredentialSource>,
        history: HistoryStore,
    ) -> Self {
        Self {
            primary,
            fallback,
            credentials,
            history,
        }
    }

    /// Wires the HTTP adapters and file backed settings/history from a config
    pub fn from_config(config: &AppConfig) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::new(
            Arc::new(DeepSeekProxyClient::new(config.proxy_base_url.clone())),
            Arc::new(GeminiClient::new(
                config.gemini.api_key.clone(),
                config.gemini.model.clone(),
                config.gemini.base_url.clone(),
            )),
            Arc::new(SettingsStore::new(storage.clone())),
            HistoryStore::new(storage),
        )
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Produces a normalized result for `input`. Fails only when no provider
    /// delivered a usable JSON document.
    pub async fn run<I, O>(&self, tool: &ToolConfig<I, O>, input: &I) -> Result<O>
    where
        I: Serialize + Sync,
        O: Serialize + DeserializeOwned,
    {
        let tool_id = tool.id.as_str();
        let request = JsonRequest::new(tool.system_prompt.clone(), tool.user_prompt(input))
            .with_schema(tool.output_schema.clone());

        let mut output = None;
        if let Some(api_key) = self.credentials.primary_api_key() {
            let primary_request = request.clone().with_api_key(Some(api_key));
            let shaped = self
                .primary
                .generate_json(&primary_request)
                .await
                .and_then(|value| shape(tool, value).map_err(Into::into));
            match shaped {
                Ok(value) => output = Some(value),
                Err(e) => warn!(
                    "[{}] {} failed, switching to fallback: {:#}",
                    tool_id,
                    self.primary.name(),
                    e
                ),
            }
        } else {
            debug!("[{}] No primary credential configured, using fallback", tool_id);
        }

        let output = match output {
            Some(value) => value,
            None => {
                let candidate = self
                    .fallback
                    .generate_json(&request)
                    .await
                    .with_context(|| format!("AI generation failed for {tool_id}"))?;
                shape(tool, candidate)
                    .with_context(|| format!("AI generation failed for {tool_id}"))?
            }
        };

        self.record(tool_id, input, &output);
        info!("[{}] Analysis complete", tool_id);
        Ok(output)
    }

    fn record<I: Serialize, O: Serialize>(&self, tool_id: &str, input: &I, output: &O) {
        let input = serde_json::to_value(input).unwrap_or(Value::Null);
        let result = match serde_json::to_value(output) {
            Ok(result) => result,
            Err(e) => {
                warn!("[{}] Result not recorded, serialization failed: {}", tool_id, e);
                return;
            }
        };
        if let Err(e) = self.history.append(tool_id, &input, result) {
            warn!("[{}] History not updated: {}", tool_id, e);
        }
    }
}

/// Checks a provider document and turns it into the tool's result type.
/// Without a normalizer the document is decoded directly, and a document that
/// does not decode counts as a failure of the provider that produced it.
fn shape<I, O: DeserializeOwned>(
    tool: &ToolConfig<I, O>,
    candidate: Value,
) -> Result<O, ProviderError> {
    integrity::check(tool.id.as_str(), tool.expected_fields, &candidate);
    match tool.normalize {
        Some(normalize) => Ok(normalize(&candidate)),
        None => serde_json::from_value(candidate)
            .map_err(|e| ProviderError::Parse(format!("Unexpected response shape: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HISTORY_CAPACITY;
    use crate::settings::StaticCredential;
    use crate::storage::MemoryStorage;
    use crate::tools::{definitions, DevilsResult, ToolId};
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Mutex;

    /// Provider returning canned responses in order and recording every request
    struct MockProvider {
        name: &'static str,
        responses: Mutex<Vec<Result<Value, ProviderError>>>,
        requests: Mutex<Vec<JsonRequest>>,
    }

    impl MockProvider {
        fn new(name: &'static str, mut responses: Vec<Result<Value, ProviderError>>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self {
                name,
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> JsonRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl JsonProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn generate_json(&self, request: &JsonRequest) -> Result<Value> {
            self.requests.lock().unwrap().push(request.clone());
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(ProviderError::Network("no response queued".into())));
            Ok(response?)
        }
    }

    struct Setup {
        orchestrator: Orchestrator,
        primary: Arc<MockProvider>,
        fallback: Arc<MockProvider>,
    }

    fn setup(
        key: Option<&str>,
        primary: Vec<Result<Value, ProviderError>>,
        fallback: Vec<Result<Value, ProviderError>>,
        storage: Arc<dyn Storage>,
    ) -> Setup {
        let primary = MockProvider::new("primary", primary);
        let fallback = MockProvider::new("fallback", fallback);
        let orchestrator = Orchestrator::new(
            primary.clone(),
            fallback.clone(),
            Arc::new(StaticCredential(key.map(str::to_string))),
            HistoryStore::new(storage),
        );
        Setup {
            orchestrator,
            primary,
            fallback,
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pair {
        a: Value,
        b: Value,
    }

    fn pair_tool() -> ToolConfig<String, Pair> {
        ToolConfig {
            id: ToolId::Subtext,
            system_prompt: "system".to_string(),
            build_user_prompt: |input| format!("user: {input}"),
            expected_fields: &["a", "b"],
            output_schema: json!({"type": "OBJECT"}),
            normalize: Some(normalize_pair),
        }
    }

    fn normalize_pair(raw: &Value) -> Pair {
        Pair {
            a: raw.get("a").cloned().unwrap_or(json!("")),
            b: raw.get("b").cloned().unwrap_or(json!(0)),
        }
    }

    #[tokio::test]
    async fn partial_candidate_is_normalized() {
        let s = setup(None, vec![], vec![Ok(json!({"a": "x"}))], Arc::new(MemoryStorage::new()));

        let result = s.orchestrator.run(&pair_tool(), &"in".to_string()).await.unwrap();

        assert_eq!(result, Pair { a: json!("x"), b: json!(0) });
        assert_eq!(
            integrity::missing_fields(&["a", "b"], &json!({"a": "x"})),
            vec!["b"]
        );
    }

    #[tokio::test]
    async fn no_credential_uses_only_fallback() {
        let s = setup(None, vec![], vec![Ok(json!({"a": 1, "b": 2}))], Arc::new(MemoryStorage::new()));

        s.orchestrator.run(&pair_tool(), &"in".to_string()).await.unwrap();

        assert_eq!(s.primary.calls(), 0);
        assert_eq!(s.fallback.calls(), 1);
        let request = s.fallback.last_request();
        assert_eq!(request.system_prompt, "system");
        assert_eq!(request.user_prompt, "user: in");
        assert_eq!(request.schema, json!({"type": "OBJECT"}));
        assert!(request.api_key.is_none());
    }

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let s = setup(
            Some("sk-test"),
            vec![Ok(json!({"a": 1, "b": 2}))],
            vec![],
            Arc::new(MemoryStorage::new()),
        );

        let result = s.orchestrator.run(&pair_tool(), &"in".to_string()).await.unwrap();

        assert_eq!(result, Pair { a: json!(1), b: json!(2) });
        assert_eq!(s.primary.calls(), 1);
        assert_eq!(s.fallback.calls(), 0);
        assert_eq!(s.primary.last_request().api_key.as_deref(), Some("sk-test"));
    }

    #[tokio::test]
    async fn primary_failure_falls_back_once() {
        let storage = Arc::new(MemoryStorage::new());
        let s = setup(
            Some("sk-test"),
            vec![Err(ProviderError::Proxy {
                status: 502,
                body: "Bad Gateway".into(),
            })],
            vec![Ok(json!({"verdict": "guilty"}))],
            storage.clone(),
        );

        let result: DevilsResult = s
            .orchestrator
            .run(definitions::devils_advocate(), &"opinion".to_string())
            .await
            .unwrap();

        assert_eq!(s.primary.calls(), 1);
        assert_eq!(s.fallback.calls(), 1);
        assert_eq!(result.verdict, "guilty");
        assert_eq!(result.forced_confession, "被告已疯，无法签署认罪书。");
        assert!(result.logical_crimes.is_empty());

        let records = s.orchestrator.history().list();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tool_id, "DEVILS_ADVOCATE");
        assert_eq!(records[0].input_summary, "opinion");
        assert_eq!(records[0].result["verdict"], "guilty");
    }

    #[tokio::test]
    async fn parse_failure_of_primary_falls_back() {
        let s = setup(
            Some("sk-test"),
            vec![Err(ProviderError::Parse("Empty response from DeepSeek".into()))],
            vec![Ok(json!({"a": 1, "b": 2}))],
            Arc::new(MemoryStorage::new()),
        );

        assert!(s.orchestrator.run(&pair_tool(), &"in".to_string()).await.is_ok());
        assert_eq!(s.fallback.calls(), 1);
    }

    #[tokio::test]
    async fn both_failing_propagates_and_records_nothing() {
        let s = setup(
            Some("sk-test"),
            vec![Err(ProviderError::Network("connection refused".into()))],
            vec![Err(ProviderError::Config("Gemini API key not found".into()))],
            Arc::new(MemoryStorage::new()),
        );

        let err = s
            .orchestrator
            .run(&pair_tool(), &"in".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "AI generation failed for SUBTEXT");
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Config(_))
        ));
        assert!(s.orchestrator.history().list().is_empty());
    }

    #[tokio::test]
    async fn fallback_failure_without_credential_propagates() {
        let s = setup(
            None,
            vec![],
            vec![Err(ProviderError::Parse("Empty response from Gemini".into()))],
            Arc::new(MemoryStorage::new()),
        );

        assert!(s.orchestrator.run(&pair_tool(), &"in".to_string()).await.is_err());
        assert_eq!(s.primary.calls(), 0);
        assert!(s.orchestrator.history().list().is_empty());
    }

    #[tokio::test]
    async fn history_failure_does_not_affect_result() {
        // Every write exceeds the quota, so append fails even after pruning
        let storage = Arc::new(MemoryStorage::new().with_quota(1));
        let s = setup(None, vec![], vec![Ok(json!({"a": "x"}))], storage);

        let result = s.orchestrator.run(&pair_tool(), &"in".to_string()).await.unwrap();

        assert_eq!(result, Pair { a: json!("x"), b: json!(0) });
        assert!(s.orchestrator.history().list().is_empty());
    }

    #[tokio::test]
    async fn stitcher_keeps_primary_result_with_null_fields() {
        let s = setup(
            Some("sk-test"),
            vec![Ok(json!({"startupName": null, "unicornProbability": "95%", "tagline": "猫链"}))],
            vec![Ok(json!({"startupName": "FromFallback"}))],
            Arc::new(MemoryStorage::new()),
        );
        let input = crate::tools::StitcherInput {
            term_a: "猫".into(),
            term_b: "区块链".into(),
        };

        let result = s
            .orchestrator
            .run(definitions::concept_stitcher(), &input)
            .await
            .unwrap();

        assert_eq!(s.primary.calls(), 1);
        assert_eq!(s.fallback.calls(), 0);
        assert_eq!(result.startup_name, "");
        assert_eq!(result.tagline, "猫链");
        assert_eq!(result.unicorn_probability, 0.0);
        let records = s.orchestrator.history().list();
        assert_eq!(records[0].input_summary, "猫");
    }

    fn decoded_pair_tool() -> ToolConfig<String, Pair> {
        ToolConfig {
            normalize: None,
            ..pair_tool()
        }
    }

    #[tokio::test]
    async fn undecodable_primary_result_falls_back() {
        let s = setup(
            Some("sk-test"),
            vec![Ok(json!({"a": 1}))],
            vec![Ok(json!({"a": 1, "b": 2}))],
            Arc::new(MemoryStorage::new()),
        );

        let result = s
            .orchestrator
            .run(&decoded_pair_tool(), &"in".to_string())
            .await
            .unwrap();

        assert_eq!(result, Pair { a: json!(1), b: json!(2) });
        assert_eq!(s.primary.calls(), 1);
        assert_eq!(s.fallback.calls(), 1);
    }

    #[tokio::test]
    async fn undecodable_fallback_result_fails() {
        let s = setup(
            None,
            vec![],
            vec![Ok(json!("not an object"))],
            Arc::new(MemoryStorage::new()),
        );

        let err = s
            .orchestrator
            .run(&decoded_pair_tool(), &"in".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "AI generation failed for SUBTEXT");
        assert!(matches!(
            err.downcast_ref::<ProviderError>(),
            Some(ProviderError::Parse(_))
        ));
        assert!(s.orchestrator.history().list().is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_respect_history_capacity() {
        let responses = (0..HISTORY_CAPACITY + 5)
            .map(|i| Ok(json!({"a": i, "b": i})))
            .collect();
        let s = setup(None, vec![], responses, Arc::new(MemoryStorage::new()));

        for i in 0..HISTORY_CAPACITY + 5 {
            s.orchestrator
                .run(&pair_tool(), &format!("run {i}"))
                .await
                .unwrap();
        }

        let records = s.orchestrator.history().list();
        assert_eq!(records.len(), HISTORY_CAPACITY);
        assert_eq!(records[0].input_summary, format!("run {}", HISTORY_CAPACITY + 4));
    }
}
