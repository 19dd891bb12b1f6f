use crate::llm::{DeepSeekProxyClient, GeminiClient};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables consulted for the Gemini key, first non-empty wins
pub const GEMINI_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "VITE_GEMINI_API_KEY", "API_KEY"];
pub const PROXY_URL_VAR: &str = "DEEP_DISSECT_PROXY_URL";
pub const DATA_DIR_VAR: &str = "DEEP_DISSECT_DATA_DIR";

pub const DEFAULT_PROXY_PORT: u16 = 3001;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the proxy the primary adapter talks to
    pub proxy_base_url: String,
    /// Port the bundled proxy server listens on
    pub proxy_port: u16,
    /// Directory holding settings and history entries
    pub data_dir: PathBuf,
    pub gemini: GeminiConfig,
    pub deepseek: DeepSeekUpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

/// Upstream chat completion endpoint used by the proxy server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeepSeekUpstreamConfig {
    pub url: String,
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: DeepSeekProxyClient::default_base_url(),
            proxy_port: DEFAULT_PROXY_PORT,
            data_dir: default_data_dir(),
            gemini: GeminiConfig::default(),
            deepseek: DeepSeekUpstreamConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GeminiClient::default_model(),
            base_url: GeminiClient::default_base_url(),
        }
    }
}

impl Default for DeepSeekUpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://api.deepseek.com/chat/completions".to_string(),
            model: "deepseek-chat".to_string(),
        }
    }
}

/// Data directory used when neither the config file nor the environment names one
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("deep-dissect")
}

/// Location of the optional JSON config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("deep-dissect").join("config.json"))
}

impl AppConfig {
    /// Defaults, then the config file (if any), then `.env` and process environment
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let path = custom_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);
        let mut config = match path {
            Some(path) if path.exists() => Self::load_file(&path)?,
            Some(path) if custom_path.is_some() => {
                anyhow::bail!("Config file not found: {}", path.display())
            }
            _ => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        let value = substitute_env_vars_in_value(value)
            .with_context(|| format!("Failed to substitute env vars in {}", path.display()))?;
        serde_json::from_value(value)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Overrides values from environment variables resolved through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = GEMINI_KEY_VARS.into_iter().find_map(non_empty) {
            self.gemini.api_key = Some(key);
        }
        if let Some(url) = non_empty(PROXY_URL_VAR) {
            self.proxy_base_url = url;
        }
        if let Some(dir) = non_empty(DATA_DIR_VAR) {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

/// Recursively substitute `${VAR_NAME}` patterns inside JSON strings
fn substitute_env_vars_in_value(value: Value) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(substitute_env_vars_in_string(&s)?)),
        Value::Object(map) => map
            .into_iter()
            .map(|(key, val)| Ok((key, substitute_env_vars_in_value(val)?)))
            .collect::<Result<serde_json::Map<_, _>>>()
            .map(Value::Object),
        Value::Array(items) => items
            .into_iter()
            .map(substitute_env_vars_in_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other),
    }
}

fn substitute_env_vars_in_string(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    // Substituted values are copied verbatim and never scanned again
    while let Some(start) = rest.find("${") {
        let end = rest[start..]
            .find('}')
            .ok_or_else(|| anyhow::anyhow!("Unclosed environment variable substitution: {input}"))?;
        let end = start + end;

        let var_name = &rest[start + 2..end];
        let var_value = std::env::var(var_name)
            .with_context(|| format!("Environment variable not set: {var_name}"))?;

        result.push_str(&rest[..start]);
        result.push_str(&var_value);
        rest = &rest[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.proxy_base_url, "http://localhost:3001");
        assert_eq!(config.proxy_port, 3001);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.deepseek.model, "deepseek-chat");
        assert!(config.data_dir.ends_with("deep-dissect"));
    }

    #[test]
    fn gemini_key_resolution_order() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("API_KEY", "generic"), ("VITE_GEMINI_API_KEY", "vite")]));
        assert_eq!(config.gemini.api_key.as_deref(), Some("vite"));

        let mut config = AppConfig::default();
        config.apply_env(env(&[("GEMINI_API_KEY", " "), ("API_KEY", "generic")]));
        assert_eq!(config.gemini.api_key.as_deref(), Some("generic"));
    }

    #[test]
    fn env_overrides_proxy_and_data_dir() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            (PROXY_URL_VAR, "https://proxy.example"),
            (DATA_DIR_VAR, "/tmp/dd"),
        ]));
        assert_eq!(config.proxy_base_url, "https://proxy.example");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/dd"));
    }

    #[test]
    fn file_values_are_partial_and_substituted() {
        std::env::set_var("DEEP_DISSECT_TEST_GEMINI_KEY", "from-env");
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "proxy_port": 8080,
                "gemini": { "api_key": "${DEEP_DISSECT_TEST_GEMINI_KEY}" }
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_file(&path).unwrap();
        assert_eq!(config.proxy_port, 8080);
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.proxy_base_url, "http://localhost:3001");
    }

    #[test]
    fn unset_variable_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"proxy_base_url": "${DEEP_DISSECT_SURELY_UNSET_VAR}"}"#)
            .unwrap();

        let err = AppConfig::load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("DEEP_DISSECT_SURELY_UNSET_VAR"));
    }

    #[test]
    fn missing_custom_path_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        std::env::set_var("DEEP_DISSECT_TEST_SELF_REF", "${DEEP_DISSECT_TEST_SELF_REF}");
        std::env::set_var("DEEP_DISSECT_TEST_PLAIN", "b");
        assert_eq!(
            substitute_env_vars_in_string("a-${DEEP_DISSECT_TEST_SELF_REF}-${DEEP_DISSECT_TEST_PLAIN}-c")
                .unwrap(),
            "a-${DEEP_DISSECT_TEST_SELF_REF}-b-c"
        );
    }

    #[test]
    fn unclosed_substitution_is_an_error() {
        assert!(substitute_env_vars_in_string("${OPEN").is_err());
    }
}
