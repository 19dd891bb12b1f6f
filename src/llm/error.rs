use thiserror::Error;

/// Failure modes shared by all JSON providers
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No usable credential for the provider
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP layer answered with a non-success status
    #[error("Proxy error {status}: {body}")]
    Proxy { status: u16, body: String },

    /// The response carried no extractable content, or the content is not JSON
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Proxy { status, .. } => Some(*status),
            _ => None,
        }
    }
}
