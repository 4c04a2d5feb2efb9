/// Source of human-readable definitions
#[async_trait::async_trait]
pub trait Dictionary: Send + Sync {
    /// Dictionary name for logs
    fn name(&self) -> &str;

    /// Fetch and render the definition block for `word`.
    /// One attempt per call, no retries.
    async fn define(&self, word: &str) -> Result<String, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("empty query")]
    EmptyQuery,

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}
