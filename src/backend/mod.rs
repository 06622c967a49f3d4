pub mod http;
pub mod types;

pub use http::HttpBackend;
pub use types::{HealthOut, ScoredItem};

/// Errors from the scoring service boundary. Local precondition failures
/// (e.g. no file chosen) never reach this type; the session controller
/// short-circuits them before any request is built.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success response; `message` is the backend's `error` field when
    /// present, else a generic fallback.
    #[error("{message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

// Callers hold the session on the current task, so no Send bound is needed
// on the returned futures.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn health(&self) -> Result<HealthOut, ApiError>;
    async fn predict(&self, payload: &str) -> Result<ScoredItem, ApiError>;
    async fn scan_image(&self, filename: &str, bytes: Vec<u8>) -> Result<Vec<ScoredItem>, ApiError>;
}
