use crate::backend::{ApiError, Backend, ScoredItem};
use crate::config::Config;
use std::path::Path;
use tracing::{info, warn};

pub const NO_FILE_MESSAGE: &str = "Choose a QR image first.";

/// Terminal content of one successful submission. An empty scan vector is a
/// valid result ("no QR code detected"), distinct from an error.
#[derive(Debug, Clone)]
pub enum SessionResult {
    Single(ScoredItem),
    Scan(Vec<ScoredItem>),
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Idle,
    Submitting,
    Succeeded(SessionResult),
    Failed(String),
}

/// Orchestrates the two user-initiated flows against the backend collaborator.
///
/// Exactly one submission can be in flight: both entry points take `&mut self`
/// and hold the state at `Submitting` for the whole round trip, and every exit
/// path lands in `Succeeded` or `Failed`. Prior results and errors are cleared
/// before a request is issued, so stale content is never visible alongside a
/// new submission.
pub struct Session<B: Backend> {
    cfg: Config,
    backend: B,
    state: SessionState,
}

impl<B: Backend> Session<B> {
    pub fn new(cfg: &Config, backend: B) -> Self {
        Self {
            cfg: cfg.clone(),
            backend,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Submitting)
    }

    fn begin(&mut self) {
        self.state = SessionState::Submitting;
    }

    pub async fn submit_payload(&mut self, payload: &str) -> &SessionState {
        self.begin();
        self.state = match self.backend.predict(payload).await {
            Ok(item) => {
                info!(
                    prob_malicious = item.prob_malicious,
                    threshold = item.threshold,
                    "payload scored"
                );
                SessionState::Succeeded(SessionResult::Single(item))
            }
            Err(err) => SessionState::Failed(failure_message(err)),
        };
        &self.state
    }

    pub async fn submit_image(&mut self, image: Option<&Path>) -> &SessionState {
        self.begin();

        let Some(path) = image else {
            self.state = SessionState::Failed(NO_FILE_MESSAGE.to_string());
            return &self.state;
        };

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.state =
                    SessionState::Failed(format!("reading image {}: {err}", path.display()));
                return &self.state;
            }
        };

        let max = self.cfg.limits.max_image_bytes;
        if max > 0 && bytes.len() as u64 > max {
            self.state = SessionState::Failed(format!(
                "image exceeds max_image_bytes ({} > {max})",
                bytes.len()
            ));
            return &self.state;
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");

        self.state = match self.backend.scan_image(filename, bytes).await {
            Ok(items) => {
                info!(results = items.len(), "image scanned");
                SessionState::Succeeded(SessionResult::Scan(items))
            }
            Err(err) => SessionState::Failed(failure_message(err)),
        };
        &self.state
    }
}

fn failure_message(err: ApiError) -> String {
    match err {
        // Backend-reported error text is surfaced verbatim.
        ApiError::Api { status, message } => {
            warn!(%status, "backend reported an error");
            message
        }
        ApiError::Transport(err) => {
            warn!(%err, "transport failure");
            format!("request failed: {err}")
        }
    }
}
