use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::interview::session::Session;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable AI collaborator. Production: `GeminiClient`.
    pub llm: Arc<dyn LanguageModel>,
    /// The single process-wide interview. Start and answer hold this lock end-to-end.
    pub session: Arc<Mutex<Session>>,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn LanguageModel>, config: Config) -> Self {
        Self {
            llm,
            session: Arc::new(Mutex::new(Session::default())),
            config,
        }
    }
}
