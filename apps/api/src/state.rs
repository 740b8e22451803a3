use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::proposal::drafts::DraftStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Session-scoped proposal drafts. In-memory only: a draft lives no
    /// longer than the process, and the calculators never see this store.
    pub drafts: DraftStore,
}
