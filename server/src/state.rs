//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! function handlers are stateless per request; the state only carries the
//! long-lived clients they call out to.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::services::identity::IdentityAdmin;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Privileged identity-provider client used by `auto-confirm-signup`.
    pub identity: Arc<dyn IdentityAdmin>,
    /// Optional generation backend. `None` if `GROQ_API_KEY` is not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
}

impl AppState {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityAdmin>, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self { identity, llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
