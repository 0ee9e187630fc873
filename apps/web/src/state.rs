use std::sync::Arc;

use crate::config::Config;
use crate::submission::SubmissionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The page's single form/report state and the submission flow around it.
    pub controller: Arc<SubmissionController>,
}
