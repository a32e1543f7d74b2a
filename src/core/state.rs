use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::repositories::AssignmentRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    repo: Arc<dyn AssignmentRepo>,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, repo: Arc<dyn AssignmentRepo>) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, repo }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Storage handle for the current request.
    pub(crate) fn repo(&self) -> &dyn AssignmentRepo {
        self.inner.repo.as_ref()
    }
}
