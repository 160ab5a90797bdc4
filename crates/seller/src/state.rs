//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SellerConfig;
use crate::db::DocumentStore;
use crate::services::{AuthenticatedSession, SubmissionWorkflow};
use crate::storage::ObjectStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the collaborators and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SellerConfig,
    pool: PgPool,
    objects: Arc<dyn ObjectStore>,
    documents: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Seller configuration
    /// * `pool` - `PostgreSQL` connection pool (sessions, readiness)
    /// * `objects` - Object store for product images
    /// * `documents` - Document store for product records
    #[must_use]
    pub fn new(
        config: SellerConfig,
        pool: PgPool,
        objects: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                objects,
                documents,
            }),
        }
    }

    /// Get a reference to the seller configuration.
    #[must_use]
    pub fn config(&self) -> &SellerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Build a submission workflow for an authenticated session.
    #[must_use]
    pub fn workflow(&self, session: AuthenticatedSession) -> SubmissionWorkflow {
        SubmissionWorkflow::new(
            session,
            Arc::clone(&self.inner.objects),
            Arc::clone(&self.inner.documents),
        )
    }
}
