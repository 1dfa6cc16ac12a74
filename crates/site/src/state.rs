//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::SiteConfig;
use crate::services::NotificationClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the configuration, the
/// database pool, and the notification client (if a mailer is configured).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: SqlitePool,
    notifier: Option<NotificationClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The notification client is only constructed when the configuration
    /// carries a mailer section; approvals work without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification HTTP client fails to build.
    pub fn new(config: SiteConfig, pool: SqlitePool) -> Result<Self, reqwest::Error> {
        let notifier = config
            .mailer
            .as_ref()
            .map(|mailer| NotificationClient::new(mailer.clone(), &config))
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                notifier,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get the notification client, if a mailer is configured.
    #[must_use]
    pub fn notifier(&self) -> Option<&NotificationClient> {
        self.inner.notifier.as_ref()
    }
}
