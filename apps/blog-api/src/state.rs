//! Application state - shared across all handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use blog_core::{DomainError, PostService};
use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

use crate::config::AppConfig;
use crate::middleware::error::{AppError, AppResult};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub request_timeout: Duration,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store when
    /// no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repo: Arc<dyn PostRepository> = match &config.database {
            Some(db_config) => match Self::connect_postgres(db_config).await {
                Ok(repo) => repo,
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Arc::new(InMemoryPostRepository::new())
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repo: Arc<dyn PostRepository> = {
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self::with_repository(repo, config.request_timeout)
    }

    pub fn with_repository(repo: Arc<dyn PostRepository>, request_timeout: Duration) -> Self {
        Self {
            posts: PostService::new(repo),
            request_timeout,
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_postgres(
        config: &blog_infra::DatabaseConfig,
    ) -> Result<Arc<dyn PostRepository>, blog_infra::DbErr> {
        let conn = blog_infra::connect(config).await?;
        blog_infra::ensure_schema(&conn).await?;
        Ok(Arc::new(blog_infra::PostgresPostRepository::new(conn)))
    }

    /// Run a service call under the request deadline. An expired deadline
    /// drops the in-flight store call and reports a timeout.
    pub async fn deadline<T, F>(&self, call: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Post service call timed out"
                );
                Err(AppError::Timeout)
            }
        }
    }
}
