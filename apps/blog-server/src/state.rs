//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::BlogService;
use quill_core::ports::PostRepository;
use quill_infra::{HtmlSanitizer, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;
use crate::views::Templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub views: Arc<Templates>,
}

/// Keeps the store connection alive until the server shuts down.
pub struct StoreHandle {
    #[cfg(feature = "postgres")]
    db: Option<DatabaseConnections>,
}

impl StoreHandle {
    pub async fn close(self) -> anyhow::Result<()> {
        #[cfg(feature = "postgres")]
        if let Some(db) = self.db {
            db.close().await?;
        }
        Ok(())
    }
}

impl AppState {
    /// Wire the service to a repository, with the HTML sanitizer and compiled views.
    pub fn with_repository(posts: Arc<dyn PostRepository>) -> anyhow::Result<Self> {
        let blog = BlogService::new(posts, Arc::new(HtmlSanitizer::new()));
        let views = Arc::new(Templates::new()?);
        Ok(Self { blog, views })
    }

    /// Open the configured store and build the state around it.
    ///
    /// A configured database that cannot be reached is a startup error;
    /// only a missing `DATABASE_URL` selects the in-memory store.
    pub async fn init(config: &AppConfig) -> anyhow::Result<(Self, StoreHandle)> {
        #[cfg(feature = "postgres")]
        let (posts, handle): (Arc<dyn PostRepository>, StoreHandle) = match &config.database {
            Some(db_config) => {
                let db = DatabaseConnections::init(db_config).await?;
                if config.run_migrations {
                    use migration::MigratorTrait;
                    migration::Migrator::up(db.main(), None).await?;
                    tracing::info!("Database migrations applied");
                }
                let repo = Arc::new(PostgresPostRepository::new(db.pool()));
                (repo, StoreHandle { db: Some(db) })
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (
                    Arc::new(InMemoryPostRepository::new()),
                    StoreHandle { db: None },
                )
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (posts, handle): (Arc<dyn PostRepository>, StoreHandle) = {
            if config.database.is_some() {
                tracing::warn!("Built without postgres feature - ignoring DATABASE_URL");
            }
            tracing::info!("Running with the in-memory post store");
            (Arc::new(InMemoryPostRepository::new()), StoreHandle {})
        };

        let state = Self::with_repository(posts)?;
        tracing::info!("Application state initialized");

        Ok((state, handle))
    }
}
