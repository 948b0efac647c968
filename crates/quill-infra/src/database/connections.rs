#[cfg(feature = "postgres")]
use std::sync::Arc;
#[cfg(feature = "postgres")]
use std::time::Duration;

#[cfg(feature = "postgres")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// Configuration for the post store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Owns the store handle for the life of the process.
///
/// Opened once at startup with [`DatabaseConnections::init`] and released with
/// [`DatabaseConnections::close`] after the HTTP server has stopped.
/// Repositories get the pool through [`DatabaseConnections::pool`].
#[cfg(feature = "postgres")]
pub struct DatabaseConnections {
    main: Arc<DbConn>,
}

#[cfg(feature = "postgres")]
impl DatabaseConnections {
    pub async fn init(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let main = Database::connect(opts).await?;
        tracing::info!("Database connected (pool: {})", config.max_connections);

        Ok(Self::from_connection(main))
    }

    pub fn from_connection(main: DbConn) -> Self {
        Self {
            main: Arc::new(main),
        }
    }

    pub fn main(&self) -> &DbConn {
        &self.main
    }

    /// A shared handle on the pool for a repository.
    pub fn pool(&self) -> Arc<DbConn> {
        Arc::clone(&self.main)
    }

    /// Close the pool. Repositories must be dropped first; if one still holds
    /// the pool it is released when that last handle goes away.
    pub async fn close(self) -> Result<(), DbErr> {
        match Arc::try_unwrap(self.main) {
            Ok(main) => {
                main.close().await?;
                tracing::info!("Database connection closed");
            }
            Err(_) => {
                tracing::warn!("Database pool still in use, leaving it to close on drop");
            }
        }
        Ok(())
    }
}
