//! Bundle of store handles selected from configuration.

use std::sync::Arc;

use tracing::info;

use hungr_core::config::{DatabaseBackend, DatabaseConfig};
use hungr_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    ConnectionRepository, FileRepository, RecipeRepository, StepRepository, TagRepository,
    UserRepository,
};
use crate::store::{ConnectionStore, FileStore, RecipeStore, StepStore, TagStore, UserStore};

/// One handle per aggregate, all backed by the same database.
#[derive(Clone)]
pub struct Stores {
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Recipe persistence.
    pub recipes: Arc<dyn RecipeStore>,
    /// File records.
    pub files: Arc<dyn FileStore>,
    /// Step lists.
    pub steps: Arc<dyn StepStore>,
    /// Tag catalog.
    pub tags: Arc<dyn TagStore>,
    /// User connections.
    pub connections: Arc<dyn ConnectionStore>,
    /// Present when backed by PostgreSQL.
    pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.backend())
            .finish()
    }
}

impl Stores {
    /// Build the stores named by configuration.
    ///
    /// For PostgreSQL this connects and applies pending migrations.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                info!("Initializing PostgreSQL stores");
                let pool = DatabasePool::connect(config).await?;
                run_migrations(pool.pool()).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                info!("Initializing in-memory stores; data is lost on restart");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Stores backed by a connected pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            recipes: Arc::new(RecipeRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            steps: Arc::new(StepRepository::new(pg.clone())),
            tags: Arc::new(TagRepository::new(pg.clone())),
            connections: Arc::new(ConnectionRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores sharing one in-memory table set.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            recipes: Arc::new(store.clone()),
            files: Arc::new(store.clone()),
            steps: Arc::new(store.clone()),
            tags: Arc::new(store.clone()),
            connections: Arc::new(store),
            pool: None,
        }
    }

    /// Backend in use.
    pub fn backend(&self) -> DatabaseBackend {
        if self.pool.is_some() {
            DatabaseBackend::Postgres
        } else {
            DatabaseBackend::Memory
        }
    }

    /// Check that the backing database answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}
