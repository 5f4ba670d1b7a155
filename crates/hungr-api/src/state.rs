//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hungr_core::config::AppConfig;
use hungr_core::result::AppResult;
use hungr_database::Stores;
use hungr_service::{
    ConnectionService, ExtractionService, FileService, RecipeService, StepService, TagService,
    UserService,
};
use hungr_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Persistence backend
    pub stores: Stores,
    /// Blob storage for uploaded files
    pub storage: Arc<StorageManager>,

    // ── Services ─────────────────────────────────────────────
    /// Login and user management
    pub user_service: Arc<UserService>,
    /// Recipe lifecycle
    pub recipe_service: Arc<RecipeService>,
    /// Recipe files
    pub file_service: Arc<FileService>,
    /// Step lists
    pub step_service: Arc<StepService>,
    /// Tag catalog
    pub tag_service: Arc<TagService>,
    /// User connections
    pub connection_service: Arc<ConnectionService>,
    /// AI recipe extraction
    pub extraction_service: Arc<ExtractionService>,
}

impl AppState {
    /// Wire every service from the stores and blob storage.
    pub fn new(config: AppConfig, stores: Stores, storage: Arc<StorageManager>) -> AppResult<Self> {
        let extraction_service = ExtractionService::from_config(&config.extraction)?;
        Ok(Self::with_extraction(config, stores, storage, extraction_service))
    }

    /// Same as [`AppState::new`] with a caller-supplied extraction service.
    pub fn with_extraction(
        config: AppConfig,
        stores: Stores,
        storage: Arc<StorageManager>,
        extraction_service: ExtractionService,
    ) -> Self {
        Self {
            user_service: Arc::new(UserService::new(stores.clone(), Arc::clone(&storage))),
            recipe_service: Arc::new(RecipeService::new(stores.clone(), Arc::clone(&storage))),
            file_service: Arc::new(FileService::new(stores.clone(), Arc::clone(&storage))),
            step_service: Arc::new(StepService::new(stores.clone())),
            tag_service: Arc::new(TagService::new(Arc::clone(&stores.tags))),
            connection_service: Arc::new(ConnectionService::new(stores.clone())),
            extraction_service: Arc::new(extraction_service),
            config: Arc::new(config),
            stores,
            storage,
        }
    }
}
