//! Tag service.

use std::sync::Arc;

use hungr_core::result::AppResult;
use hungr_database::store::TagStore;
use hungr_entity::Tag;

/// Read access to the tag catalog.
#[derive(Clone)]
pub struct TagService {
    tags: Arc<dyn TagStore>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(tags: Arc<dyn TagStore>) -> Self {
        Self { tags }
    }

    /// Every tag ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Tag>> {
        self.tags.list().await
    }
}
