//! Connection entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A directed "can view recipes of" edge: the source shares with the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Connection {
    /// User granting visibility.
    pub source_user_uuid: Uuid,
    /// User receiving visibility.
    pub target_user_uuid: Uuid,
    /// When the edge was created.
    pub created_at: DateTime<Utc>,
}
