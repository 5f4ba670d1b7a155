//! Connection service.

use tracing::info;
use uuid::Uuid;

use hungr_core::error::AppError;
use hungr_core::result::AppResult;
use hungr_database::Stores;
use hungr_entity::{ConnectionDirection, User};

/// Creates, lists and removes connections.
///
/// An edge source → target lets the target see the source's recipes.
#[derive(Clone)]
pub struct ConnectionService {
    stores: Stores,
}

impl ConnectionService {
    /// Creates a new connection service.
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    async fn caller(&self, email: &str) -> AppResult<User> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(AppError::validation("email is required"));
        }
        self.stores
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::authentication("invalid user"))
    }

    /// Connect the caller to `target`. Re-creating an edge is a no-op.
    pub async fn create(&self, caller_email: &str, target: Uuid) -> AppResult<()> {
        let source = self.caller(caller_email).await?;
        if target.is_nil() {
            return Err(AppError::validation("target_user_uuid is required"));
        }
        if source.uuid == target {
            return Err(AppError::validation("cannot connect to yourself"));
        }
        if self.stores.users.find_by_uuid(target).await?.is_none() {
            return Err(AppError::not_found("target user not found"));
        }

        let created = self.stores.connections.create(source.uuid, target).await?;
        info!(
            source_user_uuid = %source.uuid,
            target_user_uuid = %target,
            created,
            "Connection saved"
        );
        Ok(())
    }

    /// Users on the other end of `user`'s edges in one direction.
    pub async fn list(&self, user: Uuid, direction: ConnectionDirection) -> AppResult<Vec<User>> {
        match direction {
            ConnectionDirection::Outgoing => self.stores.connections.list_targets(user).await,
            ConnectionDirection::Incoming => self.stores.connections.list_sources(user).await,
        }
    }

    /// Remove the caller's edge to `target`, and the reverse edge too when
    /// `bidirectional` is set. Missing edges are not an error.
    pub async fn delete(&self, caller_email: &str, target: Uuid, bidirectional: bool) -> AppResult<()> {
        let source = self.caller(caller_email).await?;

        self.stores.connections.delete(source.uuid, target).await?;
        if bidirectional {
            self.stores.connections.delete(target, source.uuid).await?;
        }

        info!(
            source_user_uuid = %source.uuid,
            target_user_uuid = %target,
            bidirectional,
            "Connection deleted"
        );
        Ok(())
    }
}
