//! Follow graph: directed edges between users.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::application::auth::RequestUser;
use crate::application::repos::{FollowsRepo, RepoError, UsersRepo};

#[derive(Debug, Error)]
pub enum FollowError {
    #[error("authentication required")]
    Unauthorized,
    #[error("unknown user")]
    UnknownUser,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct FollowService {
    users: Arc<dyn UsersRepo>,
    follows: Arc<dyn FollowsRepo>,
}

impl FollowService {
    pub fn new(users: Arc<dyn UsersRepo>, follows: Arc<dyn FollowsRepo>) -> Self {
        Self { users, follows }
    }

    /// Create a follow edge from `actor` to `target_username`.
    ///
    /// Self-follow and duplicate follow are silent no-ops; the operation is
    /// an idempotent upsert with no error path of its own.
    pub async fn follow(
        &self,
        actor: &RequestUser,
        target_username: &str,
    ) -> Result<(), FollowError> {
        let follower = actor.id().ok_or(FollowError::Unauthorized)?;
        let target = self.resolve(target_username).await?;

        if follower == target {
            debug!(target_username, "ignoring self-follow");
            return Ok(());
        }

        let inserted = self.follows.insert_follow(follower, target).await?;
        if inserted {
            metrics::counter!("brusio_follow_created_total").increment(1);
        }
        Ok(())
    }

    /// Remove the edge from `actor` to `target_username` if present.
    /// Removing a missing edge is a no-op.
    pub async fn unfollow(
        &self,
        actor: &RequestUser,
        target_username: &str,
    ) -> Result<(), FollowError> {
        let follower = actor.id().ok_or(FollowError::Unauthorized)?;
        let target = self.resolve(target_username).await?;

        let removed = self.follows.delete_follow(follower, target).await?;
        if removed {
            metrics::counter!("brusio_follow_removed_total").increment(1);
        }
        Ok(())
    }

    pub async fn is_following(&self, follower: Uuid, target: Uuid) -> Result<bool, FollowError> {
        self.follows
            .is_following(follower, target)
            .await
            .map_err(FollowError::from)
    }

    /// All users `user` follows; the author filter of the following feed.
    pub async fn following_sources(&self, user: Uuid) -> Result<Vec<Uuid>, FollowError> {
        self.follows
            .list_followed_ids(user)
            .await
            .map_err(FollowError::from)
    }

    async fn resolve(&self, username: &str) -> Result<Uuid, FollowError> {
        Ok(self
            .users
            .find_by_username(username)
            .await?
            .ok_or(FollowError::UnknownUser)?
            .id)
    }
}
