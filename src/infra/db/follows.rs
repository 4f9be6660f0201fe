use async_trait::async_trait;
use uuid::Uuid;

use crate::application::repos::{FollowsRepo, RepoError};

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[async_trait]
impl FollowsRepo for PostgresRepositories {
    async fn insert_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError> {
        let inserted = sqlx::query(
            "INSERT INTO follows (follower_id, followed_id, created_at) \
             VALUES ($1, $2, now()) \
             ON CONFLICT (follower_id, followed_id) DO NOTHING",
        )
        .bind(follower)
        .bind(followed)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(inserted.rows_affected() > 0)
    }

    async fn delete_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError> {
        let deleted = sqlx::query(
            "DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower)
        .bind(followed)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(deleted.rows_affected() > 0)
    }

    async fn is_following(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower)
        .bind(followed)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(exists)
    }

    async fn list_followed_ids(&self, follower: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT followed_id FROM follows WHERE follower_id = $1 ORDER BY created_at, followed_id",
        )
        .bind(follower)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
