use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{RepoError, UsersRepo};
use crate::domain::entities::UserRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    created_at: OffsetDateTime,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UserRecord::from))
    }
}
