use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{GroupsRepo, RepoError};
use crate::domain::entities::GroupRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    slug: String,
    title: String,
    description: String,
    created_at: OffsetDateTime,
}

impl From<GroupRow> for GroupRecord {
    fn from(row: GroupRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl GroupsRepo for PostgresRepositories {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<GroupRecord>, RepoError> {
        let row = sqlx::query_as::<_, GroupRow>(
            "SELECT id, slug, title, description, created_at FROM \"groups\" WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(GroupRecord::from))
    }

    async fn list_groups(&self) -> Result<Vec<GroupRecord>, RepoError> {
        let rows = sqlx::query_as::<_, GroupRow>(
            "SELECT id, slug, title, description, created_at FROM \"groups\" ORDER BY title, slug",
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(GroupRecord::from).collect())
    }
}
