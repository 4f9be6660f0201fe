use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{CommentsRepo, CreateCommentParams, RepoError};
use crate::domain::entities::CommentRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

const COMMENT_PROJECTION: &str = "SELECT c.id, c.post_id, c.author_id, \
     u.username AS author_username, c.text, c.created_at \
     FROM comments c \
     INNER JOIN users u ON u.id = c.author_id ";

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author_username: String,
    text: String,
    created_at: OffsetDateTime,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            author_id: row.author_id,
            author_username: row.author_username,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CommentsRepo for PostgresRepositories {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>, RepoError> {
        let sql = format!("{COMMENT_PROJECTION} WHERE c.post_id = $1 ORDER BY c.created_at, c.id");
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_id)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }

    async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<CommentRecord, RepoError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO comments (id, post_id, author_id, text, created_at) \
             VALUES ($1, $2, $3, $4, now()) \
             RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(params.post_id)
        .bind(params.author_id)
        .bind(&params.text)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let sql = format!("{COMMENT_PROJECTION} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(CommentRecord::from(row))
    }
}
