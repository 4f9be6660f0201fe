use async_trait::async_trait;
use sqlx::QueryBuilder;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::PageWindow;
use crate::application::repos::{
    CreatePostParams, PostListScope, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::{PostFeedItem, PostRecord};

use super::PostgresRepositories;
use super::util::map_sqlx_error;

const FEED_PROJECTION: &str = "SELECT p.id, p.text, p.author_id, u.username AS author_username, \
     g.slug AS group_slug, g.title AS group_title, p.image, p.created_at \
     FROM posts p \
     INNER JOIN users u ON u.id = p.author_id \
     LEFT JOIN \"groups\" g ON g.id = p.group_id \
     WHERE 1=1 ";

#[derive(sqlx::FromRow)]
struct PostFeedRow {
    id: Uuid,
    text: String,
    author_id: Uuid,
    author_username: String,
    group_slug: Option<String>,
    group_title: Option<String>,
    image: Option<String>,
    created_at: OffsetDateTime,
}

impl From<PostFeedRow> for PostFeedItem {
    fn from(row: PostFeedRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author_id: row.author_id,
            author_username: row.author_username,
            group_slug: row.group_slug,
            group_title: row.group_title,
            image: row.image,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    text: String,
    author_id: Uuid,
    group_id: Option<Uuid>,
    image: Option<String>,
    created_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author_id: row.author_id,
            group_id: row.group_id,
            image: row.image,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_feed(
        &self,
        scope: &PostListScope,
        window: PageWindow,
    ) -> Result<Vec<PostFeedItem>, RepoError> {
        let mut qb = QueryBuilder::new(FEED_PROJECTION);
        Self::apply_scope_conditions(&mut qb, scope);

        qb.push(" ORDER BY p.created_at DESC, p.id DESC ");
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(window.limit));
        qb.push(" OFFSET ");
        qb.push_bind(i64::try_from(window.offset).unwrap_or(i64::MAX));

        let rows: Vec<PostFeedRow> = qb
            .build_query_as::<PostFeedRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostFeedItem::from).collect())
    }

    async fn count_feed(&self, scope: &PostListScope) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p WHERE 1=1 ");
        Self::apply_scope_conditions(&mut qb, scope);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, text, author_id, group_id, image, created_at \
             FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn find_feed_item(&self, id: Uuid) -> Result<Option<PostFeedItem>, RepoError> {
        let mut qb = QueryBuilder::new(FEED_PROJECTION);
        qb.push(" AND p.id = ");
        qb.push_bind(id);

        let row = qb
            .build_query_as::<PostFeedRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostFeedItem::from))
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostFeedItem, RepoError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO posts (id, text, author_id, group_id, image, created_at) \
             VALUES ($1, $2, $3, $4, $5, now()) \
             RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(&params.text)
        .bind(params.author_id)
        .bind(params.group_id)
        .bind(&params.image)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        self.find_feed_item(id).await?.ok_or(RepoError::NotFound)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostFeedItem, RepoError> {
        let updated = sqlx::query(
            "UPDATE posts SET text = $2, group_id = $3, image = $4 WHERE id = $1",
        )
        .bind(params.id)
        .bind(&params.text)
        .bind(params.group_id)
        .bind(&params.image)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if updated.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.find_feed_item(params.id)
            .await?
            .ok_or(RepoError::NotFound)
    }
}
