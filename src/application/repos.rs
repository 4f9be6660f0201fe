//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::PageWindow;
use crate::domain::entities::{
    CommentRecord, GroupRecord, PostFeedItem, PostRecord, UserRecord,
};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Filter specification for post listings.
///
/// The feed layer resolves usernames, group slugs, and follow edges into
/// identifier-level scopes, so stores only ever see explicit filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostListScope {
    All,
    Group(Uuid),
    Author(Uuid),
    /// Posts by any of the given authors. Never empty: the feed layer
    /// short-circuits an empty source set before reaching the store.
    AuthorIn(Vec<Uuid>),
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub author_id: Uuid,
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
}

/// Full replacement write; the service resolves patch semantics before
/// calling the store.
#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError>;
}

#[async_trait]
pub trait GroupsRepo: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<GroupRecord>, RepoError>;

    async fn list_groups(&self) -> Result<Vec<GroupRecord>, RepoError>;
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Window of the feed for `scope`, newest first by creation time with
    /// id as the tie-breaker, projected for display.
    async fn list_feed(
        &self,
        scope: &PostListScope,
        window: PageWindow,
    ) -> Result<Vec<PostFeedItem>, RepoError>;

    async fn count_feed(&self, scope: &PostListScope) -> Result<u64, RepoError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;

    async fn find_feed_item(&self, id: Uuid) -> Result<Option<PostFeedItem>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostFeedItem, RepoError>;

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostFeedItem, RepoError>;
}

#[async_trait]
pub trait CommentsRepo: Send + Sync {
    /// Comments for a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>, RepoError>;

    async fn create_comment(&self, params: CreateCommentParams)
    -> Result<CommentRecord, RepoError>;
}

#[async_trait]
pub trait FollowsRepo: Send + Sync {
    /// Idempotent insert; returns true if a new edge was created.
    async fn insert_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError>;

    /// Idempotent delete; returns true if an edge was removed.
    async fn delete_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError>;

    async fn is_following(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError>;

    /// All users `follower` follows.
    async fn list_followed_ids(&self, follower: Uuid) -> Result<Vec<Uuid>, RepoError>;
}
