//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Display projection of a post: the post plus the author and group fields
/// feed views need, produced by a single joined query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostFeedItem {
    pub id: Uuid,
    pub text: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub group_slug: Option<String>,
    pub group_title: Option<String>,
    pub image: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub text: String,
    pub created_at: OffsetDateTime,
}

/// Directed follow edge. At most one edge per (follower, followed) pair;
/// never a self-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowRecord {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
}
