//! Post and comment lifecycle: create, edit, comment, detail.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::application::auth::RequestUser;
use crate::application::repos::{
    CommentsRepo, CreateCommentParams, CreatePostParams, GroupsRepo, PostsRepo, PostsWriteRepo,
    RepoError, UpdatePostParams,
};
use crate::domain::entities::{CommentRecord, PostFeedItem};
use crate::domain::error::DomainError;
use crate::domain::posts::{validate_image, validate_text};

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("authentication required")]
    Unauthorized,
    #[error("unknown post")]
    UnknownPost,
    #[error("unknown group slug")]
    UnknownGroup,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub text: String,
    pub group_slug: Option<String>,
    pub image: Option<String>,
}

/// Patch for an existing post. Absent fields keep their current value;
/// the `clear_*` flags drop the optional associations.
#[derive(Debug, Clone, Default)]
pub struct EditPost {
    pub text: Option<String>,
    pub group_slug: Option<String>,
    pub clear_group: bool,
    pub image: Option<String>,
    pub clear_image: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: PostFeedItem,
    pub comments: Vec<CommentRecord>,
}

#[derive(Clone)]
pub struct TimelineService {
    posts: Arc<dyn PostsRepo>,
    posts_write: Arc<dyn PostsWriteRepo>,
    groups: Arc<dyn GroupsRepo>,
    comments: Arc<dyn CommentsRepo>,
}

impl TimelineService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        posts_write: Arc<dyn PostsWriteRepo>,
        groups: Arc<dyn GroupsRepo>,
        comments: Arc<dyn CommentsRepo>,
    ) -> Self {
        Self {
            posts,
            posts_write,
            groups,
            comments,
        }
    }

    pub async fn create_post(
        &self,
        actor: &RequestUser,
        new_post: NewPost,
    ) -> Result<PostFeedItem, TimelineError> {
        let author = actor.user().ok_or(TimelineError::Unauthorized)?;
        validate_text(&new_post.text)?;
        validate_image(new_post.image.as_deref())?;

        let group_id = match new_post.group_slug.as_deref() {
            Some(slug) => Some(self.resolve_group(slug).await?),
            None => None,
        };

        let created = self
            .posts_write
            .create_post(CreatePostParams {
                author_id: author.id,
                text: new_post.text,
                group_id,
                image: new_post.image,
            })
            .await?;

        info!(post_id = %created.id, author = %author.username, "post created");
        Ok(created)
    }

    /// Apply a patch to a post. Only the author may edit; the creation
    /// timestamp is never touched.
    pub async fn edit_post(
        &self,
        actor: &RequestUser,
        post_id: Uuid,
        patch: EditPost,
    ) -> Result<PostFeedItem, TimelineError> {
        let editor = actor.user().ok_or(TimelineError::Unauthorized)?;
        let current = self
            .posts
            .find_post(post_id)
            .await?
            .ok_or(TimelineError::UnknownPost)?;

        if current.author_id != editor.id {
            return Err(TimelineError::Unauthorized);
        }

        let text = patch.text.unwrap_or(current.text);
        validate_text(&text)?;

        let group_id = if patch.clear_group {
            None
        } else {
            match patch.group_slug.as_deref() {
                Some(slug) => Some(self.resolve_group(slug).await?),
                None => current.group_id,
            }
        };

        let image = if patch.clear_image {
            None
        } else {
            match patch.image {
                Some(image) => {
                    validate_image(Some(image.as_str()))?;
                    Some(image)
                }
                None => current.image,
            }
        };

        let updated = self
            .posts_write
            .update_post(UpdatePostParams {
                id: post_id,
                text,
                group_id,
                image,
            })
            .await?;

        info!(post_id = %post_id, editor = %editor.username, "post edited");
        Ok(updated)
    }

    pub async fn add_comment(
        &self,
        actor: &RequestUser,
        post_id: Uuid,
        text: String,
    ) -> Result<CommentRecord, TimelineError> {
        let author = actor.user().ok_or(TimelineError::Unauthorized)?;
        validate_text(&text)?;

        if self.posts.find_post(post_id).await?.is_none() {
            return Err(TimelineError::UnknownPost);
        }

        let comment = self
            .comments
            .create_comment(CreateCommentParams {
                post_id,
                author_id: author.id,
                text,
            })
            .await?;

        Ok(comment)
    }

    /// A post with its comments, oldest comment first.
    pub async fn post_detail(&self, post_id: Uuid) -> Result<PostDetail, TimelineError> {
        let post = self
            .posts
            .find_feed_item(post_id)
            .await?
            .ok_or(TimelineError::UnknownPost)?;
        let comments = self.comments.list_for_post(post_id).await?;
        Ok(PostDetail { post, comments })
    }

    async fn resolve_group(&self, slug: &str) -> Result<Uuid, TimelineError> {
        Ok(self
            .groups
            .find_by_slug(slug)
            .await?
            .ok_or(TimelineError::UnknownGroup)?
            .id)
    }
}
