//! Write-side handlers: posts, comments, follow edges, cache control.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::auth::RequestUser;
use crate::application::timeline::{EditPost, NewPost};
use crate::domain::entities::{CommentRecord, PostFeedItem};

use super::HttpState;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreatePostBody {
    pub text: String,
    pub group_slug: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EditPostBody {
    pub text: Option<String>,
    pub group_slug: Option<String>,
    #[serde(default)]
    pub clear_group: bool,
    pub image: Option<String>,
    #[serde(default)]
    pub clear_image: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentBody {
    pub text: String,
}

pub async fn create_post(
    State(state): State<HttpState>,
    actor: RequestUser,
    Json(body): Json<CreatePostBody>,
) -> Result<(StatusCode, Json<PostFeedItem>), ApiError> {
    let created = state
        .timeline
        .create_post(
            &actor,
            NewPost {
                text: body.text,
                group_slug: body.group_slug,
                image: body.image,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn edit_post(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
    actor: RequestUser,
    Json(body): Json<EditPostBody>,
) -> Result<Json<PostFeedItem>, ApiError> {
    let updated = state
        .timeline
        .edit_post(
            &actor,
            id,
            EditPost {
                text: body.text,
                group_slug: body.group_slug,
                clear_group: body.clear_group,
                image: body.image,
                clear_image: body.clear_image,
            },
        )
        .await?;
    Ok(Json(updated))
}

pub async fn add_comment(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
    actor: RequestUser,
    Json(body): Json<CreateCommentBody>,
) -> Result<(StatusCode, Json<CommentRecord>), ApiError> {
    let comment = state.timeline.add_comment(&actor, id, body.text).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn follow_user(
    State(state): State<HttpState>,
    Path(username): Path<String>,
    actor: RequestUser,
) -> Result<StatusCode, ApiError> {
    state.follows.follow(&actor, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unfollow_user(
    State(state): State<HttpState>,
    Path(username): Path<String>,
    actor: RequestUser,
) -> Result<StatusCode, ApiError> {
    state.follows.unfollow(&actor, &username).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drop the cached home snapshot so the next request re-renders.
pub async fn invalidate_home_cache(State(state): State<HttpState>) -> StatusCode {
    state.home_cache.invalidate();
    StatusCode::NO_CONTENT
}
