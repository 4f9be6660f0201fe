//! Read-side handlers: feeds, post detail, group catalogue, health.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use crate::application::auth::RequestUser;
use crate::application::feed::{FeedKind, FeedPage};
use crate::application::timeline::PostDetail;
use crate::domain::entities::GroupRecord;

use super::HttpState;
use super::error::ApiError;

#[derive(Debug, Deserialize, Default)]
pub struct PageParams {
    pub page: Option<String>,
}

/// Home feed. The default view (no page token) is served through the
/// single-slot cache; explicit page requests always hit the store.
pub async fn index(
    State(state): State<HttpState>,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    if let Some(token) = params.page.as_deref() {
        let body = render_home(&state, Some(token)).await?;
        return Ok(json_body_response(body));
    }

    let compute_state = state.clone();
    let body = state
        .home_cache
        .get_or_compute(|| async move { render_home(&compute_state, None).await })
        .await?;
    Ok(json_body_response(body))
}

async fn render_home(state: &HttpState, token: Option<&str>) -> Result<Bytes, ApiError> {
    // The home feed is anonymous-safe: no per-user variation.
    let feed = state
        .feed
        .get_feed(FeedKind::Home, &RequestUser::Anonymous, token)
        .await?;
    let body = serde_json::to_vec(&feed)
        .map_err(|err| ApiError::internal(format!("failed to serialize home feed: {err}")))?;
    Ok(Bytes::from(body))
}

pub async fn group_feed(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<FeedPage>, ApiError> {
    let feed = state
        .feed
        .get_feed(
            FeedKind::Group { slug },
            &RequestUser::Anonymous,
            params.page.as_deref(),
        )
        .await?;
    Ok(Json(feed))
}

pub async fn profile_feed(
    State(state): State<HttpState>,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
    viewer: RequestUser,
) -> Result<Json<FeedPage>, ApiError> {
    let feed = state
        .feed
        .get_feed(
            FeedKind::Profile { username },
            &viewer,
            params.page.as_deref(),
        )
        .await?;
    Ok(Json(feed))
}

pub async fn following_feed(
    State(state): State<HttpState>,
    Query(params): Query<PageParams>,
    viewer: RequestUser,
) -> Result<Json<FeedPage>, ApiError> {
    let user_id = viewer.id().ok_or_else(ApiError::unauthorized)?;
    let feed = state
        .feed
        .get_feed(
            FeedKind::Following { user_id },
            &viewer,
            params.page.as_deref(),
        )
        .await?;
    Ok(Json(feed))
}

pub async fn post_detail(
    State(state): State<HttpState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostDetail>, ApiError> {
    let detail = state.timeline.post_detail(id).await?;
    Ok(Json(detail))
}

pub async fn groups_index(
    State(state): State<HttpState>,
) -> Result<Json<Vec<GroupRecord>>, ApiError> {
    let groups = state.feed.list_groups().await?;
    Ok(Json(groups))
}

pub async fn db_health(State(state): State<HttpState>) -> Response {
    let Some(db) = state.db.as_ref() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "no database configured").into_response();
    };

    match db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok").into_response(),
        Err(err) => {
            error!(error = %err, "database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable").into_response()
        }
    }
}

fn json_body_response(body: Bytes) -> Response {
    ([(CONTENT_TYPE, "application/json")], body).into_response()
}
