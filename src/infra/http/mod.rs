//! HTTP surface: JSON feed API consumed by the rendering layer.

pub mod auth;
pub mod error;
mod public;
mod writes;

pub use auth::SESSION_USER_HEADER;
pub use error::{ApiError, ApiErrorBody};

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::application::feed::FeedService;
use crate::application::follow::FollowService;
use crate::application::repos::UsersRepo;
use crate::application::timeline::TimelineService;
use crate::cache::HomeFeedCache;
use crate::infra::db::PostgresRepositories;

#[derive(Clone)]
pub struct HttpState {
    pub feed: Arc<FeedService>,
    pub timeline: Arc<TimelineService>,
    pub follows: Arc<FollowService>,
    pub users: Arc<dyn UsersRepo>,
    pub home_cache: Arc<HomeFeedCache>,
    /// Present in production wiring; absent when the state is assembled
    /// over non-Postgres repositories (the health probe then reports 503).
    pub db: Option<Arc<PostgresRepositories>>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(public::index))
        .route("/groups", get(public::groups_index))
        .route("/group/{slug}", get(public::group_feed))
        .route("/profile/{username}", get(public::profile_feed))
        .route("/follow", get(public::following_feed))
        .route("/posts", post(writes::create_post))
        .route(
            "/posts/{id}",
            get(public::post_detail).patch(writes::edit_post),
        )
        .route("/posts/{id}/comments", post(writes::add_comment))
        .route(
            "/profile/{username}/follow",
            put(writes::follow_user).delete(writes::unfollow_user),
        )
        .route("/cache/home/invalidate", post(writes::invalidate_home_cache))
        .route("/_health/db", get(public::db_health))
        .with_state(state)
}
