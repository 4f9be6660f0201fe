//! brusio: a small self-hosted microblogging service.
//!
//! Users publish posts (optionally in a group, optionally with an image
//! reference), comment on posts, and follow authors. Feeds aggregate posts
//! by scope (home, group, profile, following), paginated by page number;
//! the home feed is served through a short-TTL single-slot cache.
//!
//! Layering follows the request path: `infra::http` handles the JSON
//! surface, `application` holds the feed/timeline/follow services and the
//! repository traits, `infra::db` implements those traits over Postgres,
//! and `cache` wraps the home-feed render.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
