pub mod auth;
pub mod error;
pub mod feed;
pub mod follow;
pub mod pagination;
pub mod repos;
pub mod timeline;
