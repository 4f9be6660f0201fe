//! Feed assembly: translate a feed request into a store query and a page.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::application::auth::RequestUser;
use crate::application::pagination::{Page, PageWindow, resolve_page_token};
use crate::application::repos::{
    FollowsRepo, GroupsRepo, PostListScope, PostsRepo, RepoError, UsersRepo,
};
use crate::domain::entities::{GroupRecord, PostFeedItem, UserRecord};

/// The four feed shapes. Scope parameters arrive as raw request input and
/// are resolved against the store here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedKind {
    Home,
    Group { slug: String },
    Profile { username: String },
    Following { user_id: Uuid },
}

/// A page of posts plus the scope metadata the view layer renders next to
/// it (group header, profile header with follow state).
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub page: Page<PostFeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_follows_author: Option<bool>,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("unknown group slug")]
    UnknownGroup,
    #[error("unknown user")]
    UnknownUser,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostsRepo>,
    users: Arc<dyn UsersRepo>,
    groups: Arc<dyn GroupsRepo>,
    follows: Arc<dyn FollowsRepo>,
    page_size: u32,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        users: Arc<dyn UsersRepo>,
        groups: Arc<dyn GroupsRepo>,
        follows: Arc<dyn FollowsRepo>,
        page_size: u32,
    ) -> Self {
        Self {
            posts,
            users,
            groups,
            follows,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Assemble one page of the requested feed, newest post first.
    pub async fn get_feed(
        &self,
        kind: FeedKind,
        viewer: &RequestUser,
        page_token: Option<&str>,
    ) -> Result<FeedPage, FeedError> {
        let page_index = resolve_page_token(page_token);

        let (scope, group, author) = match kind {
            FeedKind::Home => (PostListScope::All, None, None),
            FeedKind::Group { slug } => {
                let group = self
                    .groups
                    .find_by_slug(&slug)
                    .await?
                    .ok_or(FeedError::UnknownGroup)?;
                (PostListScope::Group(group.id), Some(group), None)
            }
            FeedKind::Profile { username } => {
                let author = self
                    .users
                    .find_by_username(&username)
                    .await?
                    .ok_or(FeedError::UnknownUser)?;
                (PostListScope::Author(author.id), None, Some(author))
            }
            FeedKind::Following { user_id } => {
                let sources = self.follows.list_followed_ids(user_id).await?;
                if sources.is_empty() {
                    // Zero follows means zero posts, not an error.
                    return Ok(FeedPage {
                        page: Page::assemble(Vec::new(), page_index, self.page_size, 0),
                        group: None,
                        author: None,
                        viewer_follows_author: None,
                    });
                }
                (PostListScope::AuthorIn(sources), None, None)
            }
        };

        let total = self.posts.count_feed(&scope).await?;
        let window = PageWindow::for_page(page_index, self.page_size);
        let items = self.posts.list_feed(&scope, window).await?;
        let page = Page::assemble(items, page_index, self.page_size, total);

        let viewer_follows_author = match (&author, viewer.id()) {
            (Some(author), Some(viewer_id)) if viewer_id != author.id => {
                Some(self.follows.is_following(viewer_id, author.id).await?)
            }
            (Some(_), _) => Some(false),
            (None, _) => None,
        };

        Ok(FeedPage {
            page,
            group,
            author,
            viewer_follows_author,
        })
    }

    /// Group catalogue for the group index view.
    pub async fn list_groups(&self) -> Result<Vec<GroupRecord>, FeedError> {
        self.groups.list_groups().await.map_err(FeedError::from)
    }
}
