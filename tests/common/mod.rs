//! In-memory repositories for exercising the services without Postgres.

#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use brusio::application::feed::FeedService;
use brusio::application::follow::FollowService;
use brusio::application::pagination::PageWindow;
use brusio::application::repos::{
    CommentsRepo, CreateCommentParams, CreatePostParams, FollowsRepo, GroupsRepo, PostListScope,
    PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams, UsersRepo,
};
use brusio::application::timeline::TimelineService;
use brusio::cache::{CacheConfig, HomeFeedCache};
use brusio::domain::entities::{
    CommentRecord, FollowRecord, GroupRecord, PostFeedItem, PostRecord, UserRecord,
};
use brusio::infra::http::HttpState;

const BASE_TIME: OffsetDateTime = datetime!(2024-01-01 00:00:00 UTC);

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    groups: Vec<GroupRecord>,
    posts: Vec<PostRecord>,
    comments: Vec<CommentRecord>,
    follows: Vec<FollowRecord>,
    ticks: i64,
}

impl Inner {
    // Strictly increasing creation times keep feed order deterministic.
    fn next_time(&mut self) -> OffsetDateTime {
        self.ticks += 1;
        BASE_TIME + Duration::seconds(self.ticks)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, username: &str) -> UserRecord {
        let mut inner = self.inner.write().unwrap();
        let created_at = inner.next_time();
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at,
        };
        inner.users.push(user.clone());
        user
    }

    pub fn add_group(&self, slug: &str, title: &str) -> GroupRecord {
        let mut inner = self.inner.write().unwrap();
        let created_at = inner.next_time();
        let group = GroupRecord {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: title.to_string(),
            description: format!("{title} description"),
            created_at,
        };
        inner.groups.push(group.clone());
        group
    }

    pub fn add_post(&self, author: &UserRecord, text: &str, group: Option<&GroupRecord>) -> PostRecord {
        let mut inner = self.inner.write().unwrap();
        let created_at = inner.next_time();
        let post = PostRecord {
            id: Uuid::new_v4(),
            text: text.to_string(),
            author_id: author.id,
            group_id: group.map(|g| g.id),
            image: None,
            created_at,
        };
        inner.posts.push(post.clone());
        post
    }

    fn project(&self, post: &PostRecord) -> PostFeedItem {
        let inner = self.inner.read().unwrap();
        let author_username = inner
            .users
            .iter()
            .find(|user| user.id == post.author_id)
            .map(|user| user.username.clone())
            .unwrap_or_default();
        let group = post
            .group_id
            .and_then(|id| inner.groups.iter().find(|group| group.id == id));
        PostFeedItem {
            id: post.id,
            text: post.text.clone(),
            author_id: post.author_id,
            author_username,
            group_slug: group.map(|g| g.slug.clone()),
            group_title: group.map(|g| g.title.clone()),
            image: post.image.clone(),
            created_at: post.created_at,
        }
    }

    fn scoped_posts(&self, scope: &PostListScope) -> Vec<PostRecord> {
        let inner = self.inner.read().unwrap();
        let mut posts: Vec<PostRecord> = inner
            .posts
            .iter()
            .filter(|post| match scope {
                PostListScope::All => true,
                PostListScope::Group(group_id) => post.group_id == Some(*group_id),
                PostListScope::Author(author_id) => post.author_id == *author_id,
                PostListScope::AuthorIn(author_ids) => author_ids.contains(&post.author_id),
            })
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

#[async_trait]
impl UsersRepo for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepoError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users.iter().find(|user| user.id == id).cloned())
    }
}

#[async_trait]
impl GroupsRepo for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<GroupRecord>, RepoError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.groups.iter().find(|group| group.slug == slug).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<GroupRecord>, RepoError> {
        let inner = self.inner.read().unwrap();
        let mut groups = inner.groups.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.slug.cmp(&b.slug)));
        Ok(groups)
    }
}

#[async_trait]
impl PostsRepo for MemoryStore {
    async fn list_feed(
        &self,
        scope: &PostListScope,
        window: PageWindow,
    ) -> Result<Vec<PostFeedItem>, RepoError> {
        let posts = self.scoped_posts(scope);
        Ok(posts
            .iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(window.limit as usize)
            .map(|post| self.project(post))
            .collect())
    }

    async fn count_feed(&self, scope: &PostListScope) -> Result<u64, RepoError> {
        Ok(self.scoped_posts(scope).len() as u64)
    }

    async fn find_post(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn find_feed_item(&self, id: Uuid) -> Result<Option<PostFeedItem>, RepoError> {
        let post = {
            let inner = self.inner.read().unwrap();
            inner.posts.iter().find(|post| post.id == id).cloned()
        };
        Ok(post.map(|post| self.project(&post)))
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryStore {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostFeedItem, RepoError> {
        let post = {
            let mut inner = self.inner.write().unwrap();
            let created_at = inner.next_time();
            let post = PostRecord {
                id: Uuid::new_v4(),
                text: params.text,
                author_id: params.author_id,
                group_id: params.group_id,
                image: params.image,
                created_at,
            };
            inner.posts.push(post.clone());
            post
        };
        Ok(self.project(&post))
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostFeedItem, RepoError> {
        let post = {
            let mut inner = self.inner.write().unwrap();
            let post = inner
                .posts
                .iter_mut()
                .find(|post| post.id == params.id)
                .ok_or(RepoError::NotFound)?;
            post.text = params.text;
            post.group_id = params.group_id;
            post.image = params.image;
            post.clone()
        };
        Ok(self.project(&post))
    }
}

#[async_trait]
impl CommentsRepo for MemoryStore {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<CommentRecord>, RepoError> {
        let inner = self.inner.read().unwrap();
        let mut comments: Vec<CommentRecord> = inner
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn create_comment(
        &self,
        params: CreateCommentParams,
    ) -> Result<CommentRecord, RepoError> {
        let mut inner = self.inner.write().unwrap();
        let author_username = inner
            .users
            .iter()
            .find(|user| user.id == params.author_id)
            .map(|user| user.username.clone())
            .unwrap_or_default();
        let created_at = inner.next_time();
        let comment = CommentRecord {
            id: Uuid::new_v4(),
            post_id: params.post_id,
            author_id: params.author_id,
            author_username,
            text: params.text,
            created_at,
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl FollowsRepo for MemoryStore {
    async fn insert_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError> {
        let mut inner = self.inner.write().unwrap();
        let exists = inner
            .follows
            .iter()
            .any(|edge| edge.follower_id == follower && edge.followed_id == followed);
        if exists {
            return Ok(false);
        }
        inner.follows.push(FollowRecord {
            follower_id: follower,
            followed_id: followed,
        });
        Ok(true)
    }

    async fn delete_follow(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.follows.len();
        inner
            .follows
            .retain(|edge| !(edge.follower_id == follower && edge.followed_id == followed));
        Ok(inner.follows.len() < before)
    }

    async fn is_following(&self, follower: Uuid, followed: Uuid) -> Result<bool, RepoError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .follows
            .iter()
            .any(|edge| edge.follower_id == follower && edge.followed_id == followed))
    }

    async fn list_followed_ids(&self, follower: Uuid) -> Result<Vec<Uuid>, RepoError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .follows
            .iter()
            .filter(|edge| edge.follower_id == follower)
            .map(|edge| edge.followed_id)
            .collect())
    }
}

pub const TEST_PAGE_SIZE: u32 = 10;

pub fn feed_service(store: &Arc<MemoryStore>) -> FeedService {
    feed_service_with_page_size(store, TEST_PAGE_SIZE)
}

pub fn feed_service_with_page_size(store: &Arc<MemoryStore>, page_size: u32) -> FeedService {
    FeedService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        page_size,
    )
}

pub fn timeline_service(store: &Arc<MemoryStore>) -> TimelineService {
    TimelineService::new(store.clone(), store.clone(), store.clone(), store.clone())
}

pub fn follow_service(store: &Arc<MemoryStore>) -> FollowService {
    FollowService::new(store.clone(), store.clone())
}

pub fn http_state(store: &Arc<MemoryStore>, cache: CacheConfig) -> HttpState {
    HttpState {
        feed: Arc::new(feed_service(store)),
        timeline: Arc::new(timeline_service(store)),
        follows: Arc::new(follow_service(store)),
        users: store.clone(),
        home_cache: Arc::new(HomeFeedCache::new(&cache)),
        db: None,
    }
}
