//! Follow-graph laws: idempotent edges, no self-loops, auth boundary.

mod common;

use brusio::application::auth::RequestUser;
use brusio::application::follow::FollowError;

use common::MemoryStore;

#[tokio::test]
async fn follow_then_is_following_holds() {
    let store = MemoryStore::new();
    let a = store.add_user("a");
    let b = store.add_user("b");

    let service = common::follow_service(&store);
    service
        .follow(&RequestUser::Authenticated(a.clone()), "b")
        .await
        .expect("follow");

    assert!(service.is_following(a.id, b.id).await.expect("query"));
    assert!(!service.is_following(b.id, a.id).await.expect("query"));
}

#[tokio::test]
async fn unfollow_then_is_following_is_false() {
    let store = MemoryStore::new();
    let a = store.add_user("a");
    let b = store.add_user("b");

    let service = common::follow_service(&store);
    let actor = RequestUser::Authenticated(a.clone());
    service.follow(&actor, "b").await.expect("follow");
    service.unfollow(&actor, "b").await.expect("unfollow");

    assert!(!service.is_following(a.id, b.id).await.expect("query"));
}

#[tokio::test]
async fn unfollowing_a_missing_edge_is_a_no_op() {
    let store = MemoryStore::new();
    let a = store.add_user("a");
    store.add_user("b");

    common::follow_service(&store)
        .unfollow(&RequestUser::Authenticated(a), "b")
        .await
        .expect("no-op unfollow");
}

#[tokio::test]
async fn self_follow_never_changes_graph_state() {
    let store = MemoryStore::new();
    let a = store.add_user("a");

    let service = common::follow_service(&store);
    service
        .follow(&RequestUser::Authenticated(a.clone()), "a")
        .await
        .expect("silent no-op");

    assert!(!service.is_following(a.id, a.id).await.expect("query"));
    assert!(
        service
            .following_sources(a.id)
            .await
            .expect("sources")
            .is_empty()
    );
}

#[tokio::test]
async fn double_follow_is_idempotent() {
    let store = MemoryStore::new();
    let a = store.add_user("a");
    let b = store.add_user("b");

    let service = common::follow_service(&store);
    let actor = RequestUser::Authenticated(a.clone());
    service.follow(&actor, "b").await.expect("first follow");
    service.follow(&actor, "b").await.expect("second follow");

    let sources = service.following_sources(a.id).await.expect("sources");
    assert_eq!(sources, vec![b.id]);
}

#[tokio::test]
async fn following_sources_list_every_followed_user() {
    let store = MemoryStore::new();
    let a = store.add_user("a");
    let b = store.add_user("b");
    let c = store.add_user("c");

    let service = common::follow_service(&store);
    let actor = RequestUser::Authenticated(a.clone());
    service.follow(&actor, "b").await.expect("follow b");
    service.follow(&actor, "c").await.expect("follow c");

    let mut sources = service.following_sources(a.id).await.expect("sources");
    sources.sort();
    let mut expected = vec![b.id, c.id];
    expected.sort();
    assert_eq!(sources, expected);
}

#[tokio::test]
async fn anonymous_follow_is_unauthorized() {
    let store = MemoryStore::new();
    store.add_user("b");

    let err = common::follow_service(&store)
        .follow(&RequestUser::Anonymous, "b")
        .await
        .expect_err("anonymous rejected");
    assert!(matches!(err, FollowError::Unauthorized));

    let err = common::follow_service(&store)
        .unfollow(&RequestUser::Anonymous, "b")
        .await
        .expect_err("anonymous rejected");
    assert!(matches!(err, FollowError::Unauthorized));
}

#[tokio::test]
async fn following_an_unknown_user_is_not_found() {
    let store = MemoryStore::new();
    let a = store.add_user("a");

    let err = common::follow_service(&store)
        .follow(&RequestUser::Authenticated(a), "ghost")
        .await
        .expect_err("unknown target");
    assert!(matches!(err, FollowError::UnknownUser));
}
