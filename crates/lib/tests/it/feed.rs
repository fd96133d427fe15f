//! Feed tests.

use amity::events::Event;

use crate::helpers::{RecordingSubscriber, register_and_login, test_api};

#[tokio::test]
async fn posting_requires_a_session() {
    let api = test_api().await;
    let err = api.feed().post("hello").await.unwrap_err();
    assert!(err.is_no_session_error());
}

#[tokio::test]
async fn post_then_get_roundtrip() {
    let api = test_api().await;
    register_and_login(&api, "alice").await;

    let recorder = RecordingSubscriber::new();
    api.subscribe(recorder.clone());

    let post = api.feed().post("hello").await.unwrap();
    assert_eq!(post.author, "alice");
    assert_eq!(post.body, "hello");
    assert_eq!(post.id, format!("p{}", post.created_at));

    assert_eq!(api.feed().get_post(&post.id).await.unwrap(), post);
    assert!(matches!(&recorder.events()[0], Event::NewPost(p) if p.id == post.id));
}

#[tokio::test]
async fn get_unknown_post_fails() {
    let api = test_api().await;
    let err = api.feed().get_post("p0").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "The post couldn't be found");
}

#[tokio::test]
async fn user_posts_filters_by_author() {
    let api = test_api().await;
    register_and_login(&api, "bob").await;
    api.feed().post("from bob").await.unwrap();
    api.session().logout().await.unwrap();

    register_and_login(&api, "alice").await;
    api.feed().post("one").await.unwrap();
    api.feed().post("two").await.unwrap();

    // None means the session user.
    let own = api.feed().user_posts(None).await.unwrap();
    let bodies: Vec<&str> = own.iter().map(|p| p.body.as_str()).collect();
    assert_eq!(bodies, vec!["one", "two"]);

    let bobs = api.feed().user_posts(Some("bob")).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].body, "from bob");
}

#[tokio::test]
async fn user_posts_for_unknown_author_fails() {
    let api = test_api().await;
    register_and_login(&api, "alice").await;

    let err = api.feed().user_posts(Some("nobody")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Invalid username in operation");
}

#[tokio::test]
async fn user_posts_without_session_or_author_fails() {
    let api = test_api().await;
    let err = api.feed().user_posts(None).await.unwrap_err();
    assert!(err.is_no_session_error());
}

#[tokio::test]
async fn user_with_no_posts_yields_empty_vec() {
    let api = test_api().await;
    register_and_login(&api, "alice").await;
    assert!(api.feed().user_posts(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn feed_aggregates_own_and_friends_posts() {
    let api = test_api().await;

    register_and_login(&api, "bob").await;
    api.feed().post("from bob").await.unwrap();
    api.session().logout().await.unwrap();

    register_and_login(&api, "carol").await;
    api.feed().post("from carol").await.unwrap();
    api.session().logout().await.unwrap();

    register_and_login(&api, "alice").await;
    api.graph().add_friend("bob").await.unwrap();
    api.graph().add_friend("carol").await.unwrap();
    api.feed().post("hello").await.unwrap();

    // Own posts first, then each friend's in friends-list order.
    let feed = api.feed().feed().await.unwrap();
    let entries: Vec<(&str, &str)> = feed
        .iter()
        .map(|p| (p.author.as_str(), p.body.as_str()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("alice", "hello"),
            ("bob", "from bob"),
            ("carol", "from carol"),
        ]
    );
}

#[tokio::test]
async fn duplicated_friend_contributes_posts_once() {
    let api = test_api().await;

    register_and_login(&api, "bob").await;
    api.feed().post("from bob").await.unwrap();
    api.session().logout().await.unwrap();

    register_and_login(&api, "alice").await;
    api.graph().add_friend("bob").await.unwrap();
    let user = api.graph().add_friend("bob").await.unwrap();
    assert_eq!(user.friends, vec!["bob", "bob"]);

    let feed = api.feed().feed().await.unwrap();
    let bob_posts = feed.iter().filter(|p| p.author == "bob").count();
    assert_eq!(bob_posts, 1);
}

#[tokio::test]
async fn feed_requires_a_session() {
    let api = test_api().await;
    let err = api.feed().feed().await.unwrap_err();
    assert!(err.is_no_session_error());
}

#[tokio::test]
async fn feed_excludes_non_friends() {
    let api = test_api().await;

    register_and_login(&api, "mallory").await;
    api.feed().post("unrelated").await.unwrap();
    api.session().logout().await.unwrap();

    register_and_login(&api, "alice").await;
    api.feed().post("hello").await.unwrap();

    let feed = api.feed().feed().await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].author, "alice");
}
