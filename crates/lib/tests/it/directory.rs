//! User directory tests.

use amity::{
    directory::{SearchCriteria, User, UserPatch},
    events::Event,
};

use crate::helpers::{RecordingSubscriber, register, test_api};

#[tokio::test]
async fn add_then_get_returns_full_record() {
    let api = test_api().await;
    register(&api, "alice").await;

    let user = api.directory().get_user("alice").await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.password, "pw-alice");
    assert_eq!(user.name, "Name alice");
    assert_eq!(user.email, "alice@example.com");
    assert!(user.friends.is_empty());
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let api = test_api().await;
    register(&api, "alice").await;

    let err = api
        .directory()
        .add_user(User::new("alice", "other", "Other", "o@x.com"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "The user already exists");

    // The original record is untouched.
    let user = api.directory().get_user("alice").await.unwrap();
    assert_eq!(user.password, "pw-alice");
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let api = test_api().await;
    let err = api.directory().get_user("nobody").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Invalid username in operation");
}

#[tokio::test]
async fn update_merges_only_set_fields() {
    let api = test_api().await;
    register(&api, "alice").await;

    let patch = UserPatch {
        email: Some("new@example.com".to_string()),
        ..UserPatch::for_user("alice")
    };
    let merged = api.directory().update_user(patch).await.unwrap();

    assert_eq!(merged.email, "new@example.com");
    assert_eq!(merged.name, "Name alice");
    assert_eq!(merged.password, "pw-alice");
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let api = test_api().await;
    let err = api
        .directory()
        .update_user(UserPatch::for_user("nobody"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_emits_user_updated() {
    let api = test_api().await;
    register(&api, "alice").await;

    let recorder = RecordingSubscriber::new();
    api.subscribe(recorder.clone());

    let patch = UserPatch {
        name: Some("Alice B".to_string()),
        ..UserPatch::for_user("alice")
    };
    api.directory().update_user(patch).await.unwrap();

    let events = recorder.events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        Event::UserUpdated(user) => assert_eq!(user.name, "Alice B"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn search_matches_username_name_and_email() {
    let api = test_api().await;
    register(&api, "alice").await;
    register(&api, "bob").await;
    register(&api, "carol").await;

    // Empty query returns everyone, ordered by username.
    let all = api
        .directory()
        .search_user(&SearchCriteria::default())
        .await
        .unwrap();
    let usernames: Vec<&str> = all.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["alice", "bob", "carol"]);

    // Case-insensitive substring over username.
    let matched = api
        .directory()
        .search_user(&SearchCriteria::query("ALI"))
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].username, "alice");

    // Substring over email.
    let matched = api
        .directory()
        .search_user(&SearchCriteria::query("bob@example"))
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].username, "bob");

    // No match is an empty vec, not an error.
    let matched = api
        .directory()
        .search_user(&SearchCriteria::query("zebra"))
        .await
        .unwrap();
    assert!(matched.is_empty());
}

#[tokio::test]
async fn search_results_never_carry_a_password() {
    let api = test_api().await;
    register(&api, "alice").await;

    let matched = api
        .directory()
        .search_user(&SearchCriteria::query("alice"))
        .await
        .unwrap();
    let json = serde_json::to_string(&matched).unwrap();
    assert!(!json.contains("pw-alice"));
    assert!(!json.contains("__password"));
}
