//! Adapter and persistence tests.

use std::sync::Arc;

use amity::{
    Api,
    constants::{CURRENT_USER_KEY, POSTS_KEY, USERS_KEY},
    storage::{Adapter, InMemory},
};

use crate::helpers::{register_and_login, test_api_with_adapter};

#[tokio::test]
async fn state_persists_under_fixed_keys() {
    let (api, adapter) = test_api_with_adapter().await;
    register_and_login(&api, "alice").await;
    api.feed().post("hello").await.unwrap();

    let mut keys = adapter.all_keys();
    keys.sort();
    assert_eq!(keys, vec![CURRENT_USER_KEY, POSTS_KEY, USERS_KEY]);
}

#[tokio::test]
async fn file_snapshot_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("amity.json");

    let (api, adapter) = test_api_with_adapter().await;
    register_and_login(&api, "alice").await;
    let post = api.feed().post("hello").await.unwrap();
    adapter.save_to_file(&path).unwrap();

    // Reopen from the snapshot: users, session, and posts all survive.
    let restored = Arc::new(InMemory::load_from_file(&path).unwrap());
    let api = Api::open(restored).await.unwrap();

    let user = api.session().current_user().unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(api.feed().get_post(&post.id).await.unwrap(), post);
    assert_eq!(
        api.directory().get_user("alice").await.unwrap().password,
        "pw-alice"
    );
}

#[tokio::test]
async fn load_from_missing_file_yields_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = InMemory::load_from_file(dir.path().join("absent.json")).unwrap();
    assert!(adapter.is_empty());
}

#[tokio::test]
async fn reset_clears_memory_and_adapter() {
    let (api, adapter) = test_api_with_adapter().await;
    register_and_login(&api, "alice").await;
    api.feed().post("hello").await.unwrap();

    api.reset().await.unwrap();

    assert!(adapter.is_empty());
    assert!(api.session().current_user().is_none());
    let err = api.directory().get_user("alice").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn persisted_users_layout_uses_legacy_password_key() {
    let (api, adapter) = test_api_with_adapter().await;
    register_and_login(&api, "alice").await;

    let raw = adapter.get(USERS_KEY).await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["alice"]["__password"], "pw-alice");
    assert_eq!(value["alice"]["email"], "alice@example.com");
}
