//! Integration tests for the built-in `memory` context provider.
//!
//! The volatile backend honors the same provider surface as `plain-file`;
//! these tests exercise the shared semantics without touching the filesystem.

use context_store::{ContextProviders, Document, ProviderConfig};
use serde_json::json;

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().expect("expected a JSON object")
}

/// **Test: The memory backend is registered out of the box.**
///
/// **Setup:** Fresh factory.
/// **Action:** `has_provider("memory")` and `get_provider` with an empty config.
/// **Expected:** Both succeed; `get_or_create` resolves the defaults.
#[tokio::test]
async fn test_memory_provider_is_built_in() {
    let factory = ContextProviders::new();

    assert!(factory.has_provider("memory").await);
    let provider = factory
        .get_provider("memory", ProviderConfig::default())
        .await
        .expect("Failed to get provider");

    let context = provider
        .get_or_create(42, doc(json!({"myVariable": "initial value"})))
        .await
        .expect("Failed to get or create context");
    assert_eq!(context.get("myVariable").await, Some(json!("initial value")));
}

/// **Test: Full read/write surface on the memory provider.**
///
/// **Setup:** Context for id 42 with empty defaults.
/// **Action:** `set`, `set_many`, `get_many`, `remove`, `clear`.
/// **Expected:** Same semantics as the file provider.
#[tokio::test]
async fn test_memory_read_write_surface() {
    let factory = ContextProviders::new();
    let provider = factory
        .get_provider("memory", ProviderConfig::default())
        .await
        .expect("Failed to get provider");

    let context = provider
        .get_or_create(42, Document::new())
        .await
        .expect("Failed to get or create context");

    context.set("firstName", "Guidone").await.expect("Failed to set");
    context
        .set_many(doc(json!({"lastName": "Bellomo", "email": "some@email"})))
        .await
        .expect("Failed to set");

    assert_eq!(
        context.get_many(&["firstName", "lastName"]).await,
        doc(json!({"firstName": "Guidone", "lastName": "Bellomo"}))
    );

    context.remove(&["email"]).await.expect("Failed to remove");
    assert_eq!(context.get("email").await, None);

    context.clear().await.expect("Failed to clear");
    assert!(context.all().await.is_empty());
}

/// **Test: Repeated retrieval returns the same shared context.**
///
/// **Setup:** Materialize id 42, then retrieve it again with different defaults.
/// **Action:** `get_or_create(42, {other: true})` and `get(42)`.
/// **Expected:** Defaults are ignored on the hit; mutations through one
/// handle are visible through the others.
#[tokio::test]
async fn test_repeated_retrieval_shares_state() {
    let factory = ContextProviders::new();
    let provider = factory
        .get_provider("memory", ProviderConfig::default())
        .await
        .expect("Failed to get provider");

    let first = provider
        .get_or_create(42, doc(json!({"a": 1})))
        .await
        .expect("Failed to get or create context");
    let again = provider
        .get_or_create(42, doc(json!({"other": true})))
        .await
        .expect("Failed to get or create context");

    assert_eq!(again.get("other").await, None);
    assert_eq!(again.get("a").await, Some(json!(1)));

    first.set("b", 2).await.expect("Failed to set");
    let cached = provider.get(42).await.expect("Context not cached");
    assert_eq!(cached.get("b").await, Some(json!(2)));
}

/// **Test: Contexts for different ids are independent.**
///
/// **Setup:** Contexts for ids 1 and 2.
/// **Action:** Set different keys in each.
/// **Expected:** No bleed-through between entities.
#[tokio::test]
async fn test_different_ids_are_independent() {
    let factory = ContextProviders::new();
    let provider = factory
        .get_provider("memory", ProviderConfig::default())
        .await
        .expect("Failed to get provider");

    let one = provider
        .get_or_create(1, Document::new())
        .await
        .expect("Failed to get or create context");
    let two = provider
        .get_or_create(2, Document::new())
        .await
        .expect("Failed to get or create context");

    one.set("name", "first").await.expect("Failed to set");
    two.set("name", "second").await.expect("Failed to set");

    assert_eq!(one.get("name").await, Some(json!("first")));
    assert_eq!(two.get("name").await, Some(json!("second")));
}

/// **Test: delete evicts the id from the memory backend too.**
///
/// **Setup:** Materialized context for id 42.
/// **Action:** `delete(42)`, then `get_or_create` with fresh defaults.
/// **Expected:** The old data is gone; the new defaults win.
#[tokio::test]
async fn test_delete_then_recreate() {
    let factory = ContextProviders::new();
    let provider = factory
        .get_provider("memory", ProviderConfig::default())
        .await
        .expect("Failed to get provider");

    provider
        .get_or_create(42, doc(json!({"stale": true})))
        .await
        .expect("Failed to get or create context");
    provider.delete(42).await.expect("Failed to delete");

    let recreated = provider
        .get_or_create(42, doc(json!({"fresh": true})))
        .await
        .expect("Failed to get or create context");
    assert_eq!(recreated.get("stale").await, None);
    assert_eq!(recreated.get("fresh").await, Some(json!(true)));
}
