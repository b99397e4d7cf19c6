//! Wardrobe hooks against a stateful backend over the reqwest transport.

mod common;

use closet::models::{NewWardrobeItem, WardrobeFilter, WardrobeItem};
use closet::queries::wardrobe_key;
use common::{backend_client, FakeBackend};

#[tokio::test]
async fn test_alice_adds_her_first_shirt() {
    let backend = FakeBackend::start().await;
    backend.add_account("alice", "pw");
    let (client, _dir) = backend_client(&backend.uri());

    let session = client.login("alice", "pw").await.unwrap();
    assert_eq!(session.user_id, "user-alice");

    assert!(client.wardrobe().fetch().await.unwrap().is_empty());

    client
        .wardrobe()
        .add_item(&NewWardrobeItem::new("shirt", "casual", "cold"))
        .await
        .unwrap();

    let items = client.wardrobe().fetch().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "shirt");
    assert_eq!(items[0].style, "casual");
    assert_eq!(items[0].weather, "cold");
}

#[tokio::test]
async fn test_mutation_sequence_matches_backend() {
    let backend = FakeBackend::start().await;
    backend.add_account("bea", "pw");
    let (client, _dir) = backend_client(&backend.uri());
    client.login("bea", "pw").await.unwrap();

    let shirt = client
        .wardrobe()
        .add_item(&NewWardrobeItem::new("shirt", "casual", "warm"))
        .await
        .unwrap();
    let jeans = client
        .wardrobe()
        .add_item(&NewWardrobeItem::new("jeans", "casual", "cold"))
        .await
        .unwrap();
    assert_eq!(client.wardrobe().fetch().await.unwrap().len(), 2);

    client.wardrobe().delete_item(&shirt.id).await.unwrap();
    client
        .wardrobe()
        .add_item(&NewWardrobeItem::new("skirt", "formal", "warm"))
        .await
        .unwrap();

    let items = client.wardrobe().fetch().await.unwrap();
    let categories: Vec<&str> = items.iter().map(|i| i.category.as_str()).collect();
    assert_eq!(categories, vec!["jeans", "skirt"]);
    assert_eq!(items[0].id, jeans.id);
    assert_eq!(items.len(), backend.wardrobe_of("user-bea").len());
}

#[tokio::test]
async fn test_reads_are_served_from_cache_until_invalidated() {
    let backend = FakeBackend::start().await;
    backend.add_account("cai", "pw");
    let (client, _dir) = backend_client(&backend.uri());
    client.login("cai", "pw").await.unwrap();

    client.wardrobe().fetch().await.unwrap();
    client.wardrobe().fetch().await.unwrap();
    let _ = client.wardrobe().current();
    assert_eq!(
        backend.requests_to("GET", "/api/users/user-cai/wardrobe").await,
        1
    );

    client
        .wardrobe()
        .add_item(&NewWardrobeItem::new("coat", "formal", "cold"))
        .await
        .unwrap();
    let items = client.wardrobe().fetch().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        backend.requests_to("GET", "/api/users/user-cai/wardrobe").await,
        2
    );

    let cached = client
        .cache()
        .peek::<Vec<WardrobeItem>>(&wardrobe_key("user-cai"));
    assert!(cached.is_success());
    assert!(!cached.is_stale);
}

#[tokio::test]
async fn test_deleting_unknown_item_reports_not_found() {
    let backend = FakeBackend::start().await;
    backend.add_account("dev", "pw");
    let (client, _dir) = backend_client(&backend.uri());
    client.login("dev", "pw").await.unwrap();

    let err = client.wardrobe().delete_item("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Item not found");
}

#[tokio::test]
async fn test_filter_is_case_insensitive() {
    let backend = FakeBackend::start().await;
    backend.add_account("eve", "pw");
    let (client, _dir) = backend_client(&backend.uri());
    client.login("eve", "pw").await.unwrap();

    for (category, style) in [("Shirt", "casual"), ("shirt", "formal"), ("jeans", "casual")] {
        client
            .wardrobe()
            .add_item(&NewWardrobeItem::new(category, style, "warm"))
            .await
            .unwrap();
    }

    let shirts = client
        .wardrobe()
        .filtered(&WardrobeFilter::new().category("SHIRT"))
        .await
        .unwrap();
    assert_eq!(shirts.len(), 2);

    let casual_shirts = client
        .wardrobe()
        .filtered(&WardrobeFilter::new().category("shirt").style("CASUAL"))
        .await
        .unwrap();
    assert_eq!(casual_shirts.len(), 1);
}
