//! Integration tests for the overlay store adapter.
//!
//! Exercises `OverlayRepo` against a real database:
//! - Create then fetch round trip with server-assigned fields
//! - Partial update semantics and `updated_at` refresh
//! - Idempotent delete and bulk delete by stream
//! - Malformed vs absent identifiers

use assert_matches::assert_matches;
use serde_json::json;
use rtspio_core::overlay::{CreateOverlay, UpdateOverlay};
use sqlx::PgPool;
use rtspio_db::repositories::OverlayRepo;
use rtspio_db::StoreError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_overlay(stream_id: &str, content: &str) -> CreateOverlay {
    CreateOverlay {
        stream_id: stream_id.to_string(),
        overlay_type: json!("text"),
        content: json!(content),
        position: json!({ "x": 5, "y": 5 }),
        size: json!({ "w": 100, "h": 30 }),
        z_index: json!(1),
        visible: json!(true),
        style: json!({}),
    }
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_then_find_returns_same_values(pool: PgPool) {
    let mut input = new_overlay("cam-1", "LIVE");
    input.style = json!({ "color": "red", "fontSize": 18 });
    input.z_index = json!(4);

    let created = OverlayRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.stream_id, "cam-1");
    assert_eq!(created.created_at, created.updated_at);

    let fetched = OverlayRepo::find_by_id(&pool, &created.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.overlay_type, "text");
    assert_eq!(fetched.content, json!("LIVE"));
    assert_eq!(fetched.position, json!({ "x": 5, "y": 5 }));
    assert_eq!(fetched.size, json!({ "w": 100, "h": 30 }));
    assert_eq!(fetched.z_index, json!(4));
    assert_eq!(fetched.visible, json!(true));
    assert_eq!(fetched.style, json!({ "color": "red", "fontSize": 18 }));
}

#[sqlx::test(migrations = "./migrations")]
async fn find_distinguishes_malformed_from_absent(pool: PgPool) {
    assert_matches!(
        OverlayRepo::find_by_id(&pool, "xyz").await,
        Err(StoreError::InvalidId(_))
    );

    let absent = uuid::Uuid::now_v7().to_string();
    assert_matches!(
        OverlayRepo::find_by_id(&pool, &absent).await,
        Err(StoreError::NotFound(_))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_stream(pool: PgPool) {
    OverlayRepo::create(&pool, &new_overlay("a", "one")).await.unwrap();
    OverlayRepo::create(&pool, &new_overlay("a", "two")).await.unwrap();
    OverlayRepo::create(&pool, &new_overlay("b", "three")).await.unwrap();

    let a = OverlayRepo::list_by_stream(&pool, "a").await.unwrap();
    assert_eq!(a.len(), 2);
    assert!(a.iter().all(|o| o.stream_id == "a"));

    let empty = OverlayRepo::list_by_stream(&pool, "nothing-here").await.unwrap();
    assert!(empty.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn non_string_scalars_round_trip(pool: PgPool) {
    let mut input = new_overlay("cam-1", "LIVE");
    input.overlay_type = json!(5);
    input.z_index = json!(2.5);
    input.content = json!({ "lines": ["a", null, 3] });

    let created = OverlayRepo::create(&pool, &input).await.unwrap();
    let fetched = OverlayRepo::find_by_id(&pool, &created.id.to_string())
        .await
        .unwrap();
    assert_eq!(fetched.overlay_type, json!(5));
    assert_eq!(fetched.z_index, json!(2.5));
    assert_eq!(fetched.content, json!({ "lines": ["a", null, 3] }));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn update_changes_only_supplied_fields(pool: PgPool) {
    let created = OverlayRepo::create(&pool, &new_overlay("cam-1", "LIVE"))
        .await
        .unwrap();

    let patch = UpdateOverlay {
        visible: Some(json!(false)),
        position: Some(json!({ "x": 50, "y": 60 })),
        ..Default::default()
    };
    let updated = OverlayRepo::update(&pool, &created.id.to_string(), &patch)
        .await
        .unwrap();

    assert_eq!(updated.visible, json!(false));
    assert_eq!(updated.position, json!({ "x": 50, "y": 60 }));
    assert_eq!(updated.content, created.content);
    assert_eq!(updated.size, created.size);
    assert_eq!(updated.overlay_type, created.overlay_type);
    assert_eq!(updated.z_index, created.z_index);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn empty_update_still_refreshes_timestamp(pool: PgPool) {
    let created = OverlayRepo::create(&pool, &new_overlay("cam-1", "LIVE"))
        .await
        .unwrap();

    let updated = OverlayRepo::update(&pool, &created.id.to_string(), &UpdateOverlay::default())
        .await
        .unwrap();

    assert_eq!(updated.content, created.content);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_missing_overlay_is_not_found(pool: PgPool) {
    let absent = uuid::Uuid::now_v7().to_string();
    let patch = UpdateOverlay {
        visible: Some(json!(false)),
        ..Default::default()
    };
    assert_matches!(
        OverlayRepo::update(&pool, &absent, &patch).await,
        Err(StoreError::NotFound(_))
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn delete_is_idempotent(pool: PgPool) {
    let created = OverlayRepo::create(&pool, &new_overlay("cam-1", "LIVE"))
        .await
        .unwrap();
    let id = created.id.to_string();

    assert_eq!(OverlayRepo::delete(&pool, &id).await.unwrap(), 1);
    assert_eq!(OverlayRepo::delete(&pool, &id).await.unwrap(), 0);
    assert_matches!(
        OverlayRepo::find_by_id(&pool, &id).await,
        Err(StoreError::NotFound(_))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_by_stream_reports_count(pool: PgPool) {
    for content in ["a", "b", "c"] {
        OverlayRepo::create(&pool, &new_overlay("doomed", content))
            .await
            .unwrap();
    }
    OverlayRepo::create(&pool, &new_overlay("kept", "d")).await.unwrap();

    assert_eq!(OverlayRepo::delete_by_stream(&pool, "doomed").await.unwrap(), 3);
    assert_eq!(OverlayRepo::delete_by_stream(&pool, "doomed").await.unwrap(), 0);
    assert_eq!(OverlayRepo::list_by_stream(&pool, "kept").await.unwrap().len(), 1);
}
