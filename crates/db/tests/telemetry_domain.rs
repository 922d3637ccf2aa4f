//! Integration tests for the telemetry domain repositories.
//!
//! Devices own collections of events; events carry a device-reported
//! reading time distinct from the record timestamps.

use assert_matches::assert_matches;
use chrono::TimeZone;
use skylane_core::error::CoreError;
use skylane_db::error::RepoError;
use skylane_db::models::device::{CreateDevice, UpdateDevice};
use skylane_db::models::event::{CreateEvent, EventListParams, UpdateEvent};
use skylane_db::repositories::{DeviceRepo, EventRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_device(tag: &str) -> CreateDevice {
    CreateDevice {
        device_id: Some(tag.to_string()),
        device_name: Some(format!("sensor {tag}")),
        ..Default::default()
    }
}

fn new_event(device: Option<Uuid>, event_type: &str, temperature: f64) -> CreateEvent {
    CreateEvent {
        device,
        event_type: Some(event_type.to_string()),
        temperature: Some(temperature),
        humidity: Some(40.0),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: Creation and reference validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_device_with_events(pool: PgPool) {
    let orphan = EventRepo::create(&pool, &new_event(None, "reading", 21.0))
        .await
        .unwrap();
    assert_eq!(orphan.device, None);

    let device = DeviceRepo::create(
        &pool,
        &CreateDevice {
            events: vec![orphan.id],
            ..new_device("dv-1")
        },
    )
    .await
    .unwrap();

    assert_eq!(device.device_id.as_deref(), Some("dv-1"));
    assert_eq!(device.events, vec![orphan.id]);

    let event = EventRepo::find_by_id(&pool, orphan.id).await.unwrap().unwrap();
    assert_eq!(event.device, Some(device.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_event_rejects_unknown_device(pool: PgPool) {
    let result = EventRepo::create(&pool, &new_event(Some(Uuid::now_v7()), "reading", 20.0)).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound {
            entity: "Device",
            ..
        }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_event_reading_time_round_trip(pool: PgPool) {
    let reading_time = chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
    let event = EventRepo::create(
        &pool,
        &CreateEvent {
            timestamp: Some(reading_time),
            ..new_event(None, "reading", 18.5)
        },
    )
    .await
    .unwrap();

    assert_eq!(event.timestamp, Some(reading_time));
    assert_eq!(event.temperature, Some(18.5));
    assert_eq!(event.humidity, Some(40.0));
}

// ---------------------------------------------------------------------------
// Test: Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_event_partial(pool: PgPool) {
    let event = EventRepo::create(&pool, &new_event(None, "reading", 21.5))
        .await
        .unwrap();

    let updated = EventRepo::update(
        &pool,
        event.id,
        &UpdateEvent {
            temperature: Some(25.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");

    assert_eq!(updated.temperature, Some(25.0));
    // Untouched fields keep their values.
    assert_eq!(updated.event_type.as_deref(), Some("reading"));
    assert_eq!(updated.humidity, Some(40.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_device_clears_events(pool: PgPool) {
    let device = DeviceRepo::create(&pool, &new_device("dv-2")).await.unwrap();
    let event = EventRepo::create(&pool, &new_event(Some(device.id), "reading", 19.0))
        .await
        .unwrap();

    let updated = DeviceRepo::update(
        &pool,
        device.id,
        &UpdateDevice {
            events: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");
    assert!(updated.events.is_empty());

    let event = EventRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(event.device, None);
}

// ---------------------------------------------------------------------------
// Test: Relation operations and scoped listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_connect_and_disconnect_events(pool: PgPool) {
    let device = DeviceRepo::create(&pool, &new_device("dv-3")).await.unwrap();
    let event = EventRepo::create(&pool, &new_event(None, "boot", 0.0))
        .await
        .unwrap();

    DeviceRepo::connect_events(&pool, device.id, &[event.id])
        .await
        .unwrap();
    let device_read = DeviceRepo::find_by_id(&pool, device.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(device_read.events, vec![event.id]);

    DeviceRepo::disconnect_events(&pool, device.id, &[event.id])
        .await
        .unwrap();
    let device_read = DeviceRepo::find_by_id(&pool, device.id)
        .await
        .unwrap()
        .unwrap();
    assert!(device_read.events.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_events_empty_rejected(pool: PgPool) {
    let device = DeviceRepo::create(&pool, &new_device("dv-4")).await.unwrap();
    let result = DeviceRepo::replace_events(&pool, device.id, &[]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFoundMany { entity: "Event" }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_events_scoped_and_filtered(pool: PgPool) {
    let device = DeviceRepo::create(&pool, &new_device("dv-5")).await.unwrap();
    EventRepo::create(&pool, &new_event(Some(device.id), "reading", 20.0))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event(Some(device.id), "alert", 90.0))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event(None, "reading", 21.0))
        .await
        .unwrap();

    let scoped = EventRepo::list_by_device(&pool, device.id, &EventListParams::default())
        .await
        .unwrap();
    assert_eq!(scoped.len(), 2);

    let alerts = EventRepo::list_by_device(
        &pool,
        device.id,
        &EventListParams {
            event_type: Some("alert".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].temperature, Some(90.0));

    // Listing for an absent device is empty, not an error.
    let none = EventRepo::list_by_device(&pool, Uuid::now_v7(), &EventListParams::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_device_keeps_events(pool: PgPool) {
    let device = DeviceRepo::create(&pool, &new_device("dv-6")).await.unwrap();
    let event = EventRepo::create(&pool, &new_event(Some(device.id), "reading", 20.0))
        .await
        .unwrap();

    assert!(DeviceRepo::delete(&pool, device.id).await.unwrap());

    let event = EventRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(event.device, None);
}
