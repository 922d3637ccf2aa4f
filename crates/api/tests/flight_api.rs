//! HTTP-level integration tests for the flight domain resources.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, delete_json, get, patch_json, post_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: POST /flights returns 201 with null references and empty collections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_flight_returns_201_with_empty_relations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/flights",
        serde_json::json!({"flight_number": "AB123"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["flight_number"], "AB123");
    assert!(json["id"].is_string());
    assert!(json["aircraft"].is_null());
    assert!(json["airline"].is_null());
    assert_eq!(json["bookings"], serde_json::json!([]));
    assert_eq!(json["seats"], serde_json::json!([]));
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

// ---------------------------------------------------------------------------
// Test: creating a flight with an airline reference links both sides
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_flight_with_airline_reference(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let airline = body_json(
        post_json(
            app,
            "/api/v1/airlines",
            serde_json::json!({"name": "Koru Air", "country": "NZ"}),
        )
        .await,
    )
    .await;
    let airline_id = airline["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/flights",
        serde_json::json!({"flight_number": "KA100", "airline": airline_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let flight = body_json(response).await;
    assert_eq!(flight["airline"].as_str().unwrap(), airline_id);

    // The airline's flights collection now contains the new flight.
    let app = common::build_test_app(pool);
    let airline = body_json(get(app, &format!("/api/v1/airlines/{airline_id}")).await).await;
    let flights = airline["flights"].as_array().unwrap();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0], flight["id"]);
}

// ---------------------------------------------------------------------------
// Test: creating a flight against an unknown aircraft returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_flight_with_unknown_aircraft_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/flights",
        serde_json::json!({
            "flight_number": "NOPE1",
            "aircraft": uuid::Uuid::now_v7(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: GET /flights/{id} round-trips, unknown id returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_flight_by_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({
                "flight_number": "GF42",
                "departure_time": "2026-03-14T09:00:00Z",
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/flights/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["flight_number"], "GF42");
    assert_eq!(json["departure_time"], "2026-03-14T09:00:00Z");

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/flights/{}", uuid::Uuid::now_v7())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: PATCH /flights/{id} applies only the provided fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_flight_applies_only_provided_fields(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({
                "flight_number": "Before",
                "departure_time": "2026-03-14T09:00:00Z",
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/flights/{id}"),
        serde_json::json!({"flight_number": "After"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["flight_number"], "After");
    // The departure time was not in the patch and must be unchanged.
    assert_eq!(json["departure_time"], "2026-03-14T09:00:00Z");

    // Patching an unknown id returns 404.
    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/flights/{}", uuid::Uuid::now_v7()),
        serde_json::json!({"flight_number": "Ghost"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: DELETE /flights/{id} returns 204, then the flight is gone
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_flight_returns_204_then_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "DEL1"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/flights/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/flights/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again also returns 404.
    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/flights/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: reusing a client-supplied id returns 409
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_client_supplied_id_returns_409(pool: PgPool) {
    let id = uuid::Uuid::now_v7();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/flights",
        serde_json::json!({"id": id, "flight_number": "DUP1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/flights",
        serde_json::json!({"id": id, "flight_number": "DUP2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Test: malformed path and body inputs are rejected before reaching the db
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_uuid_in_path_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/flights/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_body_type_returns_422(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/flights",
        serde_json::json!({"flight_number": 42}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Test: GET /flights/{id}/airline resolves the reference or returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn flight_airline_getter_resolves_reference(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let airline = body_json(
        post_json(
            app,
            "/api/v1/airlines",
            serde_json::json!({"name": "Koru Air"}),
        )
        .await,
    )
    .await;
    let airline_id = airline["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let flight = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "KA7", "airline": airline_id}),
        )
        .await,
    )
    .await;
    let flight_id = flight["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/flights/{flight_id}/airline")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Koru Air");

    // A flight with no airline set yields 404 from the getter.
    let app = common::build_test_app(pool.clone());
    let orphan = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "SOLO"}),
        )
        .await,
    )
    .await;
    let orphan_id = orphan["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/flights/{orphan_id}/airline")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // An unknown flight id also yields 404.
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/flights/{}/airline", uuid::Uuid::now_v7()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: seats collection connect / list / disconnect / replace cycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn flight_seats_connect_disconnect_replace(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let flight = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "ST1"}),
        )
        .await,
    )
    .await;
    let flight_id = flight["id"].as_str().unwrap().to_string();

    let mut seat_ids = Vec::new();
    for number in ["1A", "1B"] {
        let app = common::build_test_app(pool.clone());
        let seat = body_json(
            post_json(
                app,
                "/api/v1/seats",
                serde_json::json!({"seat_number": number}),
            )
            .await,
        )
        .await;
        seat_ids.push(seat["id"].as_str().unwrap().to_string());
    }

    // Connect both seats.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/flights/{flight_id}/seats"),
        serde_json::json!(seat_ids),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/flights/{flight_id}/seats")).await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    // Disconnect the first seat.
    let app = common::build_test_app(pool.clone());
    let response = delete_json(
        app,
        &format!("/api/v1/flights/{flight_id}/seats"),
        serde_json::json!([seat_ids[0]]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/flights/{flight_id}/seats")).await).await;
    let remaining = json.as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"].as_str().unwrap(), seat_ids[1]);

    // Replace the collection with exactly the first seat again.
    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/flights/{flight_id}/seats"),
        serde_json::json!([seat_ids[0]]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/flights/{flight_id}/seats")).await).await;
    let replaced = json.as_array().unwrap();
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0]["id"].as_str().unwrap(), seat_ids[0]);
}

// ---------------------------------------------------------------------------
// Test: connect with an empty id list returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn connect_with_empty_list_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let flight = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "EMPT"}),
        )
        .await,
    )
    .await;
    let flight_id = flight["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/flights/{flight_id}/seats"),
        serde_json::json!([]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: connect with an unknown child id returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn connect_with_unknown_seat_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let flight = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "BAD1"}),
        )
        .await,
    )
    .await;
    let flight_id = flight["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/flights/{flight_id}/seats"),
        serde_json::json!([uuid::Uuid::now_v7()]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: listing a collection under an unknown parent yields an empty list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_collection_of_unknown_parent_is_empty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/flights/{}/seats", uuid::Uuid::now_v7()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Test: bookings created against a flight appear in its bookings sub-route
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn flight_bookings_subroute_lists_created_bookings(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let flight = body_json(
        post_json(
            app,
            "/api/v1/flights",
            serde_json::json!({"flight_number": "BK9"}),
        )
        .await,
    )
    .await;
    let flight_id = flight["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let booking = body_json(
        post_json(
            app,
            "/api/v1/bookings",
            serde_json::json!({"flight": flight_id, "status": "confirmed"}),
        )
        .await,
    )
    .await;
    assert_eq!(booking["status"], "confirmed");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/flights/{flight_id}/bookings")).await).await;
    let bookings = json.as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["id"], booking["id"]);
}
