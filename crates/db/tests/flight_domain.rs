//! Integration tests for the flight domain repositories.
//!
//! Exercises the repository layer against a real database:
//! - Create with reference validation and canonical re-read
//! - Connect / disconnect / replace collection semantics
//! - Partial updates and collection clearing
//! - SET NULL behaviour on parent delete
//! - List filtering, paging and sorting

use assert_matches::assert_matches;
use skylane_core::error::CoreError;
use skylane_db::error::RepoError;
use skylane_db::filter::SortOrder;
use skylane_db::models::aircraft::CreateAircraft;
use skylane_db::models::airline::CreateAirline;
use skylane_db::models::booking::{BookingStatus, CreateBooking, UpdateBooking};
use skylane_db::models::flight::{CreateFlight, FlightListParams, FlightSortField, UpdateFlight};
use skylane_db::models::passenger::CreatePassenger;
use skylane_db::models::seat::CreateSeat;
use skylane_db::repositories::{
    AircraftRepo, AirlineRepo, BookingRepo, FlightRepo, PassengerRepo, SeatRepo,
};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_airline(name: &str) -> CreateAirline {
    CreateAirline {
        name: Some(name.to_string()),
        country: Some("NZ".to_string()),
        ..Default::default()
    }
}

fn new_aircraft(airline: Option<Uuid>, model: &str) -> CreateAircraft {
    CreateAircraft {
        airline,
        model: Some(model.to_string()),
        capacity: Some(180),
        ..Default::default()
    }
}

fn new_flight(airline: Option<Uuid>, aircraft: Option<Uuid>, number: &str) -> CreateFlight {
    CreateFlight {
        aircraft,
        airline,
        flight_number: Some(number.to_string()),
        ..Default::default()
    }
}

fn new_passenger(email: &str) -> CreatePassenger {
    CreatePassenger {
        email: Some(email.to_string()),
        first_name: Some("Ada".to_string()),
        last_name: Some("Doe".to_string()),
        ..Default::default()
    }
}

fn new_seat(flight: Option<Uuid>, number: &str) -> CreateSeat {
    CreateSeat {
        flight,
        seat_number: Some(number.to_string()),
        ..Default::default()
    }
}

fn new_booking(flight: Option<Uuid>, passenger: Option<Uuid>) -> CreateBooking {
    CreateBooking {
        flight,
        passenger,
        status: Some(BookingStatus::Pending),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: Create with references and canonical re-read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_airline_minimal(pool: PgPool) {
    let airline = AirlineRepo::create(&pool, &CreateAirline::default())
        .await
        .unwrap();

    assert_eq!(airline.name, None);
    assert_eq!(airline.country, None);
    assert!(airline.aircraft.is_empty());
    assert!(airline.flights.is_empty());
    assert!(AirlineRepo::find_by_id(&pool, airline.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_flight_with_references(pool: PgPool) {
    let airline = AirlineRepo::create(&pool, &new_airline("Kiwi Air"))
        .await
        .unwrap();
    let aircraft = AircraftRepo::create(&pool, &new_aircraft(Some(airline.id), "A320"))
        .await
        .unwrap();
    assert_eq!(aircraft.airline, Some(airline.id));

    let flight = FlightRepo::create(
        &pool,
        &new_flight(Some(airline.id), Some(aircraft.id), "KA100"),
    )
    .await
    .unwrap();

    assert_eq!(flight.flight_number.as_deref(), Some("KA100"));
    assert_eq!(flight.airline, Some(airline.id));
    assert_eq!(flight.aircraft, Some(aircraft.id));
    assert!(flight.bookings.is_empty());
    assert!(flight.seats.is_empty());

    // The airline's collections now surface both children.
    let airline = AirlineRepo::find_by_id(&pool, airline.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(airline.aircraft, vec![aircraft.id]);
    assert_eq!(airline.flights, vec![flight.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_flight_rejects_unknown_aircraft(pool: PgPool) {
    let result = FlightRepo::create(&pool, &new_flight(None, Some(Uuid::now_v7()), "KA404")).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound {
            entity: "Aircraft",
            ..
        }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_accepts_client_supplied_id(pool: PgPool) {
    let id = Uuid::now_v7();
    let input = CreateFlight {
        id: Some(id),
        flight_number: Some("KA7".to_string()),
        ..Default::default()
    };
    let flight = FlightRepo::create(&pool, &input).await.unwrap();
    assert_eq!(flight.id, id);

    // A second insert with the same id violates the primary key.
    let result = FlightRepo::create(&pool, &input).await;
    assert!(result.is_err(), "duplicate id should fail");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_booking_attaches_seats(pool: PgPool) {
    let flight = FlightRepo::create(&pool, &new_flight(None, None, "KA2"))
        .await
        .unwrap();
    let passenger = PassengerRepo::create(&pool, &new_passenger("ada@example.com"))
        .await
        .unwrap();
    let seat_a = SeatRepo::create(&pool, &new_seat(Some(flight.id), "12A"))
        .await
        .unwrap();
    let seat_b = SeatRepo::create(&pool, &new_seat(Some(flight.id), "12B"))
        .await
        .unwrap();

    let booking = BookingRepo::create(
        &pool,
        &CreateBooking {
            seats: vec![seat_a.id, seat_b.id],
            ..new_booking(Some(flight.id), Some(passenger.id))
        },
    )
    .await
    .unwrap();

    assert_eq!(booking.seats.len(), 2);
    assert!(booking.seats.contains(&seat_a.id));
    assert!(booking.seats.contains(&seat_b.id));

    // Attaching rewrote the seat's back-reference.
    let seat_a = SeatRepo::find_by_id(&pool, seat_a.id).await.unwrap().unwrap();
    assert_eq!(seat_a.booking, Some(booking.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_booking_with_unknown_seat_rolls_back(pool: PgPool) {
    let id = Uuid::now_v7();
    let result = BookingRepo::create(
        &pool,
        &CreateBooking {
            id: Some(id),
            seats: vec![Uuid::now_v7()],
            ..Default::default()
        },
    )
    .await;

    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound { entity: "Seat", .. }))
    );
    // The booking row itself must not have been committed.
    assert!(BookingRepo::find_by_id(&pool, id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_booking_status_round_trip(pool: PgPool) {
    let booking = BookingRepo::create(
        &pool,
        &CreateBooking {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(booking.status, Some(BookingStatus::Confirmed));

    let updated = BookingRepo::update(
        &pool,
        booking.id,
        &UpdateBooking {
            status: Some(BookingStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");
    assert_eq!(updated.status, Some(BookingStatus::Cancelled));
}

// ---------------------------------------------------------------------------
// Test: Connect / disconnect / replace semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_connect_seats_is_idempotent(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &CreateBooking::default())
        .await
        .unwrap();
    let seat = SeatRepo::create(&pool, &new_seat(None, "1A")).await.unwrap();

    BookingRepo::connect_seats(&pool, booking.id, &[seat.id])
        .await
        .unwrap();
    BookingRepo::connect_seats(&pool, booking.id, &[seat.id])
        .await
        .unwrap();

    let booking = BookingRepo::find_by_id(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.seats, vec![seat.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_connect_empty_list_rejected(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &CreateBooking::default())
        .await
        .unwrap();
    let result = BookingRepo::connect_seats(&pool, booking.id, &[]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFoundMany { entity: "Seat" }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_connect_unknown_parent_rejected(pool: PgPool) {
    let seat = SeatRepo::create(&pool, &new_seat(None, "2C")).await.unwrap();
    let result = BookingRepo::connect_seats(&pool, Uuid::now_v7(), &[seat.id]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound {
            entity: "Booking",
            ..
        }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_disconnect_is_lenient(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &CreateBooking::default())
        .await
        .unwrap();
    let seat = SeatRepo::create(&pool, &new_seat(None, "3D")).await.unwrap();
    BookingRepo::connect_seats(&pool, booking.id, &[seat.id])
        .await
        .unwrap();

    // Unknown ids and empty lists are ignored rather than rejected.
    BookingRepo::disconnect_seats(&pool, booking.id, &[Uuid::now_v7()])
        .await
        .unwrap();
    BookingRepo::disconnect_seats(&pool, booking.id, &[])
        .await
        .unwrap();
    BookingRepo::disconnect_seats(&pool, booking.id, &[seat.id])
        .await
        .unwrap();

    let booking = BookingRepo::find_by_id(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert!(booking.seats.is_empty());

    let seat = SeatRepo::find_by_id(&pool, seat.id).await.unwrap().unwrap();
    assert_eq!(seat.booking, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_seats_wholesale(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &CreateBooking::default())
        .await
        .unwrap();
    let seat_a = SeatRepo::create(&pool, &new_seat(None, "4A")).await.unwrap();
    let seat_b = SeatRepo::create(&pool, &new_seat(None, "4B")).await.unwrap();
    let seat_c = SeatRepo::create(&pool, &new_seat(None, "4C")).await.unwrap();
    BookingRepo::connect_seats(&pool, booking.id, &[seat_a.id, seat_b.id])
        .await
        .unwrap();

    BookingRepo::replace_seats(&pool, booking.id, &[seat_c.id])
        .await
        .unwrap();

    let booking = BookingRepo::find_by_id(&pool, booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(booking.seats, vec![seat_c.id]);

    let seat_a = SeatRepo::find_by_id(&pool, seat_a.id).await.unwrap().unwrap();
    assert_eq!(seat_a.booking, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_with_empty_list_rejected(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &CreateBooking::default())
        .await
        .unwrap();
    let result = BookingRepo::replace_seats(&pool, booking.id, &[]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFoundMany { entity: "Seat" }))
    );
}

// ---------------------------------------------------------------------------
// Test: Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_applies_only_provided_fields(pool: PgPool) {
    let airline = AirlineRepo::create(&pool, &new_airline("Kiwi Air"))
        .await
        .unwrap();
    let flight = FlightRepo::create(&pool, &new_flight(Some(airline.id), None, "KA5"))
        .await
        .unwrap();

    let updated = FlightRepo::update(
        &pool,
        flight.id,
        &UpdateFlight {
            flight_number: Some("KA5X".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");

    assert_eq!(updated.flight_number.as_deref(), Some("KA5X"));
    // The airline reference was not touched.
    assert_eq!(updated.airline, Some(airline.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_with_empty_seat_list_clears(pool: PgPool) {
    let booking = BookingRepo::create(&pool, &CreateBooking::default())
        .await
        .unwrap();
    let seat = SeatRepo::create(&pool, &new_seat(None, "5F")).await.unwrap();
    BookingRepo::connect_seats(&pool, booking.id, &[seat.id])
        .await
        .unwrap();

    let updated = BookingRepo::update(
        &pool,
        booking.id,
        &UpdateBooking {
            seats: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");

    assert!(updated.seats.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_flight_returns_none(pool: PgPool) {
    let result = FlightRepo::update(
        &pool,
        Uuid::now_v7(),
        &UpdateFlight {
            flight_number: Some("NOPE".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: Deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_flight_detaches_children(pool: PgPool) {
    let flight = FlightRepo::create(&pool, &new_flight(None, None, "KA9"))
        .await
        .unwrap();
    let seat = SeatRepo::create(&pool, &new_seat(Some(flight.id), "9A"))
        .await
        .unwrap();

    assert!(FlightRepo::delete(&pool, flight.id).await.unwrap());
    assert!(FlightRepo::find_by_id(&pool, flight.id)
        .await
        .unwrap()
        .is_none());

    // The seat survives with its flight reference nulled.
    let seat = SeatRepo::find_by_id(&pool, seat.id).await.unwrap().unwrap();
    assert_eq!(seat.flight, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_returns_false(pool: PgPool) {
    assert!(!FlightRepo::delete(&pool, Uuid::now_v7()).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Listing, filtering, paging
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_flights_filtered_and_paged(pool: PgPool) {
    let airline = AirlineRepo::create(&pool, &new_airline("Kiwi Air"))
        .await
        .unwrap();
    let other = AirlineRepo::create(&pool, &new_airline("Moa Jet"))
        .await
        .unwrap();

    for number in ["KA1", "KA2", "KA3", "KA4"] {
        FlightRepo::create(&pool, &new_flight(Some(airline.id), None, number))
            .await
            .unwrap();
    }
    FlightRepo::create(&pool, &new_flight(Some(other.id), None, "MJ1"))
        .await
        .unwrap();

    // Filter by airline.
    let params = FlightListParams {
        airline: Some(airline.id),
        ..Default::default()
    };
    assert_eq!(FlightRepo::list(&pool, &params).await.unwrap().len(), 4);
    assert_eq!(FlightRepo::count(&pool, &params).await.unwrap(), 4);

    // Scoped variant, paged two at a time.
    let page = FlightRepo::list_by_airline(
        &pool,
        airline.id,
        &FlightListParams {
            skip: Some(2),
            take: Some(2),
            sort_by: Some(FlightSortField::FlightNumber),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let numbers: Vec<_> = page
        .iter()
        .map(|f| f.flight_number.clone().unwrap())
        .collect();
    assert_eq!(numbers, vec!["KA3", "KA4"]);

    // Descending sort puts the latest number first.
    let sorted = FlightRepo::list(
        &pool,
        &FlightListParams {
            airline: Some(airline.id),
            sort_by: Some(FlightSortField::FlightNumber),
            sort_order: Some(SortOrder::Desc),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(sorted[0].flight_number.as_deref(), Some("KA4"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_by_exact_flight_number(pool: PgPool) {
    FlightRepo::create(&pool, &new_flight(None, None, "KA77"))
        .await
        .unwrap();
    FlightRepo::create(&pool, &new_flight(None, None, "KA78"))
        .await
        .unwrap();

    let matches = FlightRepo::list(
        &pool,
        &FlightListParams {
            flight_number: Some("KA77".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].flight_number.as_deref(), Some("KA77"));
}
