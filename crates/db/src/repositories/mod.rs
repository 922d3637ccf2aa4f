//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Cross-table relation
//! plumbing shared by the repositories lives in [`relations`].

pub mod aircraft_repo;
pub mod airline_repo;
pub mod booking_repo;
pub mod customer_repo;
pub mod device_repo;
pub mod event_repo;
pub mod flight_repo;
pub mod order_item_repo;
pub mod order_repo;
pub mod passenger_repo;
pub mod payment_repo;
pub mod seat_repo;

pub(crate) mod relations;

pub use aircraft_repo::AircraftRepo;
pub use airline_repo::AirlineRepo;
pub use booking_repo::BookingRepo;
pub use customer_repo::CustomerRepo;
pub use device_repo::DeviceRepo;
pub use event_repo::EventRepo;
pub use flight_repo::FlightRepo;
pub use order_item_repo::OrderItemRepo;
pub use order_repo::OrderRepo;
pub use passenger_repo::PassengerRepo;
pub use payment_repo::PaymentRepo;
pub use seat_repo::SeatRepo;
