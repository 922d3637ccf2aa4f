pub mod aircraft;
pub mod airline;
pub mod booking;
pub mod customer;
pub mod device;
pub mod event;
pub mod flight;
pub mod health;
pub mod order;
pub mod order_item;
pub mod passenger;
pub mod payment;
pub mod seat;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Every resource exposes the same surface: collection CRUD plus listing
/// metadata, then one sub-route per relation. Single references answer GET
/// only; collections answer GET (list), POST (connect), PATCH (replace),
/// and DELETE (disconnect).
///
/// ```text
/// /airlines                         list, create
/// /airlines/meta                    count (POST)
/// /airlines/{id}                    get, update, delete
/// /airlines/{id}/aircraft           list, connect, replace, disconnect
/// /airlines/{id}/flights            list, connect, replace, disconnect
///
/// /aircraft                         list, create
/// /aircraft/meta                    count (POST)
/// /aircraft/{id}                    get, update, delete
/// /aircraft/{id}/airline            get referenced airline
/// /aircraft/{id}/flights            list, connect, replace, disconnect
///
/// /flights                          list, create
/// /flights/meta                     count (POST)
/// /flights/{id}                     get, update, delete
/// /flights/{id}/aircraft            get referenced aircraft
/// /flights/{id}/airline             get referenced airline
/// /flights/{id}/bookings            list, connect, replace, disconnect
/// /flights/{id}/seats               list, connect, replace, disconnect
///
/// /bookings                         list, create
/// /bookings/meta                    count (POST)
/// /bookings/{id}                    get, update, delete
/// /bookings/{id}/flight             get referenced flight
/// /bookings/{id}/passenger          get referenced passenger
/// /bookings/{id}/seats              list, connect, replace, disconnect
///
/// /passengers                       list, create
/// /passengers/meta                  count (POST)
/// /passengers/{id}                  get, update, delete
/// /passengers/{id}/bookings         list, connect, replace, disconnect
///
/// /seats                            list, create
/// /seats/meta                       count (POST)
/// /seats/{id}                       get, update, delete
/// /seats/{id}/booking               get referenced booking
/// /seats/{id}/flight                get referenced flight
///
/// /customers                        list, create
/// /customers/meta                   count (POST)
/// /customers/{id}                   get, update, delete
/// /customers/{id}/orders            list, connect, replace, disconnect
///
/// /orders                           list, create
/// /orders/meta                      count (POST)
/// /orders/{id}                      get, update, delete
/// /orders/{id}/customer             get referenced customer
/// /orders/{id}/order-items          list, connect, replace, disconnect
/// /orders/{id}/payments             list, connect, replace, disconnect
///
/// /order-items                      list, create
/// /order-items/meta                 count (POST)
/// /order-items/{id}                 get, update, delete
/// /order-items/{id}/order           get referenced order
///
/// /payments                         list, create
/// /payments/meta                    count (POST)
/// /payments/{id}                    get, update, delete
/// /payments/{id}/order              get referenced order
///
/// /devices                          list, create
/// /devices/meta                     count (POST)
/// /devices/{id}                     get, update, delete
/// /devices/{id}/events              list, connect, replace, disconnect
///
/// /events                           list, create
/// /events/meta                      count (POST)
/// /events/{id}                      get, update, delete
/// /events/{id}/device               get referenced device
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Flight domain: airlines, their fleet, scheduled flights, bookings.
        .nest("/airlines", airline::router())
        .nest("/aircraft", aircraft::router())
        .nest("/flights", flight::router())
        .nest("/bookings", booking::router())
        .nest("/passengers", passenger::router())
        .nest("/seats", seat::router())
        // Commerce domain: customers, orders, line items, payments.
        .nest("/customers", customer::router())
        .nest("/orders", order::router())
        .nest("/order-items", order_item::router())
        .nest("/payments", payment::router())
        // Telemetry domain: devices and their reported events.
        .nest("/devices", device::router())
        .nest("/events", event::router())
}
