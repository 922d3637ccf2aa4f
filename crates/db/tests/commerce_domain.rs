//! Integration tests for the commerce domain repositories.
//!
//! Covers customer / order / order item / payment wiring: reference
//! validation, reassignment, wholesale replacement and scoped listing.

use assert_matches::assert_matches;
use skylane_core::error::CoreError;
use skylane_db::error::RepoError;
use skylane_db::models::customer::CreateCustomer;
use skylane_db::models::order::{CreateOrder, OrderListParams, UpdateOrder};
use skylane_db::models::order_item::{CreateOrderItem, OrderItemListParams};
use skylane_db::models::payment::{CreatePayment, PaymentListParams};
use skylane_db::repositories::{CustomerRepo, OrderItemRepo, OrderRepo, PaymentRepo};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_customer(first: &str) -> CreateCustomer {
    CreateCustomer {
        first_name: Some(first.to_string()),
        last_name: Some("Smith".to_string()),
        ..Default::default()
    }
}

fn new_order(customer: Option<Uuid>, status: &str) -> CreateOrder {
    CreateOrder {
        customer,
        status: Some(status.to_string()),
        ..Default::default()
    }
}

fn new_item(order: Option<Uuid>, name: &str, price: f64) -> CreateOrderItem {
    CreateOrderItem {
        order,
        name: Some(name.to_string()),
        price: Some(price),
        sku: Some(format!("SKU-{name}")),
        ..Default::default()
    }
}

fn new_payment(order: Option<Uuid>, amount: f64) -> CreatePayment {
    CreatePayment {
        order,
        amount: Some(amount),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: Creation and reference validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_order_with_customer(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("Mere"))
        .await
        .unwrap();
    let order = OrderRepo::create(&pool, &new_order(Some(customer.id), "open"))
        .await
        .unwrap();

    assert_eq!(order.customer, Some(customer.id));
    assert_eq!(order.status.as_deref(), Some("open"));
    assert!(order.order_items.is_empty());
    assert!(order.payments.is_empty());

    let customer = CustomerRepo::find_by_id(&pool, customer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.orders, vec![order.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_order_rejects_unknown_customer(pool: PgPool) {
    let result = OrderRepo::create(&pool, &new_order(Some(Uuid::now_v7()), "open")).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound {
            entity: "Customer",
            ..
        }))
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_order_attaches_items_and_payments(pool: PgPool) {
    let item = OrderItemRepo::create(&pool, &new_item(None, "Widget", 9.5))
        .await
        .unwrap();
    let payment = PaymentRepo::create(&pool, &new_payment(None, 9.5))
        .await
        .unwrap();

    let order = OrderRepo::create(
        &pool,
        &CreateOrder {
            order_items: vec![item.id],
            payments: vec![payment.id],
            ..new_order(None, "paid")
        },
    )
    .await
    .unwrap();

    assert_eq!(order.order_items, vec![item.id]);
    assert_eq!(order.payments, vec![payment.id]);

    let item = OrderItemRepo::find_by_id(&pool, item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.order, Some(order.id));
}

// ---------------------------------------------------------------------------
// Test: Updates and reassignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_order_reassigns_customer(pool: PgPool) {
    let first = CustomerRepo::create(&pool, &new_customer("Aroha"))
        .await
        .unwrap();
    let second = CustomerRepo::create(&pool, &new_customer("Tane"))
        .await
        .unwrap();
    let order = OrderRepo::create(&pool, &new_order(Some(first.id), "open"))
        .await
        .unwrap();

    let updated = OrderRepo::update(
        &pool,
        order.id,
        &UpdateOrder {
            customer: Some(second.id),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");
    assert_eq!(updated.customer, Some(second.id));

    let first = CustomerRepo::find_by_id(&pool, first.id)
        .await
        .unwrap()
        .unwrap();
    assert!(first.orders.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_order_rejects_unknown_customer(pool: PgPool) {
    let order = OrderRepo::create(&pool, &new_order(None, "open"))
        .await
        .unwrap();
    let result = OrderRepo::update(
        &pool,
        order.id,
        &UpdateOrder {
            customer: Some(Uuid::now_v7()),
            ..Default::default()
        },
    )
    .await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound {
            entity: "Customer",
            ..
        }))
    );

    // The failed update left the order untouched.
    let order = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(order.customer, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_order_items(pool: PgPool) {
    let order = OrderRepo::create(&pool, &new_order(None, "open"))
        .await
        .unwrap();
    let keep = OrderItemRepo::create(&pool, &new_item(Some(order.id), "Keep", 1.0))
        .await
        .unwrap();
    let removed = OrderItemRepo::create(&pool, &new_item(Some(order.id), "Drop", 2.0))
        .await
        .unwrap();
    let added = OrderItemRepo::create(&pool, &new_item(None, "Added", 3.0))
        .await
        .unwrap();

    OrderRepo::replace_order_items(&pool, order.id, &[keep.id, added.id])
        .await
        .unwrap();

    let order = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(order.order_items.len(), 2);
    assert!(order.order_items.contains(&keep.id));
    assert!(order.order_items.contains(&added.id));

    let removed = OrderItemRepo::find_by_id(&pool, removed.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(removed.order, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_replace_payments_requires_known_ids(pool: PgPool) {
    let order = OrderRepo::create(&pool, &new_order(None, "open"))
        .await
        .unwrap();
    let result = OrderRepo::replace_payments(&pool, order.id, &[Uuid::now_v7()]).await;
    assert_matches!(
        result,
        Err(RepoError::Core(CoreError::NotFound {
            entity: "Payment",
            ..
        }))
    );
}

// ---------------------------------------------------------------------------
// Test: SET NULL on parent delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_customer_preserves_orders(pool: PgPool) {
    let customer = CustomerRepo::create(&pool, &new_customer("Rewi"))
        .await
        .unwrap();
    let order = OrderRepo::create(&pool, &new_order(Some(customer.id), "open"))
        .await
        .unwrap();

    assert!(CustomerRepo::delete(&pool, customer.id).await.unwrap());

    let order = OrderRepo::find_by_id(&pool, order.id).await.unwrap().unwrap();
    assert_eq!(order.customer, None);
}

// ---------------------------------------------------------------------------
// Test: Scoped listing and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_list_items_scoped_to_order(pool: PgPool) {
    let order = OrderRepo::create(&pool, &new_order(None, "open"))
        .await
        .unwrap();
    let other = OrderRepo::create(&pool, &new_order(None, "open"))
        .await
        .unwrap();
    OrderItemRepo::create(&pool, &new_item(Some(order.id), "A", 1.0))
        .await
        .unwrap();
    OrderItemRepo::create(&pool, &new_item(Some(order.id), "B", 2.0))
        .await
        .unwrap();
    OrderItemRepo::create(&pool, &new_item(Some(other.id), "C", 3.0))
        .await
        .unwrap();

    let items = OrderItemRepo::list_by_order(&pool, order.id, &OrderItemListParams::default())
        .await
        .unwrap();
    assert_eq!(items.len(), 2);

    // Scope composes with field filters.
    let priced = OrderItemRepo::list_by_order(
        &pool,
        order.id,
        &OrderItemListParams {
            price: Some(2.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(priced.len(), 1);
    assert_eq!(priced[0].name.as_deref(), Some("B"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_orders_by_status(pool: PgPool) {
    OrderRepo::create(&pool, &new_order(None, "open")).await.unwrap();
    OrderRepo::create(&pool, &new_order(None, "open")).await.unwrap();
    OrderRepo::create(&pool, &new_order(None, "shipped"))
        .await
        .unwrap();

    let open = OrderRepo::count(
        &pool,
        &OrderListParams {
            status: Some("open".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(open, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payments_scoped_listing(pool: PgPool) {
    let order = OrderRepo::create(&pool, &new_order(None, "open"))
        .await
        .unwrap();
    PaymentRepo::create(&pool, &new_payment(Some(order.id), 10.0))
        .await
        .unwrap();
    PaymentRepo::create(&pool, &new_payment(Some(order.id), 20.0))
        .await
        .unwrap();
    PaymentRepo::create(&pool, &new_payment(None, 30.0))
        .await
        .unwrap();

    let payments = PaymentRepo::list_by_order(&pool, order.id, &PaymentListParams::default())
        .await
        .unwrap();
    assert_eq!(payments.len(), 2);
    assert_eq!(
        PaymentRepo::count(&pool, &PaymentListParams::default())
            .await
            .unwrap(),
        3
    );
}
