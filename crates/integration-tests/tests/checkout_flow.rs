//! End-to-end checkout orchestration scenarios against a mock orders
//! backend.
//!
//! Each test gets its own backend on an ephemeral port and its own cart
//! snapshot file, so tests run in parallel without interference.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use uuid::Uuid;

use makiya_core::{AllergyFlag, OrderStatus, PaymentMethod, ProductId, UserId};
use makiya_integration_tests::MockOrdersBackend;
use makiya_storefront::backend::OrdersClient;
use makiya_storefront::cart::{CartEvents, CartLine, CartStore};
use makiya_storefront::checkout::{CheckoutError, CheckoutForm, CheckoutOrchestrator};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn temp_store() -> CartStore {
    let path = std::env::temp_dir().join(format!("makiya-checkout-{}.json", Uuid::new_v4()));
    CartStore::new(path, CartEvents::new())
}

fn line(product_id: i32, unit_price: &str, quantity: u32) -> CartLine {
    CartLine {
        product_id: ProductId::new(product_id),
        name: format!("Maki {product_id}"),
        unit_price: dec(unit_price),
        quantity,
        image_ref: String::new(),
        variant_label: "5 rolls".to_string(),
        allergy_flag: AllergyFlag::No,
    }
}

fn valid_form() -> CheckoutForm {
    CheckoutForm {
        email: "juan.perez@example.com".to_string(),
        document_number: "12345678".to_string(),
        first_names: "Juan".to_string(),
        last_names: "Perez".to_string(),
        phone: "987654321".to_string(),
        recipient_name: "Maria Gonzalez".to_string(),
        accept_terms: true,
        ..CheckoutForm::default()
    }
}

fn orchestrator<'a>(
    client: &'a OrdersClient,
    store: &'a CartStore,
) -> CheckoutOrchestrator<'a> {
    CheckoutOrchestrator::new(client, store, UserId::new(1), true)
}

fn cleanup(store: &CartStore) {
    let _ = std::fs::remove_file(store.path());
}

#[tokio::test]
async fn test_happy_path_creates_one_order_per_line_and_clears_cart() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 2)]).unwrap();

    let receipt = orchestrator(&client, &store)
        .place_order(&valid_form())
        .await
        .unwrap();

    // Exactly one order, priced unit * quantity, tagged pending/cash.
    assert_eq!(receipt.orders.len(), 1);
    let order = receipt.orders.first().unwrap();
    assert_eq!(order.total_price, dec("37.00"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_method, PaymentMethod::Cash);
    assert_eq!(order.product_id, ProductId::new(7));
    assert_eq!(receipt.redirect, "/admin/orders");

    // The buyer was created from the form.
    let users = backend.state.users();
    assert_eq!(users.len(), 1);
    let buyer = users.first().unwrap();
    assert_eq!(buyer.name, "Juan Perez");
    assert_eq!(buyer.phone_number, "987654321");
    assert_eq!(buyer.address, "Maria Gonzalez");
    assert_eq!(receipt.buyer_id, buyer.id);

    // The cart is empty afterwards, both in memory and on disk.
    assert!(store.load().is_empty());
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        "[]"
    );
    cleanup(&store);
}

#[tokio::test]
async fn test_orders_are_created_sequentially_in_cart_order() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store
        .save(&[line(3, "9.90", 1), line(7, "18.50", 2), line(5, "12.00", 1)])
        .unwrap();

    orchestrator(&client, &store)
        .place_order(&valid_form())
        .await
        .unwrap();

    let created: Vec<i32> = backend
        .state
        .orders()
        .iter()
        .map(|o| o.product_id.as_i32())
        .collect();
    assert_eq!(created, vec![3, 7, 5]);
    cleanup(&store);
}

#[tokio::test]
async fn test_duplicate_email_resolves_to_directory_entry() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    backend.state.seed_user("Someone Else", "other@example.com");
    let existing = backend
        .state
        .seed_user("Juan Perez", "juan.perez@example.com");
    backend.state.seed_user("Last Entry", "last@example.com");

    let receipt = orchestrator(&client, &store)
        .place_order(&valid_form())
        .await
        .unwrap();

    // The matching directory entry wins - not the default id, not the
    // last entry.
    assert_eq!(receipt.buyer_id, existing);
    assert_eq!(backend.state.users().len(), 3);
    cleanup(&store);
}

#[tokio::test]
async fn test_duplicate_email_without_exact_match_uses_last_directory_entry() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    // The backend's uniqueness check is case-insensitive, so creation is
    // rejected, but the exact-match directory scan finds nothing and the
    // orchestrator falls back to the last directory entry.
    backend.state.seed_user("Juan Perez", "JUAN.PEREZ@example.com");
    let last = backend.state.seed_user("Last Entry", "last@example.com");

    let receipt = orchestrator(&client, &store)
        .place_order(&valid_form())
        .await
        .unwrap();

    assert_eq!(receipt.buyer_id, last);
    cleanup(&store);
}

#[tokio::test]
async fn test_unknown_buyer_creation_failure_falls_back_to_default_id() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    backend.state.fail_user_create();

    let receipt = orchestrator(&client, &store)
        .place_order(&valid_form())
        .await
        .unwrap();

    // Fallback engaged: checkout still completes against the default buyer.
    assert_eq!(receipt.buyer_id, UserId::new(1));
    assert_eq!(backend.state.orders().len(), 1);
    cleanup(&store);
}

#[tokio::test]
async fn test_unknown_buyer_creation_failure_aborts_when_fallback_disabled() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    backend.state.fail_user_create();

    let result = CheckoutOrchestrator::new(&client, &store, UserId::new(1), false)
        .place_order(&valid_form())
        .await;

    assert!(matches!(result, Err(CheckoutError::Backend(_))));
    // No orders were attempted and the cart is intact.
    assert_eq!(backend.state.order_call_count(), 0);
    assert_eq!(store.load().len(), 1);
    cleanup(&store);
}

#[tokio::test]
async fn test_second_line_failure_stops_sequence_and_keeps_cart() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    let lines = vec![line(1, "10.00", 1), line(2, "11.00", 1), line(3, "12.00", 1)];
    store.save(&lines).unwrap();

    backend.state.fail_order_call(2);

    let result = orchestrator(&client, &store)
        .place_order(&valid_form())
        .await;
    assert!(matches!(result, Err(CheckoutError::Backend(_))));

    // Exactly one order succeeded before the failure; the third line was
    // never attempted; nothing is rolled back.
    assert_eq!(backend.state.orders().len(), 1);
    assert_eq!(backend.state.order_call_count(), 2);

    // The cart is untouched so the shopper can retry.
    assert_eq!(store.load(), lines);
    cleanup(&store);
}

#[tokio::test]
async fn test_empty_cart_makes_no_network_calls() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();

    let result = orchestrator(&client, &store)
        .place_order(&valid_form())
        .await;

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert_eq!(backend.state.request_count(), 0);
    cleanup(&store);
}

#[tokio::test]
async fn test_invalid_form_makes_no_network_calls() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    let mut form = valid_form();
    form.phone = "123".to_string();

    let result = orchestrator(&client, &store).place_order(&form).await;

    match result {
        Err(CheckoutError::Invalid(errors)) => {
            assert!(errors.get("phone").is_some());
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(backend.state.request_count(), 0);
    assert_eq!(store.load().len(), 1);
    cleanup(&store);
}

#[tokio::test]
async fn test_terms_not_accepted_makes_no_network_calls() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    let mut form = valid_form();
    form.accept_terms = false;

    let result = orchestrator(&client, &store).place_order(&form).await;

    assert!(matches!(result, Err(CheckoutError::TermsNotAccepted)));
    assert_eq!(backend.state.request_count(), 0);
    cleanup(&store);
}

#[tokio::test]
async fn test_invoice_choice_drives_payment_method() {
    let backend = MockOrdersBackend::spawn().await;
    let client = OrdersClient::new(backend.base_url.clone());
    let store = temp_store();
    store.save(&[line(7, "18.50", 1)]).unwrap();

    let mut form = valid_form();
    form.invoice_type = makiya_core::InvoiceType::Invoice;

    let receipt = orchestrator(&client, &store).place_order(&form).await.unwrap();

    assert_eq!(
        receipt.orders.first().unwrap().payment_method,
        PaymentMethod::Card
    );
    cleanup(&store);
}
