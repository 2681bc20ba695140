//! Integration test support for Makiya.
//!
//! Provides an in-process mock of the orders backend so checkout
//! scenarios can run end-to-end without external services. The mock
//! serves the same wire contract the real backend does (snake_case JSON,
//! `{"detail": "Email already exists"}` duplicate rejection) on an
//! ephemeral localhost port.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockOrdersBackend::spawn().await;
//! let client = OrdersClient::new(backend.base_url.clone());
//!
//! backend.state.seed_user("Ana Torres", "ana@example.com");
//! assert_eq!(client.list_users().await.unwrap().len(), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test support: panicking on broken fixtures is the correct failure mode.
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use makiya_core::{OrderId, UserId};
use makiya_storefront::backend::{NewOrder, NewUser, RemoteOrder, RemoteUser};

/// Shared, inspectable state behind the mock orders backend.
#[derive(Clone, Default)]
pub struct MockOrdersState {
    inner: Arc<MockOrdersStateInner>,
}

#[derive(Default)]
struct MockOrdersStateInner {
    users: Mutex<Vec<RemoteUser>>,
    orders: Mutex<Vec<RemoteOrder>>,
    /// Force the next `POST /users/` calls to fail with a 500.
    fail_user_create: Mutex<bool>,
    /// 1-based index of the `POST /orders/` call that should fail.
    fail_order_call: Mutex<Option<usize>>,
    /// Total requests of any kind received.
    requests: AtomicUsize,
    /// `POST /orders/` calls received.
    order_calls: AtomicUsize,
}

impl MockOrdersState {
    /// Register an existing buyer and return its id.
    pub fn seed_user(&self, name: &str, email: &str) -> UserId {
        let mut users = self.inner.users.lock().expect("users lock");
        let id = UserId::new(i32::try_from(users.len()).expect("user count") + 1);
        users.push(RemoteUser {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone_number: String::new(),
            address: String::new(),
        });
        id
    }

    /// Snapshot of the registered buyers.
    #[must_use]
    pub fn users(&self) -> Vec<RemoteUser> {
        self.inner.users.lock().expect("users lock").clone()
    }

    /// Snapshot of the created orders, in creation order.
    #[must_use]
    pub fn orders(&self) -> Vec<RemoteOrder> {
        self.inner.orders.lock().expect("orders lock").clone()
    }

    /// Make every subsequent `POST /users/` fail with a 500.
    pub fn fail_user_create(&self) {
        *self.inner.fail_user_create.lock().expect("flag lock") = true;
    }

    /// Make the `n`-th (1-based) `POST /orders/` call fail with a 500.
    pub fn fail_order_call(&self, n: usize) {
        *self.inner.fail_order_call.lock().expect("flag lock") = Some(n);
    }

    /// Total requests received by the mock.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.inner.requests.load(Ordering::SeqCst)
    }

    /// `POST /orders/` calls received by the mock.
    #[must_use]
    pub fn order_call_count(&self) -> usize {
        self.inner.order_calls.load(Ordering::SeqCst)
    }

    fn count_request(&self) {
        self.inner.requests.fetch_add(1, Ordering::SeqCst);
    }
}

/// A running mock orders backend.
pub struct MockOrdersBackend {
    /// Base URL for [`makiya_storefront::backend::OrdersClient`].
    pub base_url: String,
    /// Handle for seeding and inspecting the backend.
    pub state: MockOrdersState,
}

impl MockOrdersBackend {
    /// Bind the mock on an ephemeral localhost port and start serving.
    pub async fn spawn() -> Self {
        let state = MockOrdersState::default();

        let app = Router::new()
            .route("/users/", get(list_users).post(create_user))
            .route("/orders/", get(list_orders).post(create_order))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }
}

async fn list_users(State(state): State<MockOrdersState>) -> Json<Vec<RemoteUser>> {
    state.count_request();
    Json(state.users())
}

async fn create_user(
    State(state): State<MockOrdersState>,
    Json(new_user): Json<NewUser>,
) -> Response {
    state.count_request();

    if *state.inner.fail_user_create.lock().expect("flag lock") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "Internal Server Error"})),
        )
            .into_response();
    }

    let mut users = state.inner.users.lock().expect("users lock");
    // Email uniqueness is case-insensitive, like the real backend's collation.
    if users
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(&new_user.email))
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Email already exists"})),
        )
            .into_response();
    }

    let id = UserId::new(i32::try_from(users.len()).expect("user count") + 1);
    let user = RemoteUser {
        id,
        name: new_user.name,
        email: new_user.email,
        phone_number: new_user.phone_number,
        address: new_user.address,
    };
    users.push(user.clone());

    (StatusCode::CREATED, Json(user)).into_response()
}

async fn list_orders(State(state): State<MockOrdersState>) -> Json<Vec<RemoteOrder>> {
    state.count_request();
    Json(state.orders())
}

async fn create_order(
    State(state): State<MockOrdersState>,
    Json(new_order): Json<NewOrder>,
) -> Response {
    state.count_request();
    let call = state.inner.order_calls.fetch_add(1, Ordering::SeqCst) + 1;

    if *state.inner.fail_order_call.lock().expect("flag lock") == Some(call) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "Internal Server Error"})),
        )
            .into_response();
    }

    let mut orders = state.inner.orders.lock().expect("orders lock");
    let order = RemoteOrder {
        id: OrderId::new(i32::try_from(orders.len()).expect("order count") + 1),
        user_id: new_order.user_id,
        product_id: new_order.product_id,
        status: new_order.status,
        total_price: new_order.total_price,
        payment_method: new_order.payment_method,
        created_at: None,
    };
    orders.push(order.clone());

    (StatusCode::CREATED, Json(order)).into_response()
}
