//! Integration test harness for Bakehouse.
//!
//! Tests drive the real storefront and admin routers with
//! `tower::ServiceExt::oneshot`; the bakery API behind them is a
//! [`FakeBakery`] served by axum on an ephemeral local port.
//!
//! # Fake API accounts
//!
//! Login succeeds for any `<role>@bakehouse.test` address with the password
//! [`PASSWORD`], returning the access token `tok-<role>`. Authenticated
//! endpoints accept any `tok-*` bearer token; `tok-accountant` may not run
//! bulk product actions. Any other bearer token is answered with 401.
//!
//! # Fake carts
//!
//! Each token has its own cart. Catalog products have no variants, so a
//! product id doubles as its variant id. [`COUPON`] is the only valid coupon
//! code. Checkout places order [`PLACED_ORDER`] and empties the cart, except
//! for `tok-wholesale`, whose orders the bakery takes by hand.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, Request, Response, StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Password accepted by the fake API.
pub const PASSWORD: &str = "correct-horse";

/// Products in the fake catalog (ids `1..=PRODUCT_COUNT`).
pub const PRODUCT_COUNT: u64 = 25;

/// Coupon code the fake API accepts.
pub const COUPON: &str = "BREAD10";

/// Order id returned by a successful checkout.
pub const PLACED_ORDER: i64 = 501;

/// A request the fake API received on the bulk endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkCall {
    pub method: Method,
    pub body: Value,
}

/// One line of a fake cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FakeLine {
    id: u64,
    variant: u64,
    quantity: u64,
}

#[derive(Debug, Default)]
struct FakeCart {
    lines: Vec<FakeLine>,
    coupon: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    bulk_calls: Vec<BulkCall>,
    carts: HashMap<String, FakeCart>,
    next_line: u64,
}

type Shared = Arc<Mutex<FakeState>>;

fn lock(shared: &Shared) -> std::sync::MutexGuard<'_, FakeState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process stand-in for the bakery REST API.
pub struct FakeBakery {
    base_url: String,
    shared: Shared,
}

impl FakeBakery {
    /// Serve the fake API on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let shared: Shared = Arc::default();
        let router = Router::new()
            .route("/api/products/", get(products))
            .route("/api/products/{id}/", get(product))
            .route("/api/blogs/", get(blogs))
            .route("/api/orders/", get(orders))
            .route("/api/notification/", get(notifications))
            .route("/api/login/", post(login))
            .route(
                "/api/bulk-product-update/",
                post(bulk).patch(bulk).delete(bulk),
            )
            .route("/api/cart/", post(cart))
            .route("/api/cart/item/", post(add_cart_item))
            .route("/api/cart/item/{id}/", delete(remove_cart_item))
            .route("/api/apply/coupon/", post(apply_coupon))
            .route("/api/checkout/", post(checkout))
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake bakery API");
        let addr = listener.local_addr().expect("fake bakery API address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://{addr}/api/"),
            shared,
        }
    }

    /// API root to configure the apps with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every bulk request received so far.
    #[must_use]
    pub fn bulk_calls(&self) -> Vec<BulkCall> {
        lock(&self.shared).bulk_calls.clone()
    }

    /// `(variant, quantity)` for each line in `token`'s cart.
    #[must_use]
    pub fn cart_lines(&self, token: &str) -> Vec<(u64, u64)> {
        lock(&self.shared)
            .carts
            .get(token)
            .map(|cart| cart.lines.iter().map(|l| (l.variant, l.quantity)).collect())
            .unwrap_or_default()
    }
}

/// An API root where nothing is listening.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn unreachable_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind unused port");
    let addr = listener.local_addr().expect("unused port address");
    drop(listener);
    format!("http://{addr}/api/")
}

// =============================================================================
// Apps under test
// =============================================================================

/// Storefront router talking to `api_url`.
///
/// # Panics
///
/// Panics if the app state cannot be built.
#[must_use]
pub fn storefront(api_url: &str) -> Router {
    use bakehouse_storefront::config::{BakeryApiConfig, StorefrontConfig};

    let config = StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        api: BakeryApiConfig::new(api_url).expect("valid API url"),
        sentry_dsn: None,
        sentry_environment: None,
    };
    let state = bakehouse_storefront::state::AppState::new(config).expect("storefront state");
    bakehouse_storefront::app(state)
}

/// Admin router talking to `api_url`.
///
/// # Panics
///
/// Panics if the app state cannot be built.
#[must_use]
pub fn admin(api_url: &str) -> Router {
    use bakehouse_admin::config::{AdminConfig, BakeryApiConfig};

    let config = AdminConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        api: BakeryApiConfig::new(api_url).expect("valid API url"),
        sentry_dsn: None,
        sentry_environment: None,
    };
    let state = bakehouse_admin::state::AppState::new(config).expect("admin state");
    bakehouse_admin::app(state)
}

// =============================================================================
// Request helpers
// =============================================================================

/// `GET path` with an optional `Cookie` header.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

/// `POST path` with a form body and an optional `Cookie` header.
///
/// # Panics
///
/// Panics if the request cannot be built.
#[must_use]
pub fn form_request(path: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(path).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).expect("request")
}

/// Send one request through `app`.
///
/// # Panics
///
/// Panics if the router fails, which axum routers never do.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("infallible router")
}

/// Collect a response body as text.
///
/// # Panics
///
/// Panics if the body cannot be read.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Every `Set-Cookie` header value.
#[must_use]
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

/// Every `href` attribute in `html`, with entity-escaped ampersands decoded.
#[must_use]
pub fn hrefs(html: &str) -> Vec<String> {
    html.split(r#"href=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(|href| href.replace("&#38;", "&").replace("&amp;", "&"))
        .collect()
}

// =============================================================================
// Fake API handlers
// =============================================================================

/// A bearer header that is present but not a `tok-*` token.
fn stale_bearer(headers: &HeaderMap) -> bool {
    headers.contains_key(header::AUTHORIZATION) && bearer(headers).is_none()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|token| token.starts_with("tok-"))
}

fn paged(items: &[Value], query: &HashMap<String, String>) -> Value {
    let number = |key: &str, default: usize| {
        query
            .get(key)
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(default)
    };
    let page = number("page", 1);
    let size = number("page_size", 10);
    let results: Vec<Value> = items.iter().skip((page - 1) * size).take(size).cloned().collect();
    json!({
        "count": items.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}

fn catalog_product(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("Loaf {id:02}"),
        "description": "Baked this morning.",
        "status": "available",
        "is_active": id % 5 != 0,
        "price": format!("{}.50", 3 + id % 4),
        "hot_deal": id == 1,
    })
}

fn unit_cents(product: u64) -> u64 {
    (3 + product % 4) * 100 + 50
}

fn money(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

async fn products(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response<Body> {
    if stale_bearer(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Token is invalid"}))).into_response();
    }
    let items: Vec<Value> = (1..=PRODUCT_COUNT).map(catalog_product).collect();
    Json(paged(&items, &query)).into_response()
}

async fn product(Path(id): Path<u64>) -> Response<Body> {
    if (1..=PRODUCT_COUNT).contains(&id) {
        Json(catalog_product(id)).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
    }
}

async fn blogs(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let items = [
        json!({"id": 1, "title": "Why we proof overnight", "slug": "proofing", "content": "Slow dough tastes better."}),
        json!({"id": 2, "title": "Meet the bakers", "slug": "bakers", "content": "Four ovens, six people."}),
    ];
    Json(paged(&items, &query))
}

async fn orders(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Response<Body> {
    if bearer(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Token is invalid"}))).into_response();
    }
    let items = [
        json!({"id": 1, "order_id": "BH-0001", "email": "ana@example.com", "status": "delivered", "total_amount": "24.00"}),
        json!({"id": 2, "order_id": "BH-0002", "email": "ben@example.com", "status": "payment_pending", "total_amount": "12.50"}),
        json!({"id": 3, "order_id": "BH-0003", "status": "in_transit", "total_amount": "8.00", "final_amount": "7.20"}),
    ];
    Json(paged(&items, &query)).into_response()
}

async fn notifications(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response<Body> {
    if bearer(&headers).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let items = [
        json!({"id": 1, "title": "Flour delivery", "message": "Arrives at 7", "notification_type": "reminder", "is_read": false}),
        json!({"id": 2, "title": "Oven serviced", "message": "All good", "notification_type": "message", "is_read": true}),
    ];
    Json(paged(&items, &query)).into_response()
}

async fn login(Json(body): Json<Value>) -> Response<Body> {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let role = email.strip_suffix("@bakehouse.test").unwrap_or("customer");

    if password != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"non_field_errors": ["Invalid credentials"]})),
        )
            .into_response();
    }

    Json(json!({
        "id": 7,
        "email": email,
        "role": role,
        "first_name": "Sam",
        "last_name": "Baker",
        "access": format!("tok-{role}"),
        "refresh": "refresh-token",
    }))
    .into_response()
}

async fn bulk(
    State(shared): State<Shared>,
    method: Method,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response<Body> {
    match bearer(&headers) {
        None => return StatusCode::UNAUTHORIZED.into_response(),
        Some("tok-accountant") => {
            return (StatusCode::FORBIDDEN, Json(json!({"detail": "Not allowed"}))).into_response();
        }
        Some(_) => {}
    }

    lock(&shared).bulk_calls.push(BulkCall {
        method: method.clone(),
        body,
    });

    if method == Method::DELETE {
        StatusCode::NO_CONTENT.into_response()
    } else {
        Json(json!({"message": "ok"})).into_response()
    }
}

fn cart_json(cart: &FakeCart) -> Value {
    let items: Vec<Value> = cart
        .lines
        .iter()
        .map(|line| {
            json!({
                "id": line.id,
                "product_variant": {"id": line.variant, "name": format!("Loaf {:02}", line.variant)},
                "quantity": line.quantity,
                "item_price": money(unit_cents(line.variant) * line.quantity),
            })
        })
        .collect();
    let total: u64 = cart
        .lines
        .iter()
        .map(|line| unit_cents(line.variant) * line.quantity)
        .sum();
    let discount = if cart.coupon { total / 10 } else { 0 };

    json!({
        "id": 1,
        "items": items,
        "applied_coupon_name": cart.coupon.then_some(COUPON),
        "total_price": money(total),
        "discounted_amount": money(discount),
        "shipping_cost": "0.00",
        "vat_amount": "0.00",
        "total_with_vat": money(total - discount),
        "delivery_address": {"id": 5, "address": "1 Mill Lane", "city": "York", "state": "", "zipcode": "YO1 7HH"},
    })
}

async fn cart(State(shared): State<Shared>, headers: HeaderMap) -> Response<Body> {
    let Some(token) = bearer(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let mut state = lock(&shared);
    Json(cart_json(state.carts.entry(token.to_string()).or_default())).into_response()
}

async fn add_cart_item(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response<Body> {
    let Some(token) = bearer(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let variant = body["product_variant"].as_u64().unwrap_or_default();
    let quantity = body["quantity"].as_u64().unwrap_or_default();
    if !(1..=PRODUCT_COUNT).contains(&variant) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"product_variant": [format!("Invalid pk \"{variant}\" - object does not exist.")]})),
        )
            .into_response();
    }

    let mut state = lock(&shared);
    state.next_line += 1;
    let id = state.next_line;
    let cart = state.carts.entry(token.to_string()).or_default();
    match cart.lines.iter_mut().find(|line| line.variant == variant) {
        Some(line) => line.quantity += quantity,
        None => cart.lines.push(FakeLine { id, variant, quantity }),
    }
    (StatusCode::CREATED, Json(json!({"id": id, "quantity": quantity}))).into_response()
}

async fn remove_cart_item(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response<Body> {
    let Some(token) = bearer(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let mut state = lock(&shared);
    let cart = state.carts.entry(token.to_string()).or_default();
    let before = cart.lines.len();
    cart.lines.retain(|line| line.id != id);
    if cart.lines.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn apply_coupon(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response<Body> {
    let Some(token) = bearer(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    if body["coupon_code"].as_str() != Some(COUPON) || body["cart_id"].as_u64() != Some(1) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Invalid coupon code"}))).into_response();
    }
    lock(&shared).carts.entry(token.to_string()).or_default().coupon = true;
    Json(json!({"message": "Coupon applied successfully"})).into_response()
}

async fn checkout(State(shared): State<Shared>, headers: HeaderMap) -> Response<Body> {
    let Some(token) = bearer(&headers) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let mut state = lock(&shared);
    let cart = state.carts.entry(token.to_string()).or_default();
    if cart.lines.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "Your cart is empty"}))).into_response();
    }
    if token == "tok-wholesale" {
        return Json(json!({"message": "Please contact with Admin for place this order"})).into_response();
    }

    *cart = FakeCart::default();
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Order created successfully",
            "order_id": PLACED_ORDER,
            "invoice_file": format!("/media/invoices/invoice-{PLACED_ORDER}.pdf"),
        })),
    )
        .into_response()
}
