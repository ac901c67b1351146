//! Cart and checkout through the storefront router.

use axum::http::StatusCode;
use bakehouse_integration_tests::{
    COUPON, FakeBakery, PLACED_ORDER, body_text, form_request, get_request, location, send,
    storefront,
};

const SIGNED_IN: &str = "token=tok-customer";

async fn add(api: &FakeBakery, cookie: &str, form: &str) {
    let response = send(
        storefront(api.base_url()),
        form_request("/cart/items", form, Some(cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/billing?notice=added"));
}

#[tokio::test]
async fn product_page_offers_add_to_cart_when_signed_in() {
    let api = FakeBakery::start().await;

    let signed_in = send(
        storefront(api.base_url()),
        get_request("/products/3", Some(SIGNED_IN)),
    )
    .await;
    let html = body_text(signed_in).await;
    assert!(html.contains(r#"action="/cart/items""#));
    assert!(html.contains(r#"name="variant" value="3""#));

    let visitor = body_text(send(storefront(api.base_url()), get_request("/products/3", None)).await).await;
    assert!(!visitor.contains(r#"action="/cart/items""#));
    assert!(visitor.contains("Log in to order"));
}

#[tokio::test]
async fn empty_cart_offers_to_continue_shopping() {
    let api = FakeBakery::start().await;
    let response = send(storefront(api.base_url()), get_request("/billing", Some(SIGNED_IN))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No cart items available"));
    assert!(html.contains(r#"href="/products""#));
    assert!(!html.contains(r#"action="/billing/checkout""#));
}

#[tokio::test]
async fn added_items_show_on_the_cart_page() {
    let api = FakeBakery::start().await;
    add(&api, SIGNED_IN, "variant=3&quantity=2").await;
    add(&api, SIGNED_IN, "variant=3&quantity=1").await;
    assert_eq!(api.cart_lines("tok-customer"), vec![(3, 3)]);

    let response = send(
        storefront(api.base_url()),
        get_request("/billing?notice=added", Some(SIGNED_IN)),
    )
    .await;
    let html = body_text(response).await;
    assert!(html.contains("Added to your cart."));
    assert!(html.contains("Loaf 03"));
    // 3 x $6.50
    assert!(html.contains("$19.50"));
    assert!(html.contains("1 Mill Lane, York, YO1 7HH"));
}

#[tokio::test]
async fn carts_are_kept_per_customer() {
    let api = FakeBakery::start().await;
    add(&api, SIGNED_IN, "variant=4").await;
    assert_eq!(api.cart_lines("tok-customer"), vec![(4, 1)]);
    assert!(api.cart_lines("tok-other").is_empty());
}

#[tokio::test]
async fn malformed_add_is_a_bad_request() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        form_request("/cart/items", "variant=rye&quantity=1", Some(SIGNED_IN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(api.cart_lines("tok-customer").is_empty());
}

#[tokio::test]
async fn unknown_variant_shows_the_api_message() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        form_request("/cart/items", "variant=999", Some(SIGNED_IN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("object does not exist"));
}

#[tokio::test]
async fn adding_without_a_session_goes_to_login() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        form_request("/cart/items", "variant=3", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    assert!(api.cart_lines("tok-customer").is_empty());
}

#[tokio::test]
async fn removing_a_line_empties_the_cart() {
    let api = FakeBakery::start().await;
    add(&api, SIGNED_IN, "variant=3").await;

    let html = body_text(send(storefront(api.base_url()), get_request("/billing", Some(SIGNED_IN))).await).await;
    assert!(html.contains(r#"action="/billing/items/1/remove""#));

    let response = send(
        storefront(api.base_url()),
        form_request("/billing/items/1/remove", "", Some(SIGNED_IN)),
    )
    .await;
    assert_eq!(location(&response), Some("/billing?notice=removed"));
    assert!(api.cart_lines("tok-customer").is_empty());
}

#[tokio::test]
async fn coupon_discounts_the_total() {
    let api = FakeBakery::start().await;
    add(&api, SIGNED_IN, "variant=3&quantity=2").await;

    let form = format!("code={COUPON}");
    let response = send(
        storefront(api.base_url()),
        form_request("/billing/coupon", &form, Some(SIGNED_IN)),
    )
    .await;
    assert_eq!(location(&response), Some("/billing?notice=coupon"));

    let html = body_text(
        send(
            storefront(api.base_url()),
            get_request("/billing?notice=coupon", Some(SIGNED_IN)),
        )
        .await,
    )
    .await;
    assert!(html.contains("Coupon applied."));
    assert!(html.contains(COUPON));
    // $13.00 less 10%
    assert!(html.contains("-$1.30"));
    assert!(html.contains("$11.70"));
}

#[tokio::test]
async fn invalid_coupon_is_reported() {
    let api = FakeBakery::start().await;
    add(&api, SIGNED_IN, "variant=3").await;

    for (code, message) in [("STALE", "Invalid coupon code"), ("", "Enter a coupon code.")] {
        let form = format!("code={code}");
        let response = send(
            storefront(api.base_url()),
            form_request("/billing/coupon", &form, Some(SIGNED_IN)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{code}");
        let html = body_text(response).await;
        assert!(html.contains(message), "{code}");
        assert!(html.contains("Loaf 03"), "{code}");
    }
}

#[tokio::test]
async fn checkout_shows_the_confirmation() {
    let api = FakeBakery::start().await;
    add(&api, SIGNED_IN, "variant=3").await;

    let response = send(
        storefront(api.base_url()),
        form_request("/billing/checkout", "", Some(SIGNED_IN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Thank you for ordering!"));
    assert!(html.contains("Your order has been placed successfully."));
    assert!(html.contains(&format!("#{PLACED_ORDER}")));
    assert!(html.contains("Download Invoice"));
    assert!(html.contains("Continue Shopping"));
    assert!(api.cart_lines("tok-customer").is_empty());
}

#[tokio::test]
async fn checkout_with_empty_cart_is_refused() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        form_request("/billing/checkout", "", Some(SIGNED_IN)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Your cart is empty"));
    assert!(!html.contains("Thank you for ordering!"));
}

#[tokio::test]
async fn checkout_without_an_order_shows_the_message() {
    let api = FakeBakery::start().await;
    let wholesale = "token=tok-wholesale";
    add(&api, wholesale, "variant=2").await;

    let response = send(
        storefront(api.base_url()),
        form_request("/billing/checkout", "", Some(wholesale)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Please contact with Admin for place this order"));
    assert_eq!(api.cart_lines("tok-wholesale"), vec![(2, 1)]);
}
