//! Storefront pages, login and ambient middleware.

use axum::http::StatusCode;
use bakehouse_integration_tests::{
    FakeBakery, PASSWORD, body_text, form_request, get_request, location, send, set_cookies,
    storefront, unreachable_api,
};

#[tokio::test]
async fn catalog_page_two_shows_pagination() {
    let api = FakeBakery::start().await;
    let response = send(storefront(api.base_url()), get_request("/products?page=2", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Loaf 13"));
    assert!(!html.contains("Loaf 12"));
    assert!(html.contains("Showing data 13 to 24 of 25 entries"));
    assert!(html.contains(r#"<span class="page-indicator is-active" aria-current="page">2</span>"#));
    assert!(html.contains(r#"href="/products?page=3""#));
}

#[tokio::test]
async fn short_listing_has_no_pagination() {
    let api = FakeBakery::start().await;
    let html = body_text(send(storefront(api.base_url()), get_request("/blog", None)).await).await;
    assert!(html.contains("Why we proof overnight"));
    assert!(!html.contains(r#"class="pagination""#));
}

#[tokio::test]
async fn product_detail_and_missing_product() {
    let api = FakeBakery::start().await;

    let found = send(storefront(api.base_url()), get_request("/products/3", None)).await;
    assert_eq!(found.status(), StatusCode::OK);
    assert!(body_text(found).await.contains("Loaf 03"));

    let missing = send(storefront(api.base_url()), get_request("/products/999", None)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = send(storefront(api.base_url()), get_request("/products/rye", None)).await;
    assert_eq!(malformed.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_sets_token_cookie_and_redirects() {
    let api = FakeBakery::start().await;
    let form = format!("email=ana%40example.com&password={PASSWORD}");
    let response = send(storefront(api.base_url()), form_request("/login", &form, None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/dashboard"));
    let cookies = set_cookies(&response);
    let token = cookies
        .iter()
        .find(|c| c.starts_with("token="))
        .cloned()
        .unwrap_or_default();
    assert!(token.starts_with("token=tok-customer"));
    assert!(token.contains("HttpOnly"));
    assert!(token.contains("SameSite=Lax"));
}

#[tokio::test]
async fn wrong_password_rerenders_form() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        form_request("/login", "email=ana%40example.com&password=nope", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    assert!(body_text(response).await.contains("Invalid email or password."));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        form_request("/logout", "", Some("token=tok-customer")),
    )
    .await;
    assert_eq!(location(&response), Some("/"));
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("token=;")));
}

#[tokio::test]
async fn unreachable_api_degrades_to_banner() {
    let api = unreachable_api().await;
    let response = send(storefront(&api), get_request("/products", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("load the catalog"));
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let api = FakeBakery::start().await;
    let response = send(storefront(api.base_url()), get_request("/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(
        headers.get("x-frame-options").and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
}

#[tokio::test]
async fn blog_posts_open_by_slug_or_id() {
    let api = FakeBakery::start().await;

    let index = body_text(send(storefront(api.base_url()), get_request("/blog", None)).await).await;
    assert!(index.contains(r#"href="/blog/proofing""#));

    for path in ["/blog/proofing", "/blog/1"] {
        let response = send(storefront(api.base_url()), get_request(path, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let html = body_text(response).await;
        assert!(html.contains("Why we proof overnight"), "{path}");
        assert!(html.contains("<p>Slow dough tastes better.</p>"), "{path}");
    }
}

#[tokio::test]
async fn unknown_blog_post_is_not_found() {
    let api = FakeBakery::start().await;
    let response = send(storefront(api.base_url()), get_request("/blog/nope", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_post_pages_are_not_guarded() {
    let api = FakeBakery::start().await;
    let response = send(
        storefront(api.base_url()),
        get_request("/blog/bakers", Some("token=tok-customer")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Four ovens, six people."));
}
