//! Role-aware access guard and staff login through the admin router.

use axum::http::StatusCode;
use bakehouse_integration_tests::{
    FakeBakery, PASSWORD, admin, body_text, form_request, get_request, location, send,
    set_cookies,
};

fn staff(role: &str) -> String {
    format!("token=tok-{role}; role={role}")
}

#[tokio::test]
async fn staff_pages_need_a_token() {
    let api = FakeBakery::start().await;
    for path in ["/", "/dashboard", "/products", "/orders-management", "/notifications"] {
        let response = send(admin(api.base_url()), get_request(path, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn roles_are_sent_to_their_landing_page() {
    let api = FakeBakery::start().await;
    let cases = [
        ("accountant", "/dashboard", "/orders-management"),
        ("stock_manager", "/orders-management", "/products"),
        ("stock_manager", "/dashboard", "/products"),
        ("worker", "/notifications", "/login"),
    ];
    for (role, path, target) in cases {
        let cookie = staff(role);
        let response = send(admin(api.base_url()), get_request(path, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{role} {path}");
        assert_eq!(location(&response), Some(target), "{role} {path}");
    }
}

#[tokio::test]
async fn permitted_pages_render() {
    let api = FakeBakery::start().await;
    let cases = [
        ("admin", "/dashboard"),
        ("bakery", "/"),
        ("accountant", "/orders-management"),
        ("accountant", "/products"),
        ("stock_manager", "/notifications"),
    ];
    for (role, path) in cases {
        let cookie = staff(role);
        let response = send(admin(api.base_url()), get_request(path, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK, "{role} {path}");
    }
}

#[tokio::test]
async fn login_page_with_session_goes_to_landing() {
    let api = FakeBakery::start().await;
    let cookie = staff("admin");
    let response = send(admin(api.base_url()), get_request("/login", Some(&cookie))).await;
    assert_eq!(location(&response), Some("/dashboard"));

    let response = send(admin(api.base_url()), get_request("/login", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_sets_token_and_role() {
    let api = FakeBakery::start().await;
    let form = format!("email=stock_manager%40bakehouse.test&password={PASSWORD}");
    let response = send(admin(api.base_url()), form_request("/login", &form, None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/products"));
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("token=tok-stock_manager")));
    assert!(cookies.iter().any(|c| c.starts_with("role=stock_manager")));
    assert!(cookies.iter().all(|c| c.contains("SameSite=Strict")));
}

#[tokio::test]
async fn worker_login_is_refused() {
    let api = FakeBakery::start().await;
    let form = format!("email=worker%40bakehouse.test&password={PASSWORD}");
    let response = send(admin(api.base_url()), form_request("/login", &form, None)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(set_cookies(&response).is_empty());
    assert!(body_text(response).await.contains("no access to the admin panel"));
}

#[tokio::test]
async fn logout_clears_both_cookies() {
    let api = FakeBakery::start().await;
    let cookie = staff("admin");
    let response = send(admin(api.base_url()), form_request("/logout", "", Some(&cookie))).await;

    assert_eq!(location(&response), Some("/login"));
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("role=;")));
}

#[tokio::test]
async fn rejected_token_clears_both_cookies() {
    let api = FakeBakery::start().await;
    for path in ["/dashboard", "/products", "/orders-management", "/notifications"] {
        let response = send(
            admin(api.base_url()),
            get_request(path, Some("token=expired; role=admin")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/login"), "{path}");
        let cookies = set_cookies(&response);
        assert!(cookies.iter().any(|c| c.starts_with("token=;")), "{path} {cookies:?}");
        assert!(cookies.iter().any(|c| c.starts_with("role=;")), "{path} {cookies:?}");
    }
}

#[tokio::test]
async fn rejected_token_does_not_loop() {
    let api = FakeBakery::start().await;
    let mut cookie = Some("token=expired; role=admin".to_string());
    let mut path = "/dashboard".to_string();
    let mut hops = Vec::new();

    while hops.len() < 5 {
        let response = send(admin(api.base_url()), get_request(&path, cookie.as_deref())).await;
        if response.status() != StatusCode::SEE_OTHER {
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_text(response).await.contains(r#"action="/login""#));
            break;
        }
        // Apply the jar the browser would keep: a cleared cookie is dropped.
        if set_cookies(&response).iter().any(|c| c.starts_with("token=;")) {
            cookie = None;
        }
        path = location(&response).unwrap_or_default().to_string();
        hops.push(path.clone());
    }

    assert_eq!(hops, vec!["/login"]);
    assert_eq!(cookie, None);
}
