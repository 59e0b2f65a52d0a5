//! Integration tests for login and the session cookie lifecycle

mod common;

use actix_web::{
    cookie::Cookie,
    http::{header, StatusCode},
    test,
};
use chrono::{Duration, Utc};
use fl_api::create_app;
use fl_shared::config::CorsConfig;
use serde_json::{json, Value};

use common::{register_seller, test_state, SELLER_EMAIL, SELLER_PASSWORD};

fn set_cookie<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response().cookies().find(|c| c.name() == "token").map(|c| c.into_owned())
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_login_with_wrong_password_is_forbidden() {
    let state = test_state().await;
    register_seller(&state).await;
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": SELLER_EMAIL, "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(set_cookie(&resp).is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"errorMessage": "User could not be authenticated"}));
}

#[actix_web::test]
async fn test_login_with_unknown_email_is_forbidden() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "nobody@foodloopz.se", "password": "x"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_login_sets_cookie_and_returns_profile() {
    let state = test_state().await;
    register_seller(&state).await;
    let app = test::init_service(create_app(state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": SELLER_EMAIL, "password": SELLER_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = set_cookie(&resp).expect("token cookie set");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(
        state
            .auth_service
            .token_service()
            .extract_email(Some(cookie.value()))
            .as_deref(),
        Some(SELLER_EMAIL)
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], SELLER_EMAIL);
    assert_eq!(body["roles"], json!(["ROLE_ACCOUNT_ADMIN", "ROLE_ACCOUNT"]));
    assert!(body["organization"].is_number());
}

#[actix_web::test]
async fn test_check_login_anonymous() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/auth/check-login").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookie(&resp).is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"email": null, "roles": [], "organization": null}));
}

#[actix_web::test]
async fn test_current_token_is_not_rewritten() {
    let state = test_state().await;
    register_seller(&state).await;
    let token = state.auth_service.token_service().issue(SELLER_EMAIL).unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/check-login")
        .cookie(Cookie::new("token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(set_cookie(&resp).is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], SELLER_EMAIL);
}

#[actix_web::test]
async fn test_expired_token_within_limit_is_renewed() {
    let state = test_state().await;
    register_seller(&state).await;
    let token_service = state.auth_service.token_service();
    let old = token_service
        .issue_at(SELLER_EMAIL, Utc::now() - Duration::hours(1))
        .unwrap();
    let app = test::init_service(create_app(state.clone(), &CorsConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/check-login")
        .cookie(Cookie::new("token", old.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let cookie = set_cookie(&resp).expect("renewed token cookie");
    assert_ne!(cookie.value(), old);
    assert!(state.auth_service.token_service().assess(cookie.value()).is_accepted());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], SELLER_EMAIL);
}

#[actix_web::test]
async fn test_token_beyond_renewal_limit_is_cleared() {
    let state = test_state().await;
    register_seller(&state).await;
    let stale = state
        .auth_service
        .token_service()
        .issue_at(SELLER_EMAIL, Utc::now() - Duration::days(8))
        .unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/check-login")
        .cookie(Cookie::new("token", stale))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let cookie = set_cookie(&resp).expect("removal cookie");
    assert_eq!(cookie.value(), "");
    let body: Value = test::read_body_json(resp).await;
    assert!(body["email"].is_null());
}

#[actix_web::test]
async fn test_garbage_token_is_anonymous_and_cleared() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/check-login")
        .cookie(Cookie::new("token", "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = set_cookie(&resp).expect("removal cookie");
    assert_eq!(cookie.value(), "");
}

#[actix_web::test]
async fn test_logout_clears_cookie() {
    let state = test_state().await;
    register_seller(&state).await;
    let token = state.auth_service.token_service().issue(SELLER_EMAIL).unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .cookie(Cookie::new("token", token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = set_cookie(&resp).expect("removal cookie");
    assert_eq!(cookie.value(), "");
    assert!(resp.headers().get(header::SET_COOKIE).is_some());
}

#[actix_web::test]
async fn test_password_change_requires_login() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/password-change")
        .set_json(json!({"oldPassword": "a", "newPassword": "b", "verifyPassword": "b"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_password_change_then_login_with_new_password() {
    let state = test_state().await;
    register_seller(&state).await;
    let token = state.auth_service.token_service().issue(SELLER_EMAIL).unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/password-change")
        .cookie(Cookie::new("token", token))
        .set_json(json!({
            "oldPassword": SELLER_PASSWORD,
            "newPassword": "new-password",
            "verifyPassword": "new-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": SELLER_EMAIL, "password": "new-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_password_reset_is_unavailable() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/password-reset")
        .set_json(json!({"email": SELLER_EMAIL}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password could not be reset");
}
