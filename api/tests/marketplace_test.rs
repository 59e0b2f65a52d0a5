//! Integration tests for the ad, category and user routes

mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use fl_api::create_app;
use fl_shared::config::CorsConfig;
use serde_json::{json, Value};

use common::{register_seller, test_state, SELLER_EMAIL};

#[actix_web::test]
async fn test_categories_are_seeded() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), fl_api::app::DEFAULT_CATEGORIES.len());
    assert_eq!(categories[0]["id"], 1);
}

#[actix_web::test]
async fn test_create_ad_requires_login() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/ads")
        .set_json(json!({"heading": "Bread", "text": "Free", "categoryId": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_search_and_view_ad() {
    let state = test_state().await;
    register_seller(&state).await;
    let token = state.auth_service.token_service().issue(SELLER_EMAIL).unwrap();
    let app = test::init_service(create_app(state, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/ads")
        .cookie(Cookie::new("token", token.clone()))
        .set_json(json!({
            "heading": "Surplus sourdough",
            "text": "Twenty loaves from today",
            "categoryId": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ad: Value = test::read_body_json(resp).await;
    let ad_id = ad["id"].as_i64().unwrap();
    assert_eq!(ad["heading"], "Surplus sourdough");

    let req = test::TestRequest::post()
        .uri("/api/ads/search")
        .set_json(json!({"searchPhrase": "SOURDOUGH"}))
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri("/api/ads/search")
        .set_json(json!({"searchPhrase": "sourdough", "categoryId": 2}))
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert!(found.as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/api/ads/{}", ad_id))
        .to_request();
    let viewed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(viewed["text"], "Twenty loaves from today");

    let req = test::TestRequest::get().uri("/api/ads/top").to_request();
    let top: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(top[0]["id"], ad_id);
}

#[actix_web::test]
async fn test_view_unknown_ad_is_not_found() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/api/ads/999").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_register_user_over_rest() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "email": "buyer@foodloopz.se",
            "password": "pw",
            "verifyPassword": "pw"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = test::read_body_json(resp).await;
    assert_eq!(user["email"], "buyer@foodloopz.se");
    assert_eq!(user["roles"], json!(["ROLE_ACCOUNT"]));
    assert!(user.get("passwordHash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "email": "buyer@foodloopz.se",
            "password": "pw",
            "verifyPassword": "pw"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let app = test::init_service(create_app(test_state().await, &CorsConfig::default())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
