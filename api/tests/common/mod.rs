//! Shared setup for the API integration tests

#![allow(dead_code)]

use fl_api::AppState;
use fl_core::{OrganizationCommand, SaveUserCommand, SessionContext, User};
use fl_shared::config::{AppConfig, Environment, JwtConfig};

pub const SECRET: &str = "integration-test-secret";
pub const SELLER_EMAIL: &str = "seller@foodloopz.se";
pub const SELLER_PASSWORD: &str = "correct horse battery staple";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::with_jwt(Environment::Development, JwtConfig::new(SECRET));
    config.auth.password.hash_cost = 4;
    config
}

pub async fn test_state() -> AppState {
    let state = AppState::new(&test_config()).expect("valid test configuration");
    state.seed_categories().await.expect("categories seeded");
    state
}

/// Registers a seller with an organization account
pub async fn register_seller(state: &AppState) -> User {
    state
        .user_service
        .save_update_user(
            &SessionContext::Anonymous,
            SaveUserCommand {
                email: SELLER_EMAIL.to_string(),
                password: Some(SELLER_PASSWORD.to_string()),
                verify_password: Some(SELLER_PASSWORD.to_string()),
                organization: Some(OrganizationCommand {
                    organization_number: 5567037485,
                    name: "Bageriet AB".to_string(),
                    address: "Storgatan 1".to_string(),
                    zip_code: "111 22".to_string(),
                    city: "Stockholm".to_string(),
                }),
                ..Default::default()
            },
        )
        .await
        .expect("seller registered")
        .user
}
