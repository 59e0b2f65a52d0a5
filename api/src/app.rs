//! Application state and factory
//!
//! This module wires the repositories and services into an `AppState` and
//! builds the Actix-web application around it.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use fl_core::repositories::{AdRepository, InMemoryAdRepository, InMemoryOrganizationRepository, InMemoryUserRepository};
use fl_core::{
    AuthService, Category, DomainError, DomainResult, MarketplaceService, PasswordHasher,
    TokenService, TokenServiceConfig, UserService,
};
use fl_shared::config::{AppConfig, CorsConfig, SessionCookieConfig};
use fl_shared::errors::{error_codes, ErrorResponse};
use tracing_actix_web::TracingLogger;

use crate::middleware::{create_cors, SessionCookieAuth};
use crate::{routes, ws};

pub type AppAuthService = AuthService<InMemoryUserRepository, InMemoryOrganizationRepository>;
pub type AppUserService = UserService<InMemoryUserRepository, InMemoryOrganizationRepository>;
pub type AppMarketplaceService = MarketplaceService<InMemoryAdRepository, InMemoryOrganizationRepository>;

/// Categories available on a fresh marketplace
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Bread & Bakery",
    "Fruit & Vegetables",
    "Dairy & Eggs",
    "Meat & Fish",
    "Prepared Meals",
    "Other",
];

/// Services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AppAuthService>,
    pub user_service: Arc<AppUserService>,
    pub marketplace_service: Arc<AppMarketplaceService>,
    pub ad_repository: Arc<InMemoryAdRepository>,
    pub cookie: SessionCookieConfig,
}

impl AppState {
    /// Build the state from configuration
    ///
    /// Fails when the token signing configuration is unusable, e.g. an
    /// empty secret or a non-HMAC algorithm.
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::try_from(
            &config.auth.jwt,
        )?)?);
        let password_hasher = PasswordHasher::from(&config.auth.password);

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let organization_repository = Arc::new(InMemoryOrganizationRepository::new());
        let ad_repository = Arc::new(InMemoryAdRepository::new());

        Ok(Self {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&user_repository),
                Arc::clone(&organization_repository),
                Arc::clone(&token_service),
                password_hasher,
            )),
            user_service: Arc::new(UserService::new(
                user_repository,
                Arc::clone(&organization_repository),
                token_service,
                password_hasher,
            )),
            marketplace_service: Arc::new(MarketplaceService::new(
                Arc::clone(&ad_repository),
                organization_repository,
            )),
            ad_repository,
            cookie: config.auth.cookie.clone(),
        })
    }

    /// Create the default categories
    pub async fn seed_categories(&self) -> DomainResult<()> {
        for name in DEFAULT_CATEGORIES {
            self.ad_repository
                .create_category(Category::new(*name, None))
                .await?;
        }
        tracing::info!(count = DEFAULT_CATEGORIES.len(), "Seeded ad categories");
        Ok(())
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    state: AppState,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let session_auth = SessionCookieAuth::new(Arc::clone(&state.auth_service), state.cookie.clone());

    App::new()
        .app_data(web::Data::new(state))
        // Order matters: session handling innermost, request tracing outermost
        .wrap(session_auth)
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .configure(configure)
}

/// Route table, shared by the server and the integration tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(web::scope("/api").configure(routes::configure))
        .route("/marketplace/api/ws/main", web::get().to(ws::upgrade))
        .default_service(web::route().to(not_found));
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "foodloopz-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
