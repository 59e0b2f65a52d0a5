//! REST routes mounted under `/api`.

pub mod ads;
pub mod auth;
pub mod organizations;
pub mod users;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login::login))
            .route("/check-login", web::get().to(auth::check_login::check_login))
            .route("/logout", web::post().to(auth::logout::logout))
            .route("/password-change", web::post().to(auth::password::change_password))
            .route("/password-reset", web::post().to(auth::password::reset_password)),
    )
    .route("/users", web::post().to(users::save_update_user))
    .route("/users/{id}", web::get().to(users::user_profile))
    .route("/users/{id}", web::put().to(users::update_user_profile))
    .route("/organizations/{id}", web::get().to(organizations::organization))
    .route("/organizations/{id}", web::put().to(organizations::update_organization))
    .route("/ads/top", web::get().to(ads::top_ads))
    .route("/ads/search", web::post().to(ads::search_ads))
    .route("/ads/{id}", web::get().to(ads::view_ad))
    .route("/ads", web::post().to(ads::save_update_ad))
    .route("/categories", web::get().to(ads::categories));
}
