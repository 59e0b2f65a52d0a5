//! HTTP and websocket front end of the Foodloopz marketplace.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
pub mod ws;

pub use app::{create_app, AppState};
