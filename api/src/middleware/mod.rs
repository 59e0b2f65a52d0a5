pub mod auth;
pub mod cors;

pub use auth::{with_session, Authenticated, Session, SessionCookieAuth};
pub use cors::create_cors;
