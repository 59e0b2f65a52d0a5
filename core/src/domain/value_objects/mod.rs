//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod session;

// Re-export commonly used types
pub use auth_response::AuthProfile;
pub use session::{AuthenticatedSession, SessionContext};
