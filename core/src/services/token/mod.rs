//! Token service module for JWT management
//!
//! Issues signed, time-limited tokens identifying a user by email and
//! decides whether an inbound token is still usable, due for renewal or
//! past its renewal limit. There is no server-side token store.

mod config;
mod service;


pub use config::{parse_algorithm, TokenServiceConfig};
pub use service::{TokenAssessment, TokenService};
