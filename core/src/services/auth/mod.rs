//! Authentication service module
//!
//! This module provides:
//! - Email and password login
//! - Session resolution from the inbound token, including renewal
//! - Logout and the check-login profile
//! - Password change and the (unavailable) password reset

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::PasswordHasher;
pub use service::{AuthService, ChangePasswordCommand, LoginOutcome};
