//! Authentication route handlers
//!
//! Login, login check, logout and password management. The session itself
//! travels in the cookie maintained by `SessionCookieAuth`.

pub mod check_login;
pub mod login;
pub mod logout;
pub mod password;
