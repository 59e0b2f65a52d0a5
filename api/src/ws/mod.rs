//! Websocket endpoint at `/marketplace/api/ws/main`.
//!
//! Each text frame is a JSON request answered by exactly one JSON reply.
//! The session travels with the connection; a frame may carry a token in
//! its `auth` envelope, and every reply reports the resulting auth state.

pub mod dispatcher;
pub mod protocol;
pub mod session;

pub use dispatcher::Dispatcher;
pub use protocol::{Action, AuthState, ClientMessage, ServerMessage, ServerPayload, Status};
pub use session::upgrade;
