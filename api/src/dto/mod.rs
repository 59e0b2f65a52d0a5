//! Request and response bodies shared by the REST routes and the
//! websocket protocol.

pub mod ads;
pub mod auth;
pub mod error;
pub mod users;

pub use ads::{SaveAdRequest, SearchAdsRequest, ViewAdRequest};
pub use auth::{
    ChangePasswordRequest, LoginErrorResponse, LoginRequest, MessageResponse, ResetPasswordRequest,
};
pub use error::{ErrorResponse, ErrorResponseExt};
pub use users::{OrganizationRequest, SaveUserRequest, UserResponse};
