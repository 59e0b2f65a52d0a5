//! Business services containing domain logic and use cases.

pub mod auth;
pub mod marketplace;
pub mod token;
pub mod users;

// Re-export commonly used types
pub use auth::{AuthService, ChangePasswordCommand, LoginOutcome, PasswordHasher};
pub use marketplace::{MarketplaceService, SaveAdCommand};
pub use token::{TokenAssessment, TokenService, TokenServiceConfig};
pub use users::{OrganizationCommand, SaveUserCommand, SavedUser, UserService};
