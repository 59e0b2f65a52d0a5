//! Domain entities representing core business objects.

pub mod ad;
pub mod organization;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use ad::{Ad, Category};
pub use organization::{Account, Organization};
pub use token::Claims;
pub use user::{Role, User};
