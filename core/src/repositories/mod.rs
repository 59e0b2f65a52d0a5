pub mod ad;
pub mod organization;
pub mod user;

pub use ad::{AdRepository, InMemoryAdRepository};
pub use organization::{InMemoryOrganizationRepository, OrganizationRepository};
pub use user::{InMemoryUserRepository, UserRepository};
