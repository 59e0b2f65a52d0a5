//! User registration and profile updates

mod service;

#[cfg(test)]
mod tests;

pub use service::{OrganizationCommand, SaveUserCommand, SavedUser, UserService};
