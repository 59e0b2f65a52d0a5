//! # Foodloopz Core
//!
//! Core business logic and domain layer for the Foodloopz marketplace backend.
//! This crate contains domain entities, business services, repository
//! interfaces with in-memory implementations, and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Account, Ad, AuthProfile, AuthenticatedSession, Category, Claims, Organization, Role,
    SessionContext, User,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    AdRepository, InMemoryAdRepository, InMemoryOrganizationRepository, InMemoryUserRepository,
    OrganizationRepository, UserRepository,
};
pub use services::{
    AuthService, ChangePasswordCommand, LoginOutcome, MarketplaceService, OrganizationCommand,
    PasswordHasher, SaveAdCommand, SaveUserCommand, SavedUser, TokenAssessment, TokenService,
    TokenServiceConfig, UserService,
};
