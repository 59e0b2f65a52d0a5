//! Unit tests for user save/update

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::SessionContext;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{
    InMemoryOrganizationRepository, InMemoryUserRepository, OrganizationRepository, UserRepository,
};
use crate::services::auth::PasswordHasher;
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::users::{OrganizationCommand, SaveUserCommand, UserService};

struct Fixture {
    users: Arc<InMemoryUserRepository>,
    organizations: Arc<InMemoryOrganizationRepository>,
    tokens: Arc<TokenService>,
    service: UserService<InMemoryUserRepository, InMemoryOrganizationRepository>,
}

fn fixture() -> Fixture {
    let users = Arc::new(InMemoryUserRepository::new());
    let organizations = Arc::new(InMemoryOrganizationRepository::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("test-secret")).unwrap());
    let service = UserService::new(
        users.clone(),
        organizations.clone(),
        tokens.clone(),
        PasswordHasher::new(4),
    );
    Fixture {
        users,
        organizations,
        tokens,
        service,
    }
}

fn registration(email: &str) -> SaveUserCommand {
    SaveUserCommand {
        email: email.to_string(),
        password: Some("password1".to_string()),
        verify_password: Some("password1".to_string()),
        ..Default::default()
    }
}

fn bakery(number: u64) -> OrganizationCommand {
    OrganizationCommand {
        organization_number: number,
        name: "Bageriet AB".to_string(),
        address: "Storgatan 1".to_string(),
        zip_code: "111 22".to_string(),
        city: "Stockholm".to_string(),
    }
}

fn session_for(user: &User) -> SessionContext {
    SessionContext::authenticated(user.id, user.email.clone(), "token", Utc::now() + Duration::days(7))
}

#[tokio::test]
async fn test_register_without_organization() {
    let f = fixture();
    let user = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("new@foodloopz.se"))
        .await
        .unwrap()
        .user;

    assert_eq!(user.id, 1);
    assert_eq!(user.username, "new@foodloopz.se");
    assert_eq!(user.roles, vec![Role::Account]);
    assert!(f.organizations.find_account_by_user(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_with_organization() {
    let f = fixture();
    let mut command = registration("admin@bageriet.se");
    command.organization = Some(bakery(5560360793));

    let user = f.service.save_update_user(&SessionContext::Anonymous, command).await.unwrap().user;

    assert!(user.has_role(Role::AccountAdmin));
    assert!(user.has_role(Role::Account));
    let account = f.organizations.find_account_by_user(user.id).await.unwrap().unwrap();
    let org = f.organizations.find_by_id(account.organization_id).await.unwrap().unwrap();
    assert_eq!(org.organization_number, 5560360793);
}

#[tokio::test]
async fn test_register_rejects_invalid_organization_number() {
    let f = fixture();
    let mut command = registration("admin@bageriet.se");
    command.organization = Some(bakery(5560360794));

    let result = f.service.save_update_user(&SessionContext::Anonymous, command).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Validation(ValidationError::InvalidOrganizationNumber { number: 5560360794 })
    );
    // Nothing was written
    assert!(f.users.find_by_email("admin@bageriet.se").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejects_taken_organization_number() {
    let f = fixture();
    let mut first = registration("first@bageriet.se");
    first.organization = Some(bakery(5560360793));
    f.service.save_update_user(&SessionContext::Anonymous, first).await.unwrap();

    let mut second = registration("second@bageriet.se");
    second.organization = Some(bakery(5560360793));
    let result = f.service.save_update_user(&SessionContext::Anonymous, second).await;

    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::DuplicateValue { .. }))
    ));
}

#[tokio::test]
async fn test_register_rules() {
    let f = fixture();
    f.service
        .save_update_user(&SessionContext::Anonymous, registration("taken@foodloopz.se"))
        .await
        .unwrap();

    let duplicate = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("taken@foodloopz.se"))
        .await;
    assert!(matches!(
        duplicate,
        Err(DomainError::Auth(AuthError::UserAlreadyExists { .. }))
    ));

    let mut mismatch = registration("other@foodloopz.se");
    mismatch.verify_password = Some("different".to_string());
    assert_eq!(
        f.service
            .save_update_user(&SessionContext::Anonymous, mismatch)
            .await
            .unwrap_err(),
        DomainError::Auth(AuthError::PasswordsDoNotMatch)
    );

    let mut no_password = registration("other@foodloopz.se");
    no_password.password = None;
    assert!(matches!(
        f.service.save_update_user(&SessionContext::Anonymous, no_password).await,
        Err(DomainError::Validation(ValidationError::RequiredField { .. }))
    ));

    assert_eq!(
        f.service
            .save_update_user(&SessionContext::Anonymous, registration("not-an-email"))
            .await
            .unwrap_err(),
        DomainError::Validation(ValidationError::InvalidEmail)
    );
}

#[tokio::test]
async fn test_update_own_user() {
    let f = fixture();
    let user = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;

    let command = SaveUserCommand {
        user_id: Some(user.id),
        email: "me2@foodloopz.se".to_string(),
        username: Some("me2".to_string()),
        first_name: Some("Ada".to_string()),
        ..Default::default()
    };
    let updated = f.service.save_update_user(&session_for(&user), command).await.unwrap().user;

    assert_eq!(updated.id, user.id);
    assert_eq!(updated.email, "me2@foodloopz.se");
    assert_eq!(updated.username, "me2");
    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.password_hash, user.password_hash);
}

#[tokio::test]
async fn test_cannot_update_other_user() {
    let f = fixture();
    let me = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;
    let other = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("other@foodloopz.se"))
        .await
        .unwrap()
        .user;

    let command = SaveUserCommand {
        user_id: Some(other.id),
        email: "hijack@foodloopz.se".to_string(),
        ..Default::default()
    };
    let result = f.service.save_update_user(&session_for(&me), command).await;
    assert!(matches!(result, Err(DomainError::Forbidden { .. })));
}

#[tokio::test]
async fn test_logged_in_user_cannot_register() {
    let f = fixture();
    let me = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;

    let result = f
        .service
        .save_update_user(&session_for(&me), registration("second@foodloopz.se"))
        .await;
    assert!(matches!(result, Err(DomainError::Forbidden { .. })));
}

#[tokio::test]
async fn test_anonymous_cannot_update_existing_user() {
    let f = fixture();
    let user = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;

    let command = SaveUserCommand {
        user_id: Some(user.id),
        email: "changed@foodloopz.se".to_string(),
        ..Default::default()
    };
    let result = f.service.save_update_user(&SessionContext::Anonymous, command).await;
    assert_eq!(result.unwrap_err(), DomainError::Auth(AuthError::AuthenticationRequired));
}

#[tokio::test]
async fn test_email_change_reissues_session() {
    let f = fixture();
    let user = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;
    let session = session_for(&user);

    let command = SaveUserCommand {
        user_id: Some(user.id),
        email: "renamed@foodloopz.se".to_string(),
        ..Default::default()
    };
    let saved = f.service.save_update_user(&session, command).await.unwrap();

    assert!(saved.session.token_changed(session.token()));
    assert_eq!(saved.session.user_id(), Some(user.id));
    assert_eq!(saved.session.email(), Some("renamed@foodloopz.se"));
    let token = saved.session.token().unwrap();
    assert_eq!(
        f.tokens.extract_email(Some(token)).as_deref(),
        Some("renamed@foodloopz.se")
    );
}

#[tokio::test]
async fn test_update_without_email_change_keeps_session() {
    let f = fixture();
    let user = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;
    let session = session_for(&user);

    let command = SaveUserCommand {
        user_id: Some(user.id),
        email: "me@foodloopz.se".to_string(),
        last_name: Some("Lovelace".to_string()),
        ..Default::default()
    };
    let saved = f.service.save_update_user(&session, command).await.unwrap();

    assert_eq!(saved.user.last_name, "Lovelace");
    assert_eq!(saved.session, session);
}

#[tokio::test]
async fn test_registration_keeps_anonymous_session() {
    let f = fixture();
    let saved = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("new@foodloopz.se"))
        .await
        .unwrap();
    assert!(saved.session.is_anonymous());
}

#[tokio::test]
async fn test_user_profile_requires_login() {
    let f = fixture();
    let me = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("me@foodloopz.se"))
        .await
        .unwrap()
        .user;
    let other = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("other@foodloopz.se"))
        .await
        .unwrap()
        .user;

    let profile = f.service.user_profile(&session_for(&me), other.id).await.unwrap();
    assert_eq!(profile.email, "other@foodloopz.se");

    assert_eq!(
        f.service.user_profile(&SessionContext::Anonymous, other.id).await.unwrap_err(),
        DomainError::Auth(AuthError::AuthenticationRequired)
    );
    assert!(matches!(
        f.service.user_profile(&session_for(&me), 99).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_update_own_organization() {
    let f = fixture();
    let mut command = registration("admin@bageriet.se");
    command.organization = Some(bakery(5560360793));
    let admin = f.service.save_update_user(&SessionContext::Anonymous, command).await.unwrap().user;
    let account = f.organizations.find_account_by_user(admin.id).await.unwrap().unwrap();

    let mut change = bakery(5560360793);
    change.name = "Bageriet i Solna AB".to_string();
    change.city = "Solna".to_string();
    let updated = f
        .service
        .update_organization(&session_for(&admin), account.organization_id, change)
        .await
        .unwrap();

    assert_eq!(updated.name, "Bageriet i Solna AB");
    assert_eq!(updated.city, "Solna");
    let read = f
        .service
        .organization(&session_for(&admin), account.organization_id)
        .await
        .unwrap();
    assert_eq!(read, updated);
}

#[tokio::test]
async fn test_cannot_update_foreign_organization() {
    let f = fixture();
    let mut command = registration("admin@bageriet.se");
    command.organization = Some(bakery(5560360793));
    let admin = f.service.save_update_user(&SessionContext::Anonymous, command).await.unwrap().user;
    let bakery_id = f
        .organizations
        .find_account_by_user(admin.id)
        .await
        .unwrap()
        .unwrap()
        .organization_id;

    let mut command = registration("admin@gront.se");
    command.organization = Some(bakery(5567037485));
    let competitor = f.service.save_update_user(&SessionContext::Anonymous, command).await.unwrap().user;
    let loner = f
        .service
        .save_update_user(&SessionContext::Anonymous, registration("loner@foodloopz.se"))
        .await
        .unwrap()
        .user;

    for session in [session_for(&competitor), session_for(&loner)] {
        let result = f
            .service
            .update_organization(&session, bakery_id, bakery(5560360793))
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden { .. })));
    }

    // Reading stays open to any logged in user
    assert!(f.service.organization(&session_for(&loner), bakery_id).await.is_ok());
    assert_eq!(
        f.service
            .update_organization(&SessionContext::Anonymous, bakery_id, bakery(5560360793))
            .await
            .unwrap_err(),
        DomainError::Auth(AuthError::AuthenticationRequired)
    );
}

#[tokio::test]
async fn test_organization_update_rejects_invalid_number() {
    let f = fixture();
    let mut command = registration("admin@bageriet.se");
    command.organization = Some(bakery(5560360793));
    let admin = f.service.save_update_user(&SessionContext::Anonymous, command).await.unwrap().user;
    let account = f.organizations.find_account_by_user(admin.id).await.unwrap().unwrap();

    let result = f
        .service
        .update_organization(&session_for(&admin), account.organization_id, bakery(5560360794))
        .await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Validation(ValidationError::InvalidOrganizationNumber { number: 5560360794 })
    );
}
