use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenService;
use chrono::Utc;

use crate::domain::user::models::IssuedToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service for registration, login, and subject resolution.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_service: Arc<TokenService>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, token_service: Arc<TokenService>) -> Self {
        Self {
            repository,
            token_service,
            password_hasher: auth::PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Pre-write lookup keeps the common path a clean 400; the unique
        // index in the store closes the check-then-insert race.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::warn!(username = %command.username, "Registration rejected, username taken");
            return Err(UserError::UsernameTaken(command.username.to_string()));
        }

        let hashed_password = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Password(e.to_string()))?;

        let user = User {
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            disabled: false,
            superuser: false,
            hashed_password,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(username = %created.username, "User registered");

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, UserError> {
        // An unparseable username cannot belong to any account; report it
        // exactly like an unknown one.
        let username = Username::new(username.to_string())
            .map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_username(&username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let password_matches = self
            .password_hasher
            .verify(password, &user.hashed_password)
            .map_err(|e| UserError::Password(e.to_string()))?;

        if !password_matches {
            tracing::warn!(username = %username, "Login rejected, bad credentials");
            return Err(UserError::InvalidCredentials);
        }

        let access_token = self
            .token_service
            .issue(user.username.as_str())
            .map_err(|e| UserError::Token(e.to_string()))?;

        tracing::info!(username = %username, "Login succeeded");
        Ok(IssuedToken { access_token })
    }

    async fn resolve_subject(&self, username: &Username) -> Result<User, UserError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(UserError::NotFound(username.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenConfig;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        }
    }

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(&TokenConfig {
            secret: "test-secret-key-for-jwt-signing-at-least-32-bytes".to_string(),
            access_token_ttl_minutes: 30,
        }))
    }

    fn stored_user(username: &str, password: &str) -> User {
        let hasher = auth::PasswordHasher::new();
        User {
            username: Username::new(username.to_string()).unwrap(),
            email: Some(EmailAddress::new(format!("{username}@example.com")).unwrap()),
            full_name: None,
            disabled: false,
            superuser: false,
            hashed_password: hasher.hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && !user.disabled
                    && user.hashed_password.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), token_service());

        let command = RegisterUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: Some(EmailAddress::new("test@example.com".to_string()).unwrap()),
            full_name: Some("Test User".to_string()),
            password: "password123".to_string(),
        };

        let user = service.register(command).await.unwrap();
        assert_eq!(user.username.as_str(), "testuser");
        // Digest is stored, plaintext is not
        assert_ne!(user.hashed_password, "password123");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("testuser", "whatever"))));
        // Pre-write lookup short-circuits before any insert
        repository.expect_create().times(0);

        let service = UserService::new(Arc::new(repository), token_service());

        let command = RegisterUserCommand {
            username: Username::new("testuser".to_string()).unwrap(),
            email: None,
            full_name: None,
            password: "password123".to_string(),
        };

        let result = service.register(command).await;
        assert!(matches!(result, Err(UserError::UsernameTaken(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("alice", "pass_word!"))));

        let tokens = token_service();
        let service = UserService::new(Arc::new(repository), Arc::clone(&tokens));

        let issued = service.login("alice", "pass_word!").await.unwrap();
        assert_eq!(tokens.verify(&issued.access_token).unwrap(), "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(stored_user("alice", "pass_word!"))));

        let service = UserService::new(Arc::new(repository), token_service());

        let result = service.login("alice", "wrong_password").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_username_is_indistinguishable() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), token_service());

        let result = service.login("nobody", "pass_word!").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_resolve_subject_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), token_service());

        let username = Username::new("ghost".to_string()).unwrap();
        let result = service.resolve_subject(&username).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
