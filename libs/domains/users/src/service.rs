use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, RegisterUserInput, RegisterUserOutput};
use crate::password::PasswordHasher;
use crate::repository::UsersRepository;

/// Registers a new account.
///
/// One call performs one repository read and, on success, one write. It is
/// not idempotent: repeating it with the same e-mail fails with
/// [`UserError::AlreadyExists`].
pub struct RegisterUseCase<R: UsersRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UsersRepository> RegisterUseCase<R> {
    pub fn new(repository: R, hasher: PasswordHasher) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
        }
    }

    #[instrument(skip_all, fields(email = %input.email))]
    pub async fn execute(&self, input: RegisterUserInput) -> UserResult<RegisterUserOutput> {
        let password_hash = self.hasher.hash(&input.password).await?;

        if self.repository.find_by_email(&input.email).await?.is_some() {
            tracing::info!("E-mail already registered");
            return Err(UserError::AlreadyExists(input.email));
        }

        let user = self
            .repository
            .create(NewUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(RegisterUserOutput { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::password::PasswordHashConfig;
    use crate::repository::{InMemoryUsersRepository, MockUsersRepository};
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&PasswordHashConfig::fast()).unwrap()
    }

    fn juan() -> RegisterUserInput {
        RegisterUserInput {
            name: "Juan Frederico".to_string(),
            email: "juanFred@gmail.com".to_string(),
            password: "123456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_returns_user_with_id_and_hash() {
        let use_case = RegisterUseCase::new(InMemoryUsersRepository::new(), hasher());

        let RegisterUserOutput { user } = use_case.execute(juan()).await.unwrap();

        assert!(!user.id.is_nil());
        assert_eq!(user.name, "Juan Frederico");
        assert_eq!(user.email, "juanFred@gmail.com");
        assert_ne!(user.password_hash, "123456");
        assert!(hasher().verify("123456", &user.password_hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_register_twice_fails_and_keeps_one_record() {
        let repo = InMemoryUsersRepository::new();
        let use_case = RegisterUseCase::new(repo.clone(), hasher());

        use_case.execute(juan()).await.unwrap();
        let err = use_case.execute(juan()).await.unwrap_err();

        assert!(matches!(err, UserError::AlreadyExists(ref e) if e == "juanFred@gmail.com"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_conflict_does_not_write() {
        let mut repo = MockUsersRepository::new();
        repo.expect_find_by_email()
            .with(eq("juanFred@gmail.com"))
            .times(1)
            .returning(|email| {
                Ok(Some(User::new(NewUser {
                    name: "Someone Else".into(),
                    email: email.to_string(),
                    password_hash: "hash".into(),
                })))
            });
        repo.expect_create().never();

        let use_case = RegisterUseCase::new(repo, hasher());
        let err = use_case.execute(juan()).await.unwrap_err();
        assert!(matches!(err, UserError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_success_is_one_read_and_one_write() {
        let mut repo = MockUsersRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| new_user.name == "Juan Frederico" && new_user.password_hash != "123456")
            .times(1)
            .returning(|new_user| Ok(User::new(new_user)));

        let use_case = RegisterUseCase::new(repo, hasher());
        let output = use_case.execute(juan()).await.unwrap();
        assert_eq!(output.user.email, "juanFred@gmail.com");
    }

    #[tokio::test]
    async fn test_read_failure_propagates_unchanged() {
        let mut repo = MockUsersRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::Database(DbErr::Custom("connection reset".into()))));
        repo.expect_create().never();

        let use_case = RegisterUseCase::new(repo, hasher());
        let err = use_case.execute(juan()).await.unwrap_err();
        assert!(matches!(err, UserError::Database(DbErr::Custom(ref m)) if m == "connection reset"));
    }

    #[tokio::test]
    async fn test_write_failure_propagates_unchanged() {
        let mut repo = MockUsersRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(UserError::Database(DbErr::Custom("disk full".into()))));

        let use_case = RegisterUseCase::new(repo, hasher());
        let err = use_case.execute(juan()).await.unwrap_err();
        assert!(matches!(err, UserError::Database(DbErr::Custom(ref m)) if m == "disk full"));
    }

    #[tokio::test]
    async fn test_storage_conflict_on_create_is_already_exists() {
        // another request inserted the same e-mail between our read and write
        let mut repo = MockUsersRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|new_user| Err(UserError::AlreadyExists(new_user.email)));

        let use_case = RegisterUseCase::new(repo, hasher());
        let err = use_case.execute(juan()).await.unwrap_err();
        assert!(matches!(err, UserError::AlreadyExists(_)));
    }
}
