use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Persistence for [`User`].
///
/// `create` must reject an e-mail that is already stored with
/// [`UserError::AlreadyExists`], even when the caller checked first: two
/// concurrent registrations can both pass `find_by_email`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Exact, case-sensitive match. `Ok(None)` when nobody has it.
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Store a new user and return it with its generated id.
    async fn create(&self, user: NewUser) -> UserResult<User>;
}

/// Map keyed by e-mail. Used by tests and local runs without a database.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUsersRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(UserError::AlreadyExists(user.email));
        }

        let user = User::new(user);
        users.insert(user.email.clone(), user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Juan Frederico".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_is_findable() {
        let repo = InMemoryUsersRepository::new();

        let created = repo.create(new_user("juanFred@gmail.com")).await.unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(created.name, "Juan Frederico");

        let by_email = repo.find_by_email("juanFred@gmail.com").await.unwrap();
        assert_eq!(by_email, Some(created.clone()));

        let by_id = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id, Some(created));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = InMemoryUsersRepository::new();
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(repo.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact_match() {
        let repo = InMemoryUsersRepository::new();
        repo.create(new_user("juanFred@gmail.com")).await.unwrap();

        assert!(repo.find_by_email("juanfred@gmail.com").await.unwrap().is_none());
        assert!(repo.find_by_email("juanFred@gmail.co").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = InMemoryUsersRepository::new();
        repo.create(new_user("juanFred@gmail.com")).await.unwrap();

        let err = repo.create(new_user("juanFred@gmail.com")).await.unwrap_err();
        assert!(matches!(err, UserError::AlreadyExists(ref e) if e == "juanFred@gmail.com"));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_one_user() {
        let repo = InMemoryUsersRepository::new();

        let attempts = (0..8).map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(new_user("race@example.com")).await })
        });

        let mut created = 0;
        for handle in attempts {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.len().await, 1);
    }
}
