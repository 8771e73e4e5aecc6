use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UsersRepository,
};

/// PostgreSQL-backed [`UsersRepository`].
///
/// Uniqueness of `email` is enforced by the `users` table's unique index; a
/// violation on insert surfaces as [`UserError::AlreadyExists`].
#[derive(Clone)]
pub struct PgUsersRepository {
    db: DatabaseConnection,
}

impl PgUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: DbErr, email: String) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::AlreadyExists(email),
        _ => UserError::Database(err),
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let user = User::new(user);
        let email = user.email.clone();
        let active: entity::ActiveModel = user.into();

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, email))?;

        tracing::info!(user_id = %model.id, "Created user");
        Ok(model.into())
    }
}
