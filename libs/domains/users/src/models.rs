use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A registered account. Created once, never updated by this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    /// Display name, `nome` on the wire
    #[serde(rename = "nome")]
    pub name: String,
    /// Unique across all users
    pub email: String,
    /// Argon2 PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Assigns a fresh time-ordered id and the current timestamp.
    pub fn new(input: NewUser) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Fields handed to [`crate::UsersRepository::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "nome must not be empty"))]
    #[schema(example = "Juan Frederico")]
    pub name: String,

    #[validate(email(message = "email must be a valid e-mail address"))]
    #[schema(example = "juanFred@gmail.com")]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    #[schema(example = "123456", min_length = 6)]
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for RegisterUserInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterUserOutput {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(request("Juan Frederico", "juanFred@gmail.com", "123456").validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_each_bad_field() {
        assert!(request("", "juanFred@gmail.com", "123456").validate().is_err());
        assert!(request("Juan", "not-an-email", "123456").validate().is_err());
        assert!(request("Juan", "juanFred@gmail.com", "12345").validate().is_err());
    }

    #[test]
    fn test_password_length_counts_characters() {
        // six characters, more than six bytes
        assert!(request("Juan", "juanFred@gmail.com", "çççççç").validate().is_ok());
    }

    #[test]
    fn test_register_request_reads_nome() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"nome":"Juan Frederico","email":"juanFred@gmail.com","password":"123456"}"#,
        )
        .unwrap();
        assert_eq!(req.name, "Juan Frederico");
    }

    #[test]
    fn test_user_serialization_hides_hash() {
        let user = User::new(NewUser {
            name: "Juan Frederico".into(),
            email: "juanFred@gmail.com".into(),
            password_hash: "$argon2id$v=19$...".into(),
        });

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["nome"], "Juan Frederico");
        assert!(json.get("password_hash").is_none());
    }
}
