//! Users Domain
//!
//! Account registration: validate the request, hash the password, enforce a
//! unique e-mail and persist the user.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /users, maps UserError to HTTP
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Register   │  ← hash, uniqueness check, create
//! │  use case   │
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait; in-memory and PostgreSQL implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, NewUser, request/response DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     handlers, InMemoryUsersRepository, PasswordHashConfig, PasswordHasher, RegisterUseCase,
//! };
//!
//! let hasher = PasswordHasher::new(&PasswordHashConfig::default()).unwrap();
//! let use_case = RegisterUseCase::new(InMemoryUsersRepository::new(), hasher);
//! let router = handlers::router(use_case);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod password;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{NewUser, RegisterRequest, RegisterUserInput, RegisterUserOutput, User};
pub use password::{PasswordHashConfig, PasswordHasher};
pub use postgres::PgUsersRepository;
pub use repository::{InMemoryUsersRepository, UsersRepository};
pub use service::RegisterUseCase;
