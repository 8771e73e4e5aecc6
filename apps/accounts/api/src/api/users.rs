use axum::Router;
use domain_users::{PgUsersRepository, RegisterUseCase, handlers};

use crate::state::AppState;

/// Wires the registration use case to PostgreSQL and the configured hasher.
pub fn make_register_use_case(state: &AppState) -> RegisterUseCase<PgUsersRepository> {
    let repository = PgUsersRepository::new(state.db.clone());
    RegisterUseCase::new(repository, state.hasher.clone())
}

pub fn router(state: &AppState) -> Router {
    handlers::router(make_register_use_case(state))
}
