use axum::{Router, extract::State, http::StatusCode, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::RegisterRequest;
use crate::repository::UsersRepository;
use crate::service::RegisterUseCase;

pub const TAG: &str = "users";

#[derive(OpenApi)]
#[openapi(
    paths(register),
    components(
        schemas(RegisterRequest),
        responses(BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Account registration")
    )
)]
pub struct ApiDoc;

pub fn router<R: UsersRepository + 'static>(use_case: RegisterUseCase<R>) -> Router {
    Router::new()
        .route("/", post(register::<R>))
        .with_state(Arc::new(use_case))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created, empty body"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UsersRepository>(
    State(use_case): State<Arc<RegisterUseCase<R>>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> UserResult<StatusCode> {
    use_case.execute(request.into()).await?;
    Ok(StatusCode::CREATED)
}
