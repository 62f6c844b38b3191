use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use garde::Validate;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::{
    auth::{LoginRequest, LoginResponse},
    user::{CreateUserRequest, UserResponse},
};

/// Public signup. New accounts always get the plain user role.
pub async fn register(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let user = registry.user_repository().create(req.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    req.validate(&())?;

    let user = registry
        .user_repository()
        .verify_credentials(&req.email, &req.password)
        .await?;
    let access_token = registry.token_provider().issue(user.user_id, user.role)?;

    Ok(Json(LoginResponse {
        user_id: user.user_id,
        access_token,
    }))
}
