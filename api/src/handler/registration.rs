use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{
    id::{EventId, ProgramId, RegistrationId},
    registration::{
        event::{CancelRegistration, CreateRegistration},
        RegistrationTarget,
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::registration::{
        CreateRegistrationRequest, RegistrationResponse, RegistrationsResponse,
    },
};

pub async fn create_registration(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;
    let target = req.target()?;

    let registration = registry
        .registration_repository()
        .create(CreateRegistration::new(user.id(), target))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    ))
}

pub async fn show_my_registrations(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationsResponse>> {
    registry
        .registration_repository()
        .find_active_by_user_id(user.id())
        .await
        .map(RegistrationsResponse::from)
        .map(Json)
}

pub async fn cancel_registration(
    user: AuthorizedUser,
    Path(registration_id): Path<RegistrationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .registration_repository()
        .cancel(CancelRegistration::new(registration_id, user.principal()))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn show_event_registrations(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationsResponse>> {
    registry
        .registration_repository()
        .find_by_target(RegistrationTarget::Event(event_id), user.principal())
        .await
        .map(RegistrationsResponse::from)
        .map(Json)
}

pub async fn show_program_registrations(
    user: AuthorizedUser,
    Path(program_id): Path<ProgramId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RegistrationsResponse>> {
    registry
        .registration_repository()
        .find_by_target(RegistrationTarget::Program(program_id), user.principal())
        .await
        .map(RegistrationsResponse::from)
        .map(Json)
}
