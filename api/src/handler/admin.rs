use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{extractor::AdminUser, model::admin::CloseRegistrationsResponse};

/// Closes registration on every event and program in one sweep.
pub async fn close_all_registrations(
    _admin: AdminUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<CloseRegistrationsResponse>> {
    let closed_events = registry
        .event_repository()
        .close_registrations_all()
        .await?;
    let closed_programs = registry
        .program_repository()
        .close_registrations_all()
        .await?;

    Ok(Json(CloseRegistrationsResponse {
        closed_events,
        closed_programs,
    }))
}
