use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{event::event::DeleteEvent, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::event::{
        CreateEventRequest, CreateEventRequestWithUser, EventResponse, EventsResponse,
        UpdateEventRequest, UpdateEventRequestWithIds,
    },
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let event = CreateEventRequestWithUser::new(user.principal(), req);
    let event_id = registry.event_repository().create(event.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "eventId": event_id })),
    ))
}

pub async fn show_event_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventsResponse>> {
    registry
        .event_repository()
        .find_all()
        .await
        .map(EventsResponse::from)
        .map(Json)
}

pub async fn show_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound("event not found".into())),
        })
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    req.validate(&())?;

    let update_event = UpdateEventRequestWithIds::new(event_id, user.principal(), req);
    registry.event_repository().update(update_event.into()).await?;

    // Hand back the refreshed entity.
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound("event not found".into())),
        })
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_event = DeleteEvent {
        event_id,
        requested_by: user.principal(),
    };
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| StatusCode::OK)
}
