use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{id::MatchId, matches::event::DeleteMatch};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::matches::{
        CreateMatchRequest, CreateMatchRequestWithUser, MatchResponse, MatchesResponse,
        UpdateMatchRequest, UpdateMatchRequestWithIds,
    },
};

pub async fn register_match(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let game = CreateMatchRequestWithUser::new(user.principal(), req);
    let match_id = registry.match_repository().create(game.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "matchId": match_id })),
    ))
}

pub async fn show_match_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MatchesResponse>> {
    registry
        .match_repository()
        .find_all()
        .await
        .map(MatchesResponse::from)
        .map(Json)
}

pub async fn show_match(
    Path(match_id): Path<MatchId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MatchResponse>> {
    registry
        .match_repository()
        .find_by_id(match_id)
        .await
        .and_then(|game| match game {
            Some(game) => Ok(Json(game.into())),
            None => Err(AppError::EntityNotFound("match not found".into())),
        })
}

pub async fn update_match(
    user: AuthorizedUser,
    Path(match_id): Path<MatchId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateMatchRequest>,
) -> AppResult<Json<MatchResponse>> {
    req.validate(&())?;

    let update_match = UpdateMatchRequestWithIds::new(match_id, user.principal(), req);
    registry.match_repository().update(update_match.into()).await?;

    registry
        .match_repository()
        .find_by_id(match_id)
        .await
        .and_then(|game| match game {
            Some(game) => Ok(Json(game.into())),
            None => Err(AppError::EntityNotFound("match not found".into())),
        })
}

pub async fn delete_match(
    user: AuthorizedUser,
    Path(match_id): Path<MatchId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_match = DeleteMatch {
        match_id,
        requested_by: user.principal(),
    };
    registry
        .match_repository()
        .delete(delete_match)
        .await
        .map(|_| StatusCode::OK)
}
