use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{id::TournamentId, tournament::event::DeleteTournament};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::tournament::{
        CreateTournamentRequest, CreateTournamentRequestWithUser, TournamentResponse,
        TournamentsResponse, UpdateTournamentRequest, UpdateTournamentRequestWithIds,
    },
};

pub async fn register_tournament(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateTournamentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let tournament = CreateTournamentRequestWithUser::new(user.principal(), req);
    let tournament_id = registry
        .tournament_repository()
        .create(tournament.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "tournamentId": tournament_id })),
    ))
}

pub async fn show_tournament_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TournamentsResponse>> {
    registry
        .tournament_repository()
        .find_all()
        .await
        .map(TournamentsResponse::from)
        .map(Json)
}

pub async fn show_tournament(
    Path(tournament_id): Path<TournamentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<TournamentResponse>> {
    registry
        .tournament_repository()
        .find_by_id(tournament_id)
        .await
        .and_then(|tournament| match tournament {
            Some(tournament) => Ok(Json(tournament.into())),
            None => Err(AppError::EntityNotFound("tournament not found".into())),
        })
}

pub async fn update_tournament(
    user: AuthorizedUser,
    Path(tournament_id): Path<TournamentId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateTournamentRequest>,
) -> AppResult<Json<TournamentResponse>> {
    req.validate(&())?;

    let update_tournament =
        UpdateTournamentRequestWithIds::new(tournament_id, user.principal(), req);
    registry
        .tournament_repository()
        .update(update_tournament.into())
        .await?;

    registry
        .tournament_repository()
        .find_by_id(tournament_id)
        .await
        .and_then(|tournament| match tournament {
            Some(tournament) => Ok(Json(tournament.into())),
            None => Err(AppError::EntityNotFound("tournament not found".into())),
        })
}

pub async fn delete_tournament(
    user: AuthorizedUser,
    Path(tournament_id): Path<TournamentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_tournament = DeleteTournament {
        tournament_id,
        requested_by: user.principal(),
    };
    registry
        .tournament_repository()
        .delete(delete_tournament)
        .await
        .map(|_| StatusCode::OK)
}
