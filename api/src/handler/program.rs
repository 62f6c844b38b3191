use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{id::ProgramId, program::event::DeleteProgram};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::program::{
        CreateProgramRequest, CreateProgramRequestWithUser, ProgramResponse, ProgramsResponse,
        UpdateProgramRequest, UpdateProgramRequestWithIds,
    },
};

pub async fn register_program(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateProgramRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate(&())?;

    let program = CreateProgramRequestWithUser::new(user.principal(), req);
    let program_id = registry.program_repository().create(program.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "programId": program_id })),
    ))
}

pub async fn show_program_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ProgramsResponse>> {
    registry
        .program_repository()
        .find_all()
        .await
        .map(ProgramsResponse::from)
        .map(Json)
}

pub async fn show_program(
    Path(program_id): Path<ProgramId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ProgramResponse>> {
    registry
        .program_repository()
        .find_by_id(program_id)
        .await
        .and_then(|program| match program {
            Some(program) => Ok(Json(program.into())),
            None => Err(AppError::EntityNotFound("program not found".into())),
        })
}

pub async fn update_program(
    user: AuthorizedUser,
    Path(program_id): Path<ProgramId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateProgramRequest>,
) -> AppResult<Json<ProgramResponse>> {
    req.validate(&())?;

    let update_program = UpdateProgramRequestWithIds::new(program_id, user.principal(), req);
    registry
        .program_repository()
        .update(update_program.into())
        .await?;

    registry
        .program_repository()
        .find_by_id(program_id)
        .await
        .and_then(|program| match program {
            Some(program) => Ok(Json(program.into())),
            None => Err(AppError::EntityNotFound("program not found".into())),
        })
}

pub async fn delete_program(
    user: AuthorizedUser,
    Path(program_id): Path<ProgramId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    let delete_program = DeleteProgram {
        program_id,
        requested_by: user.principal(),
    };
    registry
        .program_repository()
        .delete(delete_program)
        .await
        .map(|_| StatusCode::OK)
}
