use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::TournamentId,
    tournament::{
        event::{CreateTournament, DeleteTournament, UpdateTournament},
        Tournament,
    },
};

#[async_trait]
pub trait TournamentRepository: Send + Sync {
    async fn create(&self, event: CreateTournament) -> AppResult<TournamentId>;
    async fn find_all(&self) -> AppResult<Vec<Tournament>>;
    async fn find_by_id(&self, tournament_id: TournamentId) -> AppResult<Option<Tournament>>;
    async fn update(&self, event: UpdateTournament) -> AppResult<()>;
    async fn delete(&self, event: DeleteTournament) -> AppResult<()>;
}
