use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::MatchId,
    matches::{
        event::{CreateMatch, DeleteMatch, UpdateMatch},
        Match,
    },
};

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create(&self, event: CreateMatch) -> AppResult<MatchId>;
    async fn find_all(&self) -> AppResult<Vec<Match>>;
    async fn find_by_id(&self, match_id: MatchId) -> AppResult<Option<Match>>;
    async fn update(&self, event: UpdateMatch) -> AppResult<()>;
    async fn delete(&self, event: DeleteMatch) -> AppResult<()>;
}
