use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::ProgramId,
    program::{
        event::{CreateProgram, DeleteProgram, UpdateProgram},
        Program,
    },
};

#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn create(&self, event: CreateProgram) -> AppResult<ProgramId>;
    async fn find_all(&self) -> AppResult<Vec<Program>>;
    async fn find_by_id(&self, program_id: ProgramId) -> AppResult<Option<Program>>;
    async fn update(&self, event: UpdateProgram) -> AppResult<()>;
    async fn delete(&self, event: DeleteProgram) -> AppResult<()>;
    async fn close_registrations_all(&self) -> AppResult<u64>;
}
