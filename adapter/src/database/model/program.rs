use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ProgramId, UserId},
    program::Program,
};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct ProgramRow {
    pub program_id: ProgramId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub owner_id: Option<UserId>,
}

impl From<ProgramRow> for Program {
    fn from(value: ProgramRow) -> Self {
        let ProgramRow {
            program_id,
            title,
            description,
            start_date,
            end_date,
            registration_open,
            max_participants,
            owner_id,
        } = value;
        Program {
            program_id,
            title,
            description,
            start_date,
            end_date,
            registration_open,
            max_participants,
            owner_id,
        }
    }
}
