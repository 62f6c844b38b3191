use chrono::{DateTime, Utc};

use crate::model::id::{ProgramId, UserId};

pub mod event;

#[derive(Debug)]
pub struct Program {
    pub program_id: ProgramId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub owner_id: Option<UserId>,
}
