use chrono::{DateTime, Utc};

use crate::model::{auth::Principal, id::ProgramId, patch::Patch};

pub struct CreateProgram {
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct UpdateProgram {
    pub program_id: ProgramId,
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub start_date: Patch<DateTime<Utc>>,
    pub end_date: Patch<DateTime<Utc>>,
    pub registration_open: Patch<bool>,
    pub max_participants: Patch<i32>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct DeleteProgram {
    pub program_id: ProgramId,
    pub requested_by: Principal,
}
