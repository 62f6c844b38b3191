use chrono::{DateTime, Utc};

use crate::model::{auth::Principal, id::TournamentId, patch::Patch};

pub struct CreateTournament {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct UpdateTournament {
    pub tournament_id: TournamentId,
    pub name: Patch<String>,
    pub start_date: Patch<DateTime<Utc>>,
    pub location: Patch<String>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct DeleteTournament {
    pub tournament_id: TournamentId,
    pub requested_by: Principal,
}
