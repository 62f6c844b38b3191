use chrono::{DateTime, Utc};

use crate::model::{
    auth::Principal,
    id::{MatchId, TournamentId},
    patch::Patch,
};

pub struct CreateMatch {
    pub home_team: String,
    pub away_team: String,
    pub match_date: DateTime<Utc>,
    pub tournament_id: Option<TournamentId>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct UpdateMatch {
    pub match_id: MatchId,
    pub home_team: Patch<String>,
    pub away_team: Patch<String>,
    pub match_date: Patch<DateTime<Utc>>,
    pub tournament_id: Patch<TournamentId>,
    pub home_score: Patch<i32>,
    pub away_score: Patch<i32>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct DeleteMatch {
    pub match_id: MatchId,
    pub requested_by: Principal,
}
