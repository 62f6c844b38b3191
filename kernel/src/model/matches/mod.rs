use chrono::{DateTime, Utc};

use crate::model::id::{MatchId, TournamentId, UserId};

pub mod event;

#[derive(Debug)]
pub struct Match {
    pub match_id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub match_date: DateTime<Utc>,
    pub tournament_id: Option<TournamentId>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub owner_id: Option<UserId>,
}
