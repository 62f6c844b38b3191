use chrono::{DateTime, Utc};
use kernel::model::{
    id::{MatchId, TournamentId, UserId},
    matches::Match,
};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct MatchRow {
    pub match_id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub match_date: DateTime<Utc>,
    pub tournament_id: Option<TournamentId>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub owner_id: Option<UserId>,
}

impl From<MatchRow> for Match {
    fn from(value: MatchRow) -> Self {
        let MatchRow {
            match_id,
            home_team,
            away_team,
            match_date,
            tournament_id,
            home_score,
            away_score,
            owner_id,
        } = value;
        Match {
            match_id,
            home_team,
            away_team,
            match_date,
            tournament_id,
            home_score,
            away_score,
            owner_id,
        }
    }
}
