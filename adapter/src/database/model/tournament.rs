use chrono::{DateTime, Utc};
use kernel::model::{
    id::{TournamentId, UserId},
    tournament::Tournament,
};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct TournamentRow {
    pub tournament_id: TournamentId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Option<UserId>,
}

impl From<TournamentRow> for Tournament {
    fn from(value: TournamentRow) -> Self {
        let TournamentRow {
            tournament_id,
            name,
            start_date,
            location,
            owner_id,
        } = value;
        Tournament {
            tournament_id,
            name,
            start_date,
            location,
            owner_id,
        }
    }
}
