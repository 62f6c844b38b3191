use chrono::{DateTime, Utc};

use crate::model::id::{TournamentId, UserId};

pub mod event;

#[derive(Debug)]
pub struct Tournament {
    pub tournament_id: TournamentId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Option<UserId>,
}
