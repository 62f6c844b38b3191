use chrono::{DateTime, Utc};

use crate::model::id::{EventId, UserId};

pub mod event;

#[derive(Debug)]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub owner_id: Option<UserId>,
}
