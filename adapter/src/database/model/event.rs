use chrono::{DateTime, Utc};
use kernel::model::{
    event::Event,
    id::{EventId, UserId},
};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub owner_id: Option<UserId>,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            description,
            event_date,
            location,
            registration_open,
            max_participants,
            owner_id,
        } = value;
        Event {
            event_id,
            title,
            description,
            event_date,
            location,
            registration_open,
            max_participants,
            owner_id,
        }
    }
}
