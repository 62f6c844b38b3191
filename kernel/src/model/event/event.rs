use chrono::{DateTime, Utc};

use crate::model::{auth::Principal, id::EventId, patch::Patch};

pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub event_date: Patch<DateTime<Utc>>,
    pub location: Patch<String>,
    pub registration_open: Patch<bool>,
    pub max_participants: Patch<i32>,
    pub requested_by: Principal,
}

#[derive(Debug)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_by: Principal,
}
