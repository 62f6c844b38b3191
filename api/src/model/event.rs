use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::Principal,
    event::{
        event::{CreateEvent, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
    patch::Patch,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub event_date: DateTime<Utc>,
    #[garde(skip)]
    pub location: Option<String>,
    #[garde(skip)]
    #[serde(default = "default_registration_open")]
    pub registration_open: bool,
    #[garde(range(min = 1))]
    pub max_participants: Option<i32>,
}

fn default_registration_open() -> bool {
    true
}

#[derive(new)]
pub struct CreateEventRequestWithUser(Principal, CreateEventRequest);

impl From<CreateEventRequestWithUser> for CreateEvent {
    fn from(value: CreateEventRequestWithUser) -> Self {
        let CreateEventRequestWithUser(
            principal,
            CreateEventRequest {
                title,
                description,
                event_date,
                location,
                registration_open,
                max_participants,
            },
        ) = value;
        CreateEvent {
            title,
            description,
            event_date,
            location,
            registration_open,
            max_participants,
            requested_by: principal,
        }
    }
}

// Only keys present in the request body are applied; an explicit null
// clears a nullable column.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(skip)]
    #[serde(default)]
    pub title: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub description: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub event_date: Patch<DateTime<Utc>>,
    #[garde(skip)]
    #[serde(default)]
    pub location: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub registration_open: Patch<bool>,
    #[garde(skip)]
    #[serde(default)]
    pub max_participants: Patch<i32>,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, Principal, UpdateEventRequest);

impl From<UpdateEventRequestWithIds> for UpdateEvent {
    fn from(value: UpdateEventRequestWithIds) -> Self {
        let UpdateEventRequestWithIds(
            event_id,
            principal,
            UpdateEventRequest {
                title,
                description,
                event_date,
                location,
                registration_open,
                max_participants,
            },
        ) = value;
        UpdateEvent {
            event_id,
            title,
            description,
            event_date,
            location,
            registration_open,
            max_participants,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub owner_id: Option<UserId>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            title,
            description,
            event_date,
            location,
            registration_open,
            max_participants,
            owner_id,
        } = value;
        Self {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_keeps_absent_and_null_apart() {
        let req: UpdateEventRequest =
            serde_json::from_str(r#"{"title": "finals", "maxParticipants": null}"#).unwrap();

        assert_eq!(req.title, Patch::Value("finals".into()));
        assert_eq!(req.max_participants, Patch::Null);
        assert_eq!(req.description, Patch::Missing);
        assert_eq!(req.registration_open, Patch::Missing);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let req: UpdateEventRequest =
            serde_json::from_str(r#"{"somethingElse": 1, "title": "finals"}"#).unwrap();

        assert_eq!(req.title, Patch::Value("finals".into()));
    }

    #[test]
    fn create_request_rejects_empty_title() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"title": "", "eventDate": "2026-09-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn registration_defaults_to_open() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"title": "tryouts", "eventDate": "2026-09-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert!(req.registration_open);
    }
}
