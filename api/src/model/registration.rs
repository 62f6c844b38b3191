use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{EventId, ProgramId, RegistrationId, UserId},
    registration::{Registration, RegistrationStatus, RegistrationTarget, TargetKind},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

/// Exactly one of `eventId` / `programId` selects the target.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    #[garde(skip)]
    pub event_id: Option<EventId>,
    #[garde(skip)]
    pub program_id: Option<ProgramId>,
}

impl CreateRegistrationRequest {
    pub fn target(&self) -> AppResult<RegistrationTarget> {
        match (self.event_id, self.program_id) {
            (Some(event_id), None) => Ok(RegistrationTarget::Event(event_id)),
            (None, Some(program_id)) => Ok(RegistrationTarget::Program(program_id)),
            _ => Err(AppError::UnprocessableEntity(
                "exactly one of eventId or programId must be supplied".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatusName {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<RegistrationStatus> for RegistrationStatusName {
    fn from(value: RegistrationStatus) -> Self {
        match value {
            RegistrationStatus::Pending => Self::Pending,
            RegistrationStatus::Confirmed => Self::Confirmed,
            RegistrationStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationsResponse {
    pub items: Vec<RegistrationResponse>,
}

impl From<Vec<Registration>> for RegistrationsResponse {
    fn from(value: Vec<Registration>) -> Self {
        Self {
            items: value.into_iter().map(RegistrationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<Uuid>,
    pub target_title: String,
    pub status: RegistrationStatusName,
    pub created_at: DateTime<Utc>,
}

impl From<Registration> for RegistrationResponse {
    fn from(value: Registration) -> Self {
        let Registration {
            registration_id,
            registered_by,
            target_id,
            target_kind,
            target_title,
            status,
            created_at,
        } = value;
        let (event_id, program_id) = match target_kind {
            TargetKind::Event => (Some(target_id), None),
            TargetKind::Program => (None, Some(target_id)),
        };
        Self {
            id: registration_id,
            user_id: registered_by,
            event_id,
            program_id,
            target_title,
            status: status.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_target_must_be_chosen() {
        let neither: CreateRegistrationRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            neither.target(),
            Err(AppError::UnprocessableEntity(_))
        ));

        let both: CreateRegistrationRequest = serde_json::from_str(&format!(
            r#"{{"eventId": "{}", "programId": "{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(matches!(
            both.target(),
            Err(AppError::UnprocessableEntity(_))
        ));
    }

    #[test]
    fn event_target_is_resolved() {
        let req: CreateRegistrationRequest =
            serde_json::from_str(&format!(r#"{{"eventId": "{}"}}"#, Uuid::new_v4())).unwrap();

        assert_eq!(req.target().unwrap().kind(), TargetKind::Event);
    }

    #[test]
    fn response_serializes_pending_status_and_event_key() {
        let registration = Registration {
            registration_id: RegistrationId::new(),
            registered_by: UserId::new(),
            target_id: Uuid::new_v4(),
            target_kind: TargetKind::Event,
            target_title: "spring open".into(),
            status: RegistrationStatus::Pending,
            created_at: Utc::now(),
        };

        let body = serde_json::to_value(RegistrationResponse::from(registration)).unwrap();
        assert_eq!(body["status"], "pending");
        assert!(body.get("eventId").is_some());
        assert!(body.get("programId").is_none());
    }
}
