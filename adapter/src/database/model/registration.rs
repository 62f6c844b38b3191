use chrono::{DateTime, Utc};
use kernel::model::{
    id::{RegistrationId, UserId},
    registration::{admission::TargetSnapshot, Registration, RegistrationStatus, TargetKind},
};
use shared::error::{AppError, AppResult};
use sqlx::FromRow;
use uuid::Uuid;

/// Target projection read inside the admission transaction.
#[derive(Debug, FromRow)]
pub struct TargetRow {
    pub title: String,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
}

impl From<TargetRow> for TargetSnapshot {
    fn from(value: TargetRow) -> Self {
        let TargetRow {
            title,
            registration_open,
            max_participants,
        } = value;
        TargetSnapshot {
            title,
            registration_open,
            max_participants,
        }
    }
}

/// Registration row joined with its target's title.
#[derive(Debug, FromRow)]
pub struct RegistrationRow {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub target_id: Uuid,
    pub target_kind: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub target_title: String,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = AppError;

    fn try_from(value: RegistrationRow) -> AppResult<Self> {
        let RegistrationRow {
            registration_id,
            user_id,
            target_id,
            target_kind,
            status,
            created_at,
            target_title,
        } = value;
        Ok(Registration {
            registration_id,
            registered_by: user_id,
            target_id,
            target_kind: parse_target_kind(&target_kind)?,
            target_title,
            status: parse_status(&status)?,
            created_at,
        })
    }
}

pub fn parse_target_kind(value: &str) -> AppResult<TargetKind> {
    value
        .parse::<TargetKind>()
        .map_err(|_| AppError::ConversionEntityError(format!("unknown target kind `{value}`")))
}

pub fn parse_status(value: &str) -> AppResult<RegistrationStatus> {
    value
        .parse::<RegistrationStatus>()
        .map_err(|_| AppError::ConversionEntityError(format!("unknown registration status `{value}`")))
}

/// State loaded before cancelling: who registered, and the current status.
#[derive(Debug, FromRow)]
pub struct RegistrationStateRow {
    pub user_id: UserId,
    pub status: String,
}
