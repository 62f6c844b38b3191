use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::model::id::{EventId, ProgramId, RegistrationId, UserId};

pub mod admission;
pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TargetKind {
    Event,
    Program,
}

/// What a registration points at. Events and programs share the admission
/// flow; the kind keeps their id spaces apart in the registrations table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationTarget {
    Event(EventId),
    Program(ProgramId),
}

impl RegistrationTarget {
    pub fn kind(self) -> TargetKind {
        match self {
            RegistrationTarget::Event(_) => TargetKind::Event,
            RegistrationTarget::Program(_) => TargetKind::Program,
        }
    }

    pub fn raw_id(self) -> Uuid {
        match self {
            RegistrationTarget::Event(id) => id.raw(),
            RegistrationTarget::Program(id) => id.raw(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug)]
pub struct Registration {
    pub registration_id: RegistrationId,
    pub registered_by: UserId,
    pub target_id: Uuid,
    pub target_kind: TargetKind,
    pub target_title: String,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
}
