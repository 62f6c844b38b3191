use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::Principal,
    id::{ProgramId, UserId},
    patch::Patch,
    program::{
        event::{CreateProgram, UpdateProgram},
        Program,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub start_date: DateTime<Utc>,
    #[garde(skip)]
    pub end_date: DateTime<Utc>,
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
pub struct CreateProgramRequestWithUser(Principal, CreateProgramRequest);

impl From<CreateProgramRequestWithUser> for CreateProgram {
    fn from(value: CreateProgramRequestWithUser) -> Self {
        let CreateProgramRequestWithUser(
            principal,
            CreateProgramRequest {
                title,
                description,
                start_date,
                end_date,
                registration_open,
                max_participants,
            },
        ) = value;
        CreateProgram {
            title,
            description,
            start_date,
            end_date,
            registration_open,
            max_participants,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramRequest {
    #[garde(skip)]
    #[serde(default)]
    pub title: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub description: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub start_date: Patch<DateTime<Utc>>,
    #[garde(skip)]
    #[serde(default)]
    pub end_date: Patch<DateTime<Utc>>,
    #[garde(skip)]
    #[serde(default)]
    pub registration_open: Patch<bool>,
    #[garde(skip)]
    #[serde(default)]
    pub max_participants: Patch<i32>,
}

#[derive(new)]
pub struct UpdateProgramRequestWithIds(ProgramId, Principal, UpdateProgramRequest);

impl From<UpdateProgramRequestWithIds> for UpdateProgram {
    fn from(value: UpdateProgramRequestWithIds) -> Self {
        let UpdateProgramRequestWithIds(
            program_id,
            principal,
            UpdateProgramRequest {
                title,
                description,
                start_date,
                end_date,
                registration_open,
                max_participants,
            },
        ) = value;
        UpdateProgram {
            program_id,
            title,
            description,
            start_date,
            end_date,
            registration_open,
            max_participants,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramsResponse {
    pub items: Vec<ProgramResponse>,
}

impl From<Vec<Program>> for ProgramsResponse {
    fn from(value: Vec<Program>) -> Self {
        Self {
            items: value.into_iter().map(ProgramResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub program_id: ProgramId,
    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_open: bool,
    pub max_participants: Option<i32>,
    pub owner_id: Option<UserId>,
}

impl From<Program> for ProgramResponse {
    fn from(value: Program) -> Self {
        let Program {
            program_id,
            title,
            description,
            start_date,
            end_date,
            registration_open,
            max_participants,
            owner_id,
        } = value;
        Self {
            program_id,
            title,
            description,
            start_date,
            end_date,
            registration_open,
            max_participants,
            owner_id,
        }
    }
}
