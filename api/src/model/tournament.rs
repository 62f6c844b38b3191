use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::Principal,
    id::{TournamentId, UserId},
    patch::Patch,
    tournament::{
        event::{CreateTournament, UpdateTournament},
        Tournament,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTournamentRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub start_date: DateTime<Utc>,
    #[garde(skip)]
    pub location: Option<String>,
}

#[derive(new)]
pub struct CreateTournamentRequestWithUser(Principal, CreateTournamentRequest);

impl From<CreateTournamentRequestWithUser> for CreateTournament {
    fn from(value: CreateTournamentRequestWithUser) -> Self {
        let CreateTournamentRequestWithUser(
            principal,
            CreateTournamentRequest {
                name,
                start_date,
                location,
            },
        ) = value;
        CreateTournament {
            name,
            start_date,
            location,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTournamentRequest {
    #[garde(skip)]
    #[serde(default)]
    pub name: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub start_date: Patch<DateTime<Utc>>,
    #[garde(skip)]
    #[serde(default)]
    pub location: Patch<String>,
}

#[derive(new)]
pub struct UpdateTournamentRequestWithIds(TournamentId, Principal, UpdateTournamentRequest);

impl From<UpdateTournamentRequestWithIds> for UpdateTournament {
    fn from(value: UpdateTournamentRequestWithIds) -> Self {
        let UpdateTournamentRequestWithIds(
            tournament_id,
            principal,
            UpdateTournamentRequest {
                name,
                start_date,
                location,
            },
        ) = value;
        UpdateTournament {
            tournament_id,
            name,
            start_date,
            location,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentsResponse {
    pub items: Vec<TournamentResponse>,
}

impl From<Vec<Tournament>> for TournamentsResponse {
    fn from(value: Vec<Tournament>) -> Self {
        Self {
            items: value.into_iter().map(TournamentResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentResponse {
    pub tournament_id: TournamentId,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Option<UserId>,
}

impl From<Tournament> for TournamentResponse {
    fn from(value: Tournament) -> Self {
        let Tournament {
            tournament_id,
            name,
            start_date,
            location,
            owner_id,
        } = value;
        Self {
            tournament_id,
            name,
            start_date,
            location,
            owner_id,
        }
    }
}
