use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::Principal,
    id::{MatchId, TournamentId, UserId},
    matches::{
        event::{CreateMatch, UpdateMatch},
        Match,
    },
    patch::Patch,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    #[garde(length(min = 1))]
    pub home_team: String,
    #[garde(length(min = 1))]
    pub away_team: String,
    #[garde(skip)]
    pub match_date: DateTime<Utc>,
    #[garde(skip)]
    pub tournament_id: Option<TournamentId>,
}

#[derive(new)]
pub struct CreateMatchRequestWithUser(Principal, CreateMatchRequest);

impl From<CreateMatchRequestWithUser> for CreateMatch {
    fn from(value: CreateMatchRequestWithUser) -> Self {
        let CreateMatchRequestWithUser(
            principal,
            CreateMatchRequest {
                home_team,
                away_team,
                match_date,
                tournament_id,
            },
        ) = value;
        CreateMatch {
            home_team,
            away_team,
            match_date,
            tournament_id,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    #[garde(skip)]
    #[serde(default)]
    pub home_team: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub away_team: Patch<String>,
    #[garde(skip)]
    #[serde(default)]
    pub match_date: Patch<DateTime<Utc>>,
    #[garde(skip)]
    #[serde(default)]
    pub tournament_id: Patch<TournamentId>,
    #[garde(skip)]
    #[serde(default)]
    pub home_score: Patch<i32>,
    #[garde(skip)]
    #[serde(default)]
    pub away_score: Patch<i32>,
}

#[derive(new)]
pub struct UpdateMatchRequestWithIds(MatchId, Principal, UpdateMatchRequest);

impl From<UpdateMatchRequestWithIds> for UpdateMatch {
    fn from(value: UpdateMatchRequestWithIds) -> Self {
        let UpdateMatchRequestWithIds(
            match_id,
            principal,
            UpdateMatchRequest {
                home_team,
                away_team,
                match_date,
                tournament_id,
                home_score,
                away_score,
            },
        ) = value;
        UpdateMatch {
            match_id,
            home_team,
            away_team,
            match_date,
            tournament_id,
            home_score,
            away_score,
            requested_by: principal,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub items: Vec<MatchResponse>,
}

impl From<Vec<Match>> for MatchesResponse {
    fn from(value: Vec<Match>) -> Self {
        Self {
            items: value.into_iter().map(MatchResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub match_id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub match_date: DateTime<Utc>,
    pub tournament_id: Option<TournamentId>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub owner_id: Option<UserId>,
}

impl From<Match> for MatchResponse {
    fn from(value: Match) -> Self {
        let Match {
            match_id,
            home_team,
            away_team,
            match_date,
            tournament_id,
            home_score,
            away_score,
            owner_id,
        } = value;
        Self {
            match_id,
            home_team,
            away_team,
            match_date,
            tournament_id,
            home_score,
            away_score,
            owner_id,
        }
    }
}
