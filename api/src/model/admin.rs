use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRegistrationsResponse {
    pub closed_events: u64,
    pub closed_programs: u64,
}
