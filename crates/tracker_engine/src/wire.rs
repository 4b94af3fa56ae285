//! JSON shapes returned by the platform API. Unknown fields are ignored.

use serde::Deserialize;

pub(crate) const STATUS_OK: &str = "OK";

/// Top-level wrapper of every API response. `result` is only meaningful
/// when `status` is `OK`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProblem {
    #[serde(default)]
    pub contest_id: Option<u64>,
    pub index: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProblemsetResult {
    pub problems: Vec<WireProblem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSubmission {
    #[serde(default)]
    pub contest_id: Option<u64>,
    pub problem: WireProblem,
    #[serde(default)]
    pub verdict: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandingsResult {
    pub problems: Vec<WireProblem>,
}
