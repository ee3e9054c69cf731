use serde::Deserialize;

use crate::analysis::domain::people_counter::AnalysisError;

/// Success body of the analysis endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnalysisResponse {
    #[serde(rename = "peopleCount")]
    pub people_count: u32,
}

impl AnalysisResponse {
    pub fn decode(body: &[u8]) -> Result<Self, AnalysisError> {
        serde_json::from_slice(body).map_err(AnalysisError::MalformedResponse)
    }
}
