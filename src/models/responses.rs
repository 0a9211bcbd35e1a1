use crate::models::domain::{EnrichedMatch, MatchPair};
use serde::{Deserialize, Serialize};

/// Response for the run matching endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMatchingResponse {
    #[serde(rename = "runId")]
    pub run_id: uuid::Uuid,
    #[serde(rename = "poolSize")]
    pub pool_size: usize,
    pub created: Vec<MatchPair>,
    #[serde(rename = "createdCount")]
    pub created_count: usize,
    #[serde(rename = "skippedExisting")]
    pub skipped_existing: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for the user matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMatchesResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub matches: Vec<EnrichedMatch>,
    pub count: usize,
}

/// Response for the compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "otherUserId")]
    pub other_user_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
