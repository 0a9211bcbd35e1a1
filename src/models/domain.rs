use serde::{Deserialize, Serialize};

/// Dating-eligible candidate considered for one matching run.
///
/// Everything except the id is optional; a missing attribute simply
/// contributes zero to the compatibility score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "genderIdentity", default)]
    pub gender_identity: Option<String>,
    #[serde(rename = "seekingGender", default)]
    pub seeking_gender: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(rename = "yearOfStudy", default)]
    pub year_of_study: Option<u8>,
}

/// One stable-matching output edge. The pair is unordered; the score is
/// symmetric and computed once per pair, not per direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    #[serde(rename = "aId")]
    pub a_id: String,
    #[serde(rename = "bId")]
    pub b_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
}

/// Canonical key for an unordered id pair, used for dedup lookups.
pub fn pair_key(a_id: &str, b_id: &str) -> String {
    if a_id <= b_id {
        format!("{}:{}", a_id, b_id)
    } else {
        format!("{}:{}", b_id, a_id)
    }
}

/// Persisted directional match record (`user_id` liked-by `partner_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "partnerId")]
    pub partner_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Public profile summary used to enrich a user's match list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "avatarFileId", default)]
    pub avatar_file_id: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Match record enriched with the partner's public profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedMatch {
    pub partner: PartnerProfile,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}
