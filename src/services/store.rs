use crate::models::{Candidate, MatchPair, MatchRecord, PartnerProfile};
use crate::services::appwrite::AppwriteError;
use crate::services::postgres::PostgresError;
use thiserror::Error;

/// Unified error for the collaborator stores, as seen by the orchestration
/// layer and the HTTP handlers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Profile store error: {0}")]
    Profiles(#[from] AppwriteError),

    #[error("Match store error: {0}")]
    Matches(#[from] PostgresError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
            || matches!(self, StoreError::Profiles(AppwriteError::NotFound(_)))
    }
}

/// Read-only profile collaborator. The matching service never writes here.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    async fn list_dating_eligible(&self) -> Result<Vec<Candidate>, StoreError>;
    async fn get_candidate(&self, user_id: &str) -> Result<Option<Candidate>, StoreError>;
    async fn get_summary(&self, user_id: &str) -> Result<Option<PartnerProfile>, StoreError>;
}

/// Match-record collaborator. A sink for newly discovered pairs plus the
/// per-user read used by the match-list endpoint; runs never read records
/// back to build preference lists.
#[allow(async_fn_in_trait)]
pub trait MatchStore {
    async fn pair_exists(&self, a_id: &str, b_id: &str) -> Result<bool, StoreError>;
    async fn insert_pair(&self, pair: &MatchPair) -> Result<(), StoreError>;
    async fn matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError>;
}
