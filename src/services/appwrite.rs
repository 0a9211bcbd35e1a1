use crate::models::{Candidate, PartnerProfile};
use crate::services::store::{ProfileStore, StoreError};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client for the profile store
///
/// The matching service only ever reads profiles:
/// - Listing the dating-eligible candidate pool
/// - Fetching single candidates for compatibility checks
/// - Fetching public summaries to enrich a user's match list
pub struct ProfileClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: ProfileCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct ProfileCollections {
    pub user_profiles: String,
}

impl ProfileClient {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: ProfileCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    /// Fetch every profile that opted into dating.
    pub async fn fetch_dating_pool(&self) -> Result<Vec<Candidate>, AppwriteError> {
        let queries = vec!["equal(\"datingOptIn\", true)".to_string()];
        let documents = self.list_documents(&queries).await?;

        let candidates: Vec<Candidate> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!(
            "Queried {} dating-eligible candidates ({} documents)",
            candidates.len(),
            documents.len()
        );

        Ok(candidates)
    }

    /// Fetch a single candidate by user ID.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Candidate, AppwriteError> {
        let doc = self.find_document(user_id).await?;
        let data = doc.get("data").unwrap_or(&doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the public summary (name, avatar, department, interests, bio)
    /// for a user.
    pub async fn fetch_profile_summary(
        &self,
        user_id: &str,
    ) -> Result<PartnerProfile, AppwriteError> {
        let doc = self.find_document(user_id).await?;
        let data = doc.get("data").unwrap_or(&doc);

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse summary: {}", e)))
    }

    async fn find_document(&self, user_id: &str) -> Result<Value, AppwriteError> {
        let query_json = format!(r#"["userId={}"]"#, user_id);
        let encoded_query = urlencoding::encode(&query_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.user_profiles,
            encoded_query
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        documents
            .first()
            .cloned()
            .ok_or_else(|| AppwriteError::NotFound(format!("Profile not found for user {}", user_id)))
    }

    async fn list_documents(&self, queries: &[String]) -> Result<Vec<Value>, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.user_profiles
        );

        let queries_json = serde_json::to_string(queries)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);
        let full_url = format!("{}?query={}", url, encoded_queries);

        let response = self
            .client
            .get(&full_url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to list documents: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("documents")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))
    }
}

impl ProfileStore for ProfileClient {
    async fn list_dating_eligible(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.fetch_dating_pool().await?)
    }

    async fn get_candidate(&self, user_id: &str) -> Result<Option<Candidate>, StoreError> {
        match self.fetch_profile(user_id).await {
            Ok(candidate) => Ok(Some(candidate)),
            Err(AppwriteError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_summary(&self, user_id: &str) -> Result<Option<PartnerProfile>, StoreError> {
        match self.fetch_profile_summary(user_id).await {
            Ok(summary) => Ok(Some(summary)),
            Err(AppwriteError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
