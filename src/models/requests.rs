use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the user matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserMatchesQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Query parameters for the compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompatibilityQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "other_user_id", rename = "otherUserId")]
    pub other_user_id: String,
}
