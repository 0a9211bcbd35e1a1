// Service exports
pub mod appwrite;
pub mod postgres;
pub mod runner;
pub mod store;

pub use appwrite::{AppwriteError, ProfileClient, ProfileCollections};
pub use postgres::{PostgresClient, PostgresError};
pub use runner::{get_compatibility, get_user_matches, run_matching, RunReport};
pub use store::{MatchStore, ProfileStore, StoreError};
