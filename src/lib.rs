//! Campus Match - stable-matching service for the campus dating feature
//!
//! This library implements the pairing engine behind the dating feature:
//! a pairwise compatibility scorer, per-candidate preference lists and a
//! deferred-acceptance (Gale-Shapley) matching with the stable-marriage
//! guarantee, plus the thin orchestration over the profile and match stores.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_preference_lists, compatibility_score, stable_match, Matcher};
pub use crate::models::{Candidate, EnrichedMatch, MatchPair, MatchRecord, PartnerProfile};
