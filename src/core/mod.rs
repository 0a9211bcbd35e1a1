// Core algorithm exports
pub mod engine;
pub mod matcher;
pub mod preferences;
pub mod scoring;

pub use engine::{matched_pairs, stable_match};
pub use matcher::{MatchOutcome, Matcher};
pub use preferences::{build_preference_lists, PreferenceList, PreferenceTable};
pub use scoring::{compatibility_score, gender_satisfies, mutually_eligible};
