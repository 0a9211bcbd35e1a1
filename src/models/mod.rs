// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{pair_key, Candidate, EnrichedMatch, MatchPair, MatchRecord, PartnerProfile};
pub use requests::{CompatibilityQuery, UserMatchesQuery};
pub use responses::{
    CompatibilityResponse, ErrorResponse, HealthResponse, RunMatchingResponse,
    UserMatchesResponse,
};
