use crate::core::engine::{matched_pairs, stable_match};
use crate::core::preferences::build_preference_lists;
use crate::models::{Candidate, MatchPair};

/// Result of one matching run
#[derive(Debug)]
pub struct MatchOutcome {
    pub pairs: Vec<MatchPair>,
    pub pool_size: usize,
}

/// Main matching orchestrator - runs the three-layer pipeline
///
/// # Pipeline stages
/// 1. Pool cap (deterministic truncation by id when configured)
/// 2. Preference list construction with pair-keyed score cache
/// 3. Deferred acceptance and conversion to output pairs
#[derive(Debug, Clone)]
pub struct Matcher {
    max_pool_size: Option<usize>,
}

impl Matcher {
    pub fn new(max_pool_size: Option<usize>) -> Self {
        Self { max_pool_size }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Compute a stable matching over the candidate pool.
    ///
    /// Pure and synchronous; every invocation builds fresh preference lists
    /// and engagement state, so repeated runs over an unchanged pool return
    /// the same pairs.
    pub fn run(&self, mut pool: Vec<Candidate>) -> MatchOutcome {
        if let Some(cap) = self.max_pool_size {
            if pool.len() > cap {
                tracing::warn!(
                    pool_size = pool.len(),
                    cap,
                    "candidate pool exceeds configured cap, truncating by id"
                );
                pool.sort_by(|a, b| a.user_id.cmp(&b.user_id));
                pool.truncate(cap);
            }
        }

        let table = build_preference_lists(&pool);
        let engagements = stable_match(&table.lists);
        let pairs = matched_pairs(&engagements, &table);

        tracing::debug!(
            pool_size = pool.len(),
            pairs = pairs.len(),
            "stable matching computed"
        );

        MatchOutcome {
            pairs,
            pool_size: pool.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::unbounded()
    }
}
