use crate::core::scoring::{compatibility_score, mutually_eligible};
use crate::models::Candidate;
use std::collections::{BTreeMap, HashMap};

/// Ranked preference list for one candidate.
///
/// Contains only mutually gender-eligible partners, strictly descending by
/// compatibility score with ties broken by ascending candidate id. Never
/// contains the owner itself; may be empty.
#[derive(Debug, Clone)]
pub struct PreferenceList {
    pub owner_id: String,
    pub ranked: Vec<String>,
}

/// Preference lists for a candidate pool plus the pair-keyed score cache.
///
/// Scores are keyed by the canonical (sorted) unordered pair, so the value
/// looked up when converting engagements to output pairs is exactly the one
/// used to rank both directions.
#[derive(Debug, Default)]
pub struct PreferenceTable {
    pub lists: BTreeMap<String, PreferenceList>,
    scores: HashMap<(String, String), u8>,
}

impl PreferenceTable {
    /// Cached score for an unordered pair, if the pair was mutually eligible.
    pub fn score_of(&self, a_id: &str, b_id: &str) -> Option<u8> {
        let key = if a_id <= b_id {
            (a_id.to_string(), b_id.to_string())
        } else {
            (b_id.to_string(), a_id.to_string())
        };
        self.scores.get(&key).copied()
    }
}

/// Build descending preference lists for every candidate in the pool.
///
/// Candidates failing the mutual gender-eligibility test are excluded from
/// each other's lists entirely, not scored to zero. The score is computed
/// once per unordered pair and reused for both directions, which guarantees
/// symmetric rankings without branch-order drift. O(n^2) score evaluations.
pub fn build_preference_lists(pool: &[Candidate]) -> PreferenceTable {
    let mut entries: BTreeMap<String, Vec<(u8, &str)>> = pool
        .iter()
        .map(|c| (c.user_id.clone(), Vec::new()))
        .collect();
    let mut scores = HashMap::new();

    for i in 0..pool.len() {
        for j in (i + 1)..pool.len() {
            let (u, v) = (&pool[i], &pool[j]);
            if u.user_id == v.user_id {
                continue;
            }
            if !mutually_eligible(u, v) {
                continue;
            }

            let score = compatibility_score(u, v);
            let key = if u.user_id <= v.user_id {
                (u.user_id.clone(), v.user_id.clone())
            } else {
                (v.user_id.clone(), u.user_id.clone())
            };
            scores.insert(key, score);

            if let Some(list) = entries.get_mut(&u.user_id) {
                list.push((score, v.user_id.as_str()));
            }
            if let Some(list) = entries.get_mut(&v.user_id) {
                list.push((score, u.user_id.as_str()));
            }
        }
    }

    let lists = entries
        .into_iter()
        .map(|(owner_id, mut ranked)| {
            // Score descending, then id ascending for a reproducible order.
            ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
            let ranked: Vec<String> = ranked.into_iter().map(|(_, id)| id.to_string()).collect();
            let list = PreferenceList {
                owner_id: owner_id.clone(),
                ranked,
            };
            (owner_id, list)
        })
        .collect();

    PreferenceTable { lists, scores }
}
