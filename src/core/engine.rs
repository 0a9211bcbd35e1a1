use crate::core::preferences::{PreferenceList, PreferenceTable};
use crate::models::MatchPair;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Run deferred acceptance (Gale-Shapley) over the preference lists.
///
/// Every candidate plays proposer and responder simultaneously; there is no
/// fixed partition into sides. Returns a symmetric engagement map: an entry
/// `m[a] = b` always has its mirror `m[b] = a`, and a candidate absent from
/// the map ended the run unmatched. The final matching is stable because
/// preference lists are strict total orders by construction; the order in
/// which free candidates are processed cannot change it.
pub fn stable_match(prefs: &BTreeMap<String, PreferenceList>) -> BTreeMap<String, String> {
    let mut session = MatchSession::new(prefs);
    session.run();
    session.into_engagements()
}

/// Convert a symmetric engagement map into output pairs, reusing the
/// pair-keyed scores cached during preference-list construction.
pub fn matched_pairs(
    engagements: &BTreeMap<String, String>,
    table: &PreferenceTable,
) -> Vec<MatchPair> {
    engagements
        .iter()
        .filter(|(a, b)| a.as_str() < b.as_str())
        .map(|(a, b)| MatchPair {
            a_id: a.clone(),
            b_id: b.clone(),
            compatibility_score: table.score_of(a, b).unwrap_or(0),
        })
        .collect()
}

/// Mutable state for one deferred-acceptance run. Owned by the run and
/// discarded afterwards, so concurrent runs are fully isolated.
struct MatchSession<'a> {
    prefs: &'a BTreeMap<String, PreferenceList>,
    // owner -> candidate -> index in the owner's ranked list
    ranks: HashMap<&'a str, HashMap<&'a str, usize>>,
    // next index each candidate has not yet proposed to
    cursors: HashMap<&'a str, usize>,
    engaged: HashMap<&'a str, &'a str>,
    free: VecDeque<&'a str>,
}

impl<'a> MatchSession<'a> {
    fn new(prefs: &'a BTreeMap<String, PreferenceList>) -> Self {
        let ranks = prefs
            .iter()
            .map(|(owner, list)| {
                let by_candidate = list
                    .ranked
                    .iter()
                    .enumerate()
                    .map(|(idx, id)| (id.as_str(), idx))
                    .collect();
                (owner.as_str(), by_candidate)
            })
            .collect();

        Self {
            prefs,
            ranks,
            cursors: prefs.keys().map(|k| (k.as_str(), 0)).collect(),
            engaged: HashMap::new(),
            free: prefs.keys().map(String::as_str).collect(),
        }
    }

    fn run(&mut self) {
        while let Some(proposer) = self.free.pop_front() {
            // A candidate displaced and later re-engaged may still sit in
            // the queue; only genuinely free candidates propose.
            if self.engaged.contains_key(proposer) {
                continue;
            }
            self.propose_from(proposer);
        }
    }

    /// Advance `proposer` through its list until it lands an engagement or
    /// exhausts the list. The cursor advances on every proposal regardless
    /// of outcome; a displaced partner resumes from wherever its own cursor
    /// was, never from the start.
    fn propose_from(&mut self, proposer: &'a str) {
        let prefs = self.prefs;
        let Some(list) = prefs.get(proposer) else {
            return;
        };

        loop {
            let cursor = self.cursors.entry(proposer).or_insert(0);
            let Some(responder) = list.ranked.get(*cursor) else {
                return; // list exhausted, stays free
            };
            *cursor += 1;
            let responder = responder.as_str();

            // Asymmetric eligibility upstream can leave the proposer off the
            // responder's list; treat as a rejection.
            let Some(proposer_rank) = self.rank_of(responder, proposer) else {
                continue;
            };

            match self.engaged.get(responder).copied() {
                None => {
                    self.engage(proposer, responder);
                    return;
                }
                Some(current) => {
                    let current_rank = self
                        .rank_of(responder, current)
                        .unwrap_or(usize::MAX);
                    if proposer_rank < current_rank {
                        self.engaged.remove(current);
                        self.engage(proposer, responder);
                        self.free.push_back(current);
                        return;
                    }
                }
            }
        }
    }

    fn rank_of(&self, owner: &str, candidate: &str) -> Option<usize> {
        self.ranks.get(owner).and_then(|m| m.get(candidate)).copied()
    }

    fn engage(&mut self, a: &'a str, b: &'a str) {
        self.engaged.insert(a, b);
        self.engaged.insert(b, a);
    }

    fn into_engagements(self) -> BTreeMap<String, String> {
        self.engaged
            .into_iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }
}
