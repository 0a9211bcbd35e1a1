use crate::core::{compatibility_score, Matcher};
use crate::models::{EnrichedMatch, MatchPair};
use crate::services::store::{MatchStore, ProfileStore, StoreError};
use serde::{Deserialize, Serialize};

/// Summary of one RunMatching invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: uuid::Uuid,
    pub pool_size: usize,
    pub created: Vec<MatchPair>,
    pub skipped_existing: usize,
    pub message: Option<String>,
}

/// Load the dating-eligible pool, compute a stable matching and persist
/// newly discovered pairs.
///
/// Pairs already recorded for either direction of the unordered id pair are
/// skipped, which makes re-running against an unchanged pool idempotent.
/// Each pair is persisted atomically (both directional rows or neither); a
/// store failure aborts the run and the dedup check absorbs anything that
/// was persisted before the failure on the next attempt.
pub async fn run_matching<P, M>(
    profiles: &P,
    matches: &M,
    matcher: &Matcher,
) -> Result<RunReport, StoreError>
where
    P: ProfileStore,
    M: MatchStore,
{
    let run_id = uuid::Uuid::new_v4();
    let pool = profiles.list_dating_eligible().await?;

    if pool.len() < 2 {
        // "Nothing to match" is an expected steady state, not a failure.
        tracing::info!(%run_id, pool_size = pool.len(), "insufficient candidate pool, nothing to match");
        return Ok(RunReport {
            run_id,
            pool_size: pool.len(),
            created: Vec::new(),
            skipped_existing: 0,
            message: Some("fewer than two eligible candidates, nothing to match".to_string()),
        });
    }

    let outcome = matcher.run(pool);

    let mut created = Vec::new();
    let mut skipped_existing = 0;
    for pair in outcome.pairs {
        if matches.pair_exists(&pair.a_id, &pair.b_id).await? {
            tracing::debug!(%run_id, a = %pair.a_id, b = %pair.b_id, "pair already recorded, skipping");
            skipped_existing += 1;
            continue;
        }
        matches.insert_pair(&pair).await?;
        created.push(pair);
    }

    tracing::info!(
        %run_id,
        pool_size = outcome.pool_size,
        created = created.len(),
        skipped_existing,
        "matching run complete"
    );

    Ok(RunReport {
        run_id,
        pool_size: outcome.pool_size,
        created,
        skipped_existing,
        message: None,
    })
}

/// Read a user's persisted matches and enrich each with the partner's
/// public profile summary. An empty list is a valid result.
pub async fn get_user_matches<P, M>(
    profiles: &P,
    matches: &M,
    user_id: &str,
) -> Result<Vec<EnrichedMatch>, StoreError>
where
    P: ProfileStore,
    M: MatchStore,
{
    let records = matches.matches_for(user_id).await?;

    let mut enriched = Vec::with_capacity(records.len());
    for record in records {
        match profiles.get_summary(&record.partner_id).await? {
            Some(partner) => enriched.push(EnrichedMatch {
                partner,
                compatibility_score: record.compatibility_score,
                matched_at: record.matched_at,
            }),
            None => {
                tracing::warn!(
                    user = %user_id,
                    partner = %record.partner_id,
                    "match record references a missing profile, dropping from response"
                );
            }
        }
    }

    Ok(enriched)
}

/// Score exactly two candidates. Fails with NotFound if either id does not
/// resolve to a profile.
pub async fn get_compatibility<P>(
    profiles: &P,
    user_id: &str,
    other_user_id: &str,
) -> Result<u8, StoreError>
where
    P: ProfileStore,
{
    let a = profiles
        .get_candidate(user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("profile {}", user_id)))?;
    let b = profiles
        .get_candidate(other_user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("profile {}", other_user_id)))?;

    Ok(compatibility_score(&a, &b))
}
