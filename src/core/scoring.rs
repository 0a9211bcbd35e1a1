use crate::models::Candidate;
use std::collections::BTreeSet;

/// Points per distinct shared interest tag.
pub const SHARED_INTEREST_POINTS: u32 = 10;
/// Cap on the shared-interest term (5+ shared tags max it out).
pub const SHARED_INTEREST_CAP: u32 = 50;
/// Bonus when both candidates belong to the same department.
pub const SAME_DEPARTMENT_POINTS: u32 = 20;
/// Bonus when years of study differ by at most one.
pub const ADJACENT_YEAR_POINTS: u32 = 10;
/// Bonus when gender preferences are satisfied in both directions.
pub const MUTUAL_GENDER_POINTS: u32 = 20;
/// Upper clamp on the total score.
pub const MAX_SCORE: u32 = 100;

/// True if `y`'s seeking preference is satisfied by `x`'s gender identity.
///
/// An absent preference or the special value "everyone" means no filter.
pub fn gender_satisfies(x: &Candidate, y: &Candidate) -> bool {
    match y.seeking_gender.as_deref() {
        None => true,
        Some("everyone") => true,
        Some(seeking) => x.gender_identity.as_deref() == Some(seeking),
    }
}

/// True if both directions of gender preference are satisfied.
pub fn mutually_eligible(a: &Candidate, b: &Candidate) -> bool {
    gender_satisfies(a, b) && gender_satisfies(b, a)
}

/// Calculate the compatibility score (0-100) between two candidates.
///
/// Scoring rule (additive, clamped at 100):
/// - 10 points per distinct shared interest, capped at 50
/// - 20 points for the same department
/// - 10 points when years of study differ by at most one
/// - 20 points when gender preferences hold in both directions; this term
///   is one symmetric boolean, which keeps score(a, b) == score(b, a)
///
/// Missing attributes contribute zero. The function does not enforce
/// eligibility; ineligible pairs are filtered out upstream before they
/// ever reach a preference list.
pub fn compatibility_score(a: &Candidate, b: &Candidate) -> u8 {
    let mut score: u32 = 0;

    let shared = shared_interest_count(a, b) as u32;
    score += (shared * SHARED_INTEREST_POINTS).min(SHARED_INTEREST_CAP);

    if let (Some(dept_a), Some(dept_b)) = (a.department.as_deref(), b.department.as_deref()) {
        if dept_a == dept_b {
            score += SAME_DEPARTMENT_POINTS;
        }
    }

    if let (Some(year_a), Some(year_b)) = (a.year_of_study, b.year_of_study) {
        if (i16::from(year_a) - i16::from(year_b)).abs() <= 1 {
            score += ADJACENT_YEAR_POINTS;
        }
    }

    if mutually_eligible(a, b) {
        score += MUTUAL_GENDER_POINTS;
    }

    score.min(MAX_SCORE) as u8
}

/// Count distinct interest tags present on both candidates.
/// Duplicate tags within one profile collapse.
#[inline]
fn shared_interest_count(a: &Candidate, b: &Candidate) -> usize {
    let mine: BTreeSet<&str> = a.interests.iter().map(String::as_str).collect();
    let theirs: BTreeSet<&str> = b.interests.iter().map(String::as_str).collect();
    mine.intersection(&theirs).count()
}
