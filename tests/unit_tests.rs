// Property tests for the Campus Match core

use campus_match::core::{
    build_preference_lists, compatibility_score, mutually_eligible, stable_match, PreferenceList,
};
use campus_match::models::Candidate;
use std::collections::BTreeMap;

fn candidate(
    id: &str,
    gender: Option<&str>,
    seeking: Option<&str>,
    interests: &[&str],
    department: Option<&str>,
    year: Option<u8>,
) -> Candidate {
    Candidate {
        user_id: id.to_string(),
        gender_identity: gender.map(str::to_string),
        seeking_gender: seeking.map(str::to_string),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        department: department.map(str::to_string),
        year_of_study: year,
    }
}

/// A varied pool: mixed genders, seeking filters, departments and years.
fn varied_pool() -> Vec<Candidate> {
    let genders = ["M", "F", "NB"];
    let seekings = [Some("M"), Some("F"), Some("everyone"), None];
    let departments = [Some("CS"), Some("EE"), Some("Math"), None];
    let tags = ["chess", "hiking", "music", "film", "climbing", "anime"];

    (0..24usize)
        .map(|i| {
            let interests: Vec<&str> = tags.iter().copied().filter(|_| i % 3 != 2).take(i % 5).collect();
            candidate(
                &format!("user-{:02}", i),
                Some(genders[i % genders.len()]),
                seekings[i % seekings.len()],
                &interests,
                departments[i % departments.len()],
                if i % 7 == 0 { None } else { Some((i % 4) as u8 + 1) },
            )
        })
        .collect()
}

fn rank_of(list: &PreferenceList, id: &str) -> Option<usize> {
    list.ranked.iter().position(|c| c == id)
}

#[test]
fn test_score_symmetry_and_bounds() {
    let pool = varied_pool();

    for a in &pool {
        for b in &pool {
            let forward = compatibility_score(a, b);
            let backward = compatibility_score(b, a);
            assert_eq!(
                forward, backward,
                "score not symmetric for {} / {}",
                a.user_id, b.user_id
            );
            assert!(forward <= 100);
        }
    }
}

#[test]
fn test_eligibility_exclusion() {
    let pool = varied_pool();
    let table = build_preference_lists(&pool);

    for u in &pool {
        for v in &pool {
            if u.user_id == v.user_id || mutually_eligible(u, v) {
                continue;
            }
            assert!(
                rank_of(&table.lists[&u.user_id], &v.user_id).is_none(),
                "{} should not rank ineligible {}",
                u.user_id,
                v.user_id
            );
            assert!(
                rank_of(&table.lists[&v.user_id], &u.user_id).is_none(),
                "{} should not rank ineligible {}",
                v.user_id,
                u.user_id
            );
        }
    }
}

#[test]
fn test_preference_lists_deterministic_regardless_of_input_order() {
    let mut pool = varied_pool();
    let forward = build_preference_lists(&pool);

    pool.reverse();
    let backward = build_preference_lists(&pool);

    assert_eq!(forward.lists.len(), backward.lists.len());
    for (owner, list) in &forward.lists {
        assert_eq!(
            list.ranked, backward.lists[owner].ranked,
            "ranking for {} depends on input order",
            owner
        );
    }
}

#[test]
fn test_preference_lists_strictly_ordered() {
    let pool = varied_pool();
    let table = build_preference_lists(&pool);

    for (owner, list) in &table.lists {
        assert!(rank_of(list, owner).is_none(), "{} ranks itself", owner);
        for window in list.ranked.windows(2) {
            let first = table.score_of(owner, &window[0]).expect("scored");
            let second = table.score_of(owner, &window[1]).expect("scored");
            assert!(
                first > second || (first == second && window[0] < window[1]),
                "ranking for {} violates score-then-id order",
                owner
            );
        }
    }
}

#[test]
fn test_matching_symmetry() {
    let pool = varied_pool();
    let table = build_preference_lists(&pool);
    let matching = stable_match(&table.lists);

    for (a, b) in &matching {
        assert_ne!(a, b);
        assert_eq!(matching.get(b), Some(a), "matching not symmetric at {}", a);
    }
}

#[test]
fn test_matching_stability_no_blocking_pair() {
    let pool = varied_pool();
    let table = build_preference_lists(&pool);
    let matching = stable_match(&table.lists);

    assert_no_blocking_pair(&table.lists, &matching);
}

#[test]
fn test_matching_stability_on_engineered_triangle() {
    // All mutually eligible; scores force x-y as the top edge for both and
    // leave z as everyone's second choice.
    let pool = vec![
        candidate("x", None, None, &["chess", "anime"], Some("CS"), None),
        candidate("y", None, None, &["chess", "anime"], Some("CS"), None),
        candidate("z", None, None, &["chess"], Some("Math"), None),
    ];
    let table = build_preference_lists(&pool);
    let matching = stable_match(&table.lists);

    assert_eq!(matching.get("x").map(String::as_str), Some("y"));
    assert_eq!(matching.get("y").map(String::as_str), Some("x"));
    assert!(!matching.contains_key("z"));
    assert_no_blocking_pair(&table.lists, &matching);
}

fn assert_no_blocking_pair(
    lists: &BTreeMap<String, PreferenceList>,
    matching: &BTreeMap<String, String>,
) {
    for (u, list) in lists {
        let u_partner_rank = matching.get(u).and_then(|p| rank_of(list, p));

        for (v_rank, v) in list.ranked.iter().enumerate() {
            // u prefers v over its current assignment (or u is free)
            let u_prefers_v = match u_partner_rank {
                None => true,
                Some(partner_rank) => v_rank < partner_rank,
            };
            if !u_prefers_v {
                continue;
            }

            let v_list = &lists[v];
            let Some(u_rank_at_v) = rank_of(v_list, u) else {
                continue;
            };
            let v_partner_rank = matching.get(v).and_then(|p| rank_of(v_list, p));
            let v_prefers_u = match v_partner_rank {
                None => true,
                Some(partner_rank) => u_rank_at_v < partner_rank,
            };

            assert!(
                !v_prefers_u,
                "blocking pair: {} and {} both prefer each other over their assignments",
                u, v
            );
        }
    }
}
