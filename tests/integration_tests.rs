// Integration tests for the matching orchestration and the profile client

use campus_match::core::Matcher;
use campus_match::models::{pair_key, Candidate, MatchPair, MatchRecord, PartnerProfile};
use campus_match::services::{
    get_compatibility, get_user_matches, run_matching, MatchStore, ProfileStore, StoreError,
};
use std::collections::HashMap;
use std::sync::Mutex;

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

/// In-memory profile store double
struct MemoryProfileStore {
    candidates: Vec<Candidate>,
}

impl MemoryProfileStore {
    fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn list_dating_eligible(&self) -> Result<Vec<Candidate>, StoreError> {
        Ok(self.candidates.clone())
    }

    async fn get_candidate(&self, user_id: &str) -> Result<Option<Candidate>, StoreError> {
        Ok(self.candidates.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn get_summary(&self, user_id: &str) -> Result<Option<PartnerProfile>, StoreError> {
        Ok(self.candidates.iter().find(|c| c.user_id == user_id).map(|c| PartnerProfile {
            user_id: c.user_id.clone(),
            name: Some(format!("Name of {}", c.user_id)),
            avatar_file_id: None,
            department: c.department.clone(),
            interests: c.interests.clone(),
            bio: None,
        }))
    }
}

/// In-memory match store double, keyed by the canonical pair key
#[derive(Default)]
struct MemoryMatchStore {
    pairs: Mutex<HashMap<String, MatchPair>>,
}

impl MemoryMatchStore {
    fn len(&self) -> usize {
        self.pairs.lock().expect("lock poisoned").len()
    }
}

impl MatchStore for MemoryMatchStore {
    async fn pair_exists(&self, a_id: &str, b_id: &str) -> Result<bool, StoreError> {
        let pairs = self.pairs.lock().expect("lock poisoned");
        Ok(pairs.contains_key(&pair_key(a_id, b_id)))
    }

    async fn insert_pair(&self, pair: &MatchPair) -> Result<(), StoreError> {
        let mut pairs = self.pairs.lock().expect("lock poisoned");
        pairs.insert(pair_key(&pair.a_id, &pair.b_id), pair.clone());
        Ok(())
    }

    async fn matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        let pairs = self.pairs.lock().expect("lock poisoned");
        let mut records: Vec<MatchRecord> = pairs
            .values()
            .filter_map(|p| {
                let partner_id = if p.a_id == user_id {
                    Some(p.b_id.clone())
                } else if p.b_id == user_id {
                    Some(p.a_id.clone())
                } else {
                    None
                }?;
                Some(MatchRecord {
                    user_id: user_id.to_string(),
                    partner_id,
                    compatibility_score: p.compatibility_score,
                    matched_at: chrono::Utc::now(),
                })
            })
            .collect();
        records.sort_by(|a, b| {
            b.compatibility_score
                .cmp(&a.compatibility_score)
                .then_with(|| a.partner_id.cmp(&b.partner_id))
        });
        Ok(records)
    }
}

fn sample_pool() -> Vec<Candidate> {
    vec![
        candidate("alice", Some("F"), Some("M"), &["chess", "hiking"], Some("CS"), Some(2)),
        candidate("bob", Some("M"), Some("F"), &["chess", "music"], Some("CS"), Some(2)),
        candidate("carol", Some("F"), Some("M"), &["film"], Some("EE"), Some(3)),
        candidate("dave", Some("M"), Some("F"), &["film", "hiking"], Some("EE"), Some(4)),
        candidate("erin", Some("F"), Some("F"), &["chess"], Some("CS"), Some(1)),
    ]
}

#[tokio::test]
async fn test_run_matching_persists_pairs_and_is_idempotent() {
    let profiles = MemoryProfileStore::new(sample_pool());
    let matches = MemoryMatchStore::default();
    let matcher = Matcher::unbounded();

    let first = run_matching(&profiles, &matches, &matcher)
        .await
        .expect("first run");
    assert!(!first.created.is_empty());
    assert_eq!(first.skipped_existing, 0);
    assert_eq!(first.pool_size, 5);
    assert_eq!(matches.len(), first.created.len());

    // Each candidate appears in at most one created pair.
    let mut seen = std::collections::HashSet::new();
    for pair in &first.created {
        assert!(seen.insert(&pair.a_id));
        assert!(seen.insert(&pair.b_id));
    }

    // Unchanged pool: nothing new, everything deduplicated.
    let second = run_matching(&profiles, &matches, &matcher)
        .await
        .expect("second run");
    assert!(second.created.is_empty());
    assert_eq!(second.skipped_existing, first.created.len());
    assert_eq!(matches.len(), first.created.len());
}

#[tokio::test]
async fn test_run_matching_with_insufficient_pool() {
    let profiles = MemoryProfileStore::new(vec![candidate(
        "lonely",
        Some("F"),
        None,
        &["chess"],
        None,
        None,
    )]);
    let matches = MemoryMatchStore::default();
    let matcher = Matcher::unbounded();

    let report = run_matching(&profiles, &matches, &matcher)
        .await
        .expect("insufficient pool is not an error");

    assert_eq!(report.pool_size, 1);
    assert!(report.created.is_empty());
    assert!(report.message.is_some());
    assert_eq!(matches.len(), 0);
}

#[tokio::test]
async fn test_get_user_matches_enriches_with_partner_profile() {
    let profiles = MemoryProfileStore::new(sample_pool());
    let matches = MemoryMatchStore::default();
    let matcher = Matcher::unbounded();

    run_matching(&profiles, &matches, &matcher)
        .await
        .expect("run");

    // alice and bob share the top edge of the sample pool (score 60).
    let alice_matches = get_user_matches(&profiles, &matches, "alice")
        .await
        .expect("fetch matches");
    assert_eq!(alice_matches.len(), 1);
    assert_eq!(alice_matches[0].partner.user_id, "bob");
    assert_eq!(alice_matches[0].partner.name.as_deref(), Some("Name of bob"));
    assert_eq!(alice_matches[0].compatibility_score, 60);

    // A user with no records gets an empty list, not an error.
    let none = get_user_matches(&profiles, &matches, "nobody")
        .await
        .expect("empty list is valid");
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_get_compatibility_exact_score() {
    let profiles = MemoryProfileStore::new(sample_pool());

    // 1 shared interest + same department + same year + mutual gender = 60.
    let score = get_compatibility(&profiles, "alice", "bob")
        .await
        .expect("both profiles exist");
    assert_eq!(score, 60);
}

#[tokio::test]
async fn test_get_compatibility_not_found() {
    let profiles = MemoryProfileStore::new(sample_pool());

    let err = get_compatibility(&profiles, "alice", "ghost")
        .await
        .expect_err("missing profile should fail");
    assert!(err.is_not_found());
}

mod profile_client {
    use campus_match::services::{ProfileClient, ProfileCollections, ProfileStore};

    fn client_for(server: &mockito::ServerGuard) -> ProfileClient {
        ProfileClient::new(
            server.url(),
            "test_key".to_string(),
            "test_project".to_string(),
            "test_db".to_string(),
            ProfileCollections {
                user_profiles: "user_profiles".to_string(),
            },
        )
        .expect("client should build")
    }

    #[tokio::test]
    async fn test_list_dating_eligible_parses_documents() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "total": 2,
            "documents": [
                {
                    "$id": "doc1",
                    "userId": "alice",
                    "genderIdentity": "F",
                    "seekingGender": "M",
                    "interests": ["chess", "hiking"],
                    "department": "CS",
                    "yearOfStudy": 2
                },
                {
                    "$id": "doc2",
                    "userId": "bob"
                }
            ]
        });

        let mock = server
            .mock("GET", "/databases/test_db/collections/user_profiles/documents")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let pool = client.list_dating_eligible().await.expect("list");

        mock.assert_async().await;
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].user_id, "alice");
        assert_eq!(pool[0].year_of_study, Some(2));
        // Optional attributes default when absent.
        assert_eq!(pool[1].user_id, "bob");
        assert!(pool[1].interests.is_empty());
        assert!(pool[1].gender_identity.is_none());
    }

    #[tokio::test]
    async fn test_missing_profile_resolves_to_none() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({ "total": 0, "documents": [] });

        let _mock = server
            .mock("GET", "/databases/test_db/collections/user_profiles/documents")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let found = client.get_candidate("ghost").await.expect("no store fault");
        assert!(found.is_none());
    }
}
