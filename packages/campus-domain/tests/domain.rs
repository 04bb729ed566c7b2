use std::collections::HashSet;

use campus_domain::{Candidate, MatchRequest, UserRecord, corpus, rank};

fn user(id: &str, first: &str, interests: &[&str]) -> UserRecord {
	UserRecord {
		id: id.to_string(),
		first_name: first.to_string(),
		last_name: None,
		interests: interests.iter().map(|s| s.to_string()).collect(),
		skills: vec![],
		bio: String::new(),
		profile_photo_url: None,
	}
}

fn candidate(user_id: &str, score: f32) -> Candidate {
	Candidate {
		user_id: user_id.to_string(),
		name: format!("User {user_id}"),
		common_interests: vec![],
		match_score: score,
	}
}

#[test]
fn corpus_feeds_a_complete_match_request() {
	let users =
		[user("b", "Bea", &["ai"]), user("a", "Ada", &["rust", "ai"]), user("c", "Cal", &[])];
	let corpus = corpus::build_corpus(&users);
	let request = MatchRequest::new(
		"Interested in AI and Rust.".to_string(),
		corpus.clone(),
		5,
		vec!["b".to_string()],
	);

	assert_eq!(request.desired_count, 5);
	assert!(request.corpus.starts_with("User ID: a\n"));
	assert_eq!(corpus.matches("---").count(), 2);
}

#[test]
fn connected_user_outranks_higher_scores() {
	// Corpus: A scores 0.6 (not connected), B scores 0.4 (connected),
	// C scores 0.9 (not connected). Expected order: B, C, A.
	let priorities = HashSet::from(["B".to_string()]);
	let ranked = rank(
		vec![candidate("A", 0.6), candidate("B", 0.4), candidate("C", 0.9)],
		&priorities,
		Some("me"),
	);

	let order = ranked.iter().map(|r| r.user_id.as_str()).collect::<Vec<_>>();

	assert_eq!(order, vec!["B", "C", "A"]);
}

#[test]
fn high_scoring_self_match_is_still_excluded() {
	let ranked = rank(
		vec![candidate("me", 0.99), candidate("A", 0.6), candidate("B", 0.4)],
		&HashSet::new(),
		Some("me"),
	);

	let order = ranked.iter().map(|r| r.user_id.as_str()).collect::<Vec<_>>();

	assert_eq!(order, vec!["A", "B"]);
}
