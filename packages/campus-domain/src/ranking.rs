use std::{cmp::Ordering, collections::HashSet};

use serde::{Deserialize, Serialize};

/// One suggestion as returned by the oracle. Every field is required;
/// deserialization fails closed on a missing field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
	pub user_id: String,
	pub name: String,
	pub common_interests: Vec<String>,
	pub match_score: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RankedResult {
	pub user_id: String,
	pub name: String,
	pub common_interests: Vec<String>,
	pub match_score: f32,
	pub is_priority: bool,
}

/// Re-orders the oracle's raw suggestions into the final ranking.
///
/// The oracle is asked to score connected users highly, but that instruction
/// is advisory; this function is the authority on ordering. Self-matches are
/// dropped, scores clamped into `[0, 1]`, and, when any priority ids exist,
/// the list is stable-sorted so priority candidates precede everyone else
/// and each group is non-increasing by score. With no priority ids the
/// oracle's order is preserved untouched. Duplicate user ids are passed
/// through as-is.
pub fn rank(
	candidates: Vec<Candidate>,
	priority_ids: &HashSet<String>,
	current_user_id: Option<&str>,
) -> Vec<RankedResult> {
	let mut results = candidates
		.into_iter()
		.filter(|candidate| current_user_id != Some(candidate.user_id.as_str()))
		.map(|candidate| RankedResult {
			is_priority: priority_ids.contains(&candidate.user_id),
			match_score: candidate.match_score.clamp(0.0, 1.0),
			user_id: candidate.user_id,
			name: candidate.name,
			common_interests: candidate.common_interests,
		})
		.collect::<Vec<_>>();

	if !priority_ids.is_empty() {
		results.sort_by(|a, b| {
			b.is_priority
				.cmp(&a.is_priority)
				.then(b.match_score.partial_cmp(&a.match_score).unwrap_or(Ordering::Equal))
		});
	}

	results
}
