use serde::{Deserialize, Serialize};

/// The assembled input for one oracle call. A pure value; blank-profile
/// rejection happens before this is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchRequest {
	#[serde(rename = "currentUserProfile")]
	pub current_user_profile: String,
	#[serde(rename = "allUserProfiles")]
	pub corpus: String,
	#[serde(rename = "numberOfSuggestions")]
	pub desired_count: u32,
	#[serde(rename = "connectedUserIds")]
	pub priority_ids: Vec<String>,
}

impl MatchRequest {
	pub fn new(
		current_user_profile: String,
		corpus: String,
		desired_count: u32,
		priority_ids: Vec<String>,
	) -> Self {
		Self { current_user_profile, corpus, desired_count, priority_ids }
	}
}
