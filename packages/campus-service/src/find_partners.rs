use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use campus_domain::{MatchRequest, RankedResult, corpus, rank};

use crate::{CampusService, Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FindPartnersRequest {
	/// Authenticated requester, if any. Anonymous callers get no priority
	/// boosting and no self-exclusion key.
	pub requester_id: Option<String>,
	pub profile_text: String,
	/// Overrides `matching.default_suggestions`; the feed-driven finder
	/// passes `matching.feed_suggestions` here.
	pub suggestion_count: Option<u32>,
}

/// Presentation shape handed to the UI. Priority is expressed purely by
/// list position; the flag itself stays internal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSuggestion {
	pub user_id: String,
	pub name: String,
	pub common_interests: Vec<String>,
	pub match_score: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FindPartnersResponse {
	pub suggestions: Vec<PartnerSuggestion>,
}

impl CampusService {
	pub async fn find_partners(&self, req: FindPartnersRequest) -> Result<FindPartnersResponse> {
		let profile_text = req.profile_text.trim();

		if profile_text.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Profile text is required.".to_string(),
			});
		}

		let requester_id = req.requester_id.as_deref().filter(|id| !id.trim().is_empty());
		// Corpus and connections are independent read-only fetches.
		let (users, connection_ids) = match requester_id {
			Some(user_id) => tokio::try_join!(
				self.providers.directory.all_users(&self.cfg.directory),
				self.providers.directory.connections(&self.cfg.directory, user_id),
			)
			.map_err(|err| Error::Directory { message: err.to_string() })?,
			None => {
				let users = self
					.providers
					.directory
					.all_users(&self.cfg.directory)
					.await
					.map_err(|err| Error::Directory { message: err.to_string() })?;

				(users, Vec::new())
			},
		};

		let corpus = corpus::build_corpus(&users);
		let desired_count =
			req.suggestion_count.unwrap_or(self.cfg.matching.default_suggestions);
		let request = MatchRequest::new(
			profile_text.to_string(),
			corpus,
			desired_count,
			connection_ids.clone(),
		);

		let candidates = self
			.providers
			.oracle
			.suggest(&self.cfg.providers.oracle, self.cfg.matching.priority_score_floor, &request)
			.await
			.map_err(|err| Error::Oracle { message: err.to_string() })?;

		let priority_ids = connection_ids.into_iter().collect::<HashSet<_>>();
		let ranked = rank(candidates, &priority_ids, requester_id);

		Ok(FindPartnersResponse {
			suggestions: ranked.into_iter().map(to_suggestion).collect(),
		})
	}
}

fn to_suggestion(result: RankedResult) -> PartnerSuggestion {
	PartnerSuggestion {
		user_id: result.user_id,
		name: result.name,
		common_interests: result.common_interests,
		match_score: result.match_score,
	}
}
