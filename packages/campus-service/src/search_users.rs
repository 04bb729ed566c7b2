use serde::{Deserialize, Serialize};

use campus_domain::UserRecord;

use crate::{CampusService, Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchUsersRequest {
	pub query: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchedUser {
	pub id: String,
	pub first_name: String,
	pub last_name: Option<String>,
	#[serde(rename = "profilePhotoURL")]
	pub profile_photo_url: Option<String>,
	pub skills: Vec<String>,
	pub interests: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchUsersResponse {
	pub users: Vec<SearchedUser>,
}

impl CampusService {
	/// Substring search over name, skills, and interests. Scans the full
	/// directory per request; the directory offers no search index and this
	/// stands in for one.
	pub async fn search_users(&self, req: SearchUsersRequest) -> Result<SearchUsersResponse> {
		let query = req.query.trim().to_lowercase();

		if query.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Search query is required.".to_string(),
			});
		}

		let users = self
			.providers
			.directory
			.all_users(&self.cfg.directory)
			.await
			.map_err(|err| Error::Directory { message: err.to_string() })?;
		let users = users
			.into_iter()
			.filter(|user| matches_query(user, &query))
			.map(to_searched)
			.collect();

		Ok(SearchUsersResponse { users })
	}
}

fn matches_query(user: &UserRecord, query: &str) -> bool {
	user.display_name().to_lowercase().contains(query)
		|| user.skills.iter().any(|skill| skill.to_lowercase().contains(query))
		|| user.interests.iter().any(|interest| interest.to_lowercase().contains(query))
}

fn to_searched(user: UserRecord) -> SearchedUser {
	SearchedUser {
		id: user.id,
		first_name: user.first_name,
		last_name: user.last_name,
		profile_photo_url: user.profile_photo_url,
		skills: user.skills,
		interests: user.interests,
	}
}
