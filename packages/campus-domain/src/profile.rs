use serde::{Deserialize, Serialize};

/// One account in the user directory. Owned by the directory service; the
/// matching core only ever reads these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
	pub id: String,
	pub first_name: String,
	#[serde(default)]
	pub last_name: Option<String>,
	#[serde(default)]
	pub interests: Vec<String>,
	#[serde(default)]
	pub skills: Vec<String>,
	#[serde(default)]
	pub bio: String,
	#[serde(default, rename = "profilePhotoURL")]
	pub profile_photo_url: Option<String>,
}

impl UserRecord {
	pub fn display_name(&self) -> String {
		match self.last_name.as_deref() {
			Some(last) if !last.trim().is_empty() => format!("{} {last}", self.first_name),
			_ => self.first_name.clone(),
		}
	}
}
