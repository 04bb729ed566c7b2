use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub directory: Directory,
	pub providers: Providers,
	#[serde(default)]
	pub matching: Matching,
	#[serde(default)]
	pub verification: Verification,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Directory {
	pub api_base: String,
	#[serde(default)]
	pub api_key: String,
	#[serde(default = "default_users_path")]
	pub users_path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub oracle: OracleProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct OracleProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Matching {
	/// Suggestions returned when the caller does not ask for a specific count.
	#[serde(default = "default_suggestions")]
	pub default_suggestions: u32,
	/// Count used by the social-feed-driven finder.
	#[serde(default = "feed_suggestions")]
	pub feed_suggestions: u32,
	/// Score the oracle is asked to give already-connected users. Advisory
	/// only; final ordering is enforced locally.
	#[serde(default = "priority_score_floor")]
	pub priority_score_floor: f32,
}
impl Default for Matching {
	fn default() -> Self {
		Self {
			default_suggestions: default_suggestions(),
			feed_suggestions: feed_suggestions(),
			priority_score_floor: priority_score_floor(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Verification {
	#[serde(default = "otp_validity_minutes")]
	pub otp_validity_minutes: i64,
}
impl Default for Verification {
	fn default() -> Self {
		Self { otp_validity_minutes: otp_validity_minutes() }
	}
}

fn default_users_path() -> String {
	"/v1/users".to_string()
}

fn default_suggestions() -> u32 {
	5
}

fn feed_suggestions() -> u32 {
	6
}

fn priority_score_floor() -> f32 {
	0.9
}

fn otp_validity_minutes() -> i64 {
	15
}
