//! Shared fixtures for service and API tests: an in-memory directory, a
//! scripted oracle, a manual clock, and a recording mailer. Nothing here
//! talks to the network.

use std::{
	collections::HashMap,
	sync::{
		Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use serde_json::Map;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use campus_config::{Config, Directory, Matching, OracleProviderConfig, Providers, Service,
	Verification};
use campus_domain::{Candidate, MatchRequest, UserRecord, otp::Clock};
use campus_service::{BoxFuture, DirectoryProvider, Mailer, OracleProvider};

pub fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		directory: Directory {
			api_base: "http://127.0.0.1:9".to_string(),
			api_key: String::new(),
			users_path: "/v1/users".to_string(),
			timeout_ms: 1_000,
			default_headers: Map::new(),
		},
		providers: Providers {
			oracle: OracleProviderConfig {
				provider_id: "scripted".to_string(),
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: "test-key".to_string(),
				path: "/v1/chat/completions".to_string(),
				model: "test-model".to_string(),
				temperature: 0.0,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		matching: Matching::default(),
		verification: Verification::default(),
	}
}

pub fn mint_user_id() -> String {
	format!("user_{}", Uuid::new_v4().simple())
}

pub fn user(id: &str, first: &str, last: Option<&str>) -> UserRecord {
	UserRecord {
		id: id.to_string(),
		first_name: first.to_string(),
		last_name: last.map(str::to_string),
		interests: vec![],
		skills: vec![],
		bio: String::new(),
		profile_photo_url: None,
	}
}

pub fn candidate(user_id: &str, name: &str, score: f32) -> Candidate {
	Candidate {
		user_id: user_id.to_string(),
		name: name.to_string(),
		common_interests: vec![],
		match_score: score,
	}
}

pub fn sample_users() -> Vec<UserRecord> {
	vec![
		UserRecord {
			interests: vec!["ai".to_string(), "robotics".to_string()],
			skills: vec!["python".to_string()],
			bio: "Grad student working on perception.".to_string(),
			..user("a", "Ada", Some("Lovelace"))
		},
		UserRecord {
			interests: vec!["web".to_string()],
			skills: vec!["rust".to_string(), "react".to_string()],
			bio: "Builds campus tools.".to_string(),
			..user("b", "Bea", None)
		},
		UserRecord {
			interests: vec!["machine learning".to_string()],
			skills: vec!["c++".to_string()],
			..user("c", "Cal", Some("Ng"))
		},
	]
}

pub struct InMemoryDirectory {
	users: Vec<UserRecord>,
	connections: HashMap<String, Vec<String>>,
	failing: bool,
}

impl InMemoryDirectory {
	pub fn new(users: Vec<UserRecord>) -> Self {
		Self { users, connections: HashMap::new(), failing: false }
	}

	pub fn with_connections(mut self, user_id: &str, connected: &[&str]) -> Self {
		self.connections.insert(
			user_id.to_string(),
			connected.iter().map(|id| id.to_string()).collect(),
		);

		self
	}

	pub fn failing() -> Self {
		Self { users: Vec::new(), connections: HashMap::new(), failing: true }
	}
}

impl DirectoryProvider for InMemoryDirectory {
	fn all_users<'a>(
		&'a self,
		_cfg: &'a Directory,
	) -> BoxFuture<'a, color_eyre::Result<Vec<UserRecord>>> {
		let result = if self.failing {
			Err(color_eyre::eyre::eyre!("Directory is unavailable."))
		} else {
			Ok(self.users.clone())
		};

		Box::pin(async move { result })
	}

	fn connections<'a>(
		&'a self,
		_cfg: &'a Directory,
		user_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<String>>> {
		let result = if self.failing {
			Err(color_eyre::eyre::eyre!("Directory is unavailable."))
		} else {
			Ok(self.connections.get(user_id).cloned().unwrap_or_default())
		};

		Box::pin(async move { result })
	}
}

enum OracleScript {
	Suggestions(Vec<Candidate>),
	Failure(String),
}

/// Oracle double that returns a canned payload or a scripted failure, and
/// records what it was asked.
pub struct ScriptedOracle {
	script: OracleScript,
	calls: AtomicUsize,
	last_request: Mutex<Option<MatchRequest>>,
}

impl ScriptedOracle {
	pub fn returning(candidates: Vec<Candidate>) -> Self {
		Self {
			script: OracleScript::Suggestions(candidates),
			calls: AtomicUsize::new(0),
			last_request: Mutex::new(None),
		}
	}

	pub fn failing(message: &str) -> Self {
		Self {
			script: OracleScript::Failure(message.to_string()),
			calls: AtomicUsize::new(0),
			last_request: Mutex::new(None),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn last_request(&self) -> Option<MatchRequest> {
		self.last_request.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}

impl OracleProvider for ScriptedOracle {
	fn suggest<'a>(
		&'a self,
		_cfg: &'a OracleProviderConfig,
		_priority_score_floor: f32,
		request: &'a MatchRequest,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Candidate>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		*self.last_request.lock().unwrap_or_else(|err| err.into_inner()) = Some(request.clone());

		let result = match &self.script {
			OracleScript::Suggestions(candidates) => Ok(candidates.clone()),
			OracleScript::Failure(message) => Err(color_eyre::eyre::eyre!("{message}")),
		};

		Box::pin(async move { result })
	}
}

pub struct ManualClock {
	now: Mutex<OffsetDateTime>,
}

impl ManualClock {
	pub fn new(now: OffsetDateTime) -> Self {
		Self { now: Mutex::new(now) }
	}

	pub fn at_epoch() -> Self {
		Self::new(OffsetDateTime::UNIX_EPOCH + Duration::days(20_000))
	}

	pub fn advance(&self, by: Duration) {
		let mut now = self.now.lock().unwrap_or_else(|err| err.into_inner());

		*now += by;
	}
}

impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.now.lock().unwrap_or_else(|err| err.into_inner())
	}
}

#[derive(Default)]
pub struct RecordingMailer {
	deliveries: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn deliveries(&self) -> Vec<(String, String)> {
		self.deliveries.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}

impl Mailer for RecordingMailer {
	fn deliver<'a>(
		&'a self,
		email: &'a str,
		code: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		let mut deliveries = self.deliveries.lock().unwrap_or_else(|err| err.into_inner());

		deliveries.push((email.to_string(), code.to_string()));

		Box::pin(async move { Ok(()) })
	}
}
