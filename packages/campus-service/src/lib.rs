pub mod error;
pub mod find_partners;
pub mod search_users;
pub mod verify_email;

use std::{future::Future, pin::Pin, sync::Arc};

pub use error::{Error, Result};
pub use find_partners::{FindPartnersRequest, FindPartnersResponse, PartnerSuggestion};
pub use search_users::{SearchUsersRequest, SearchUsersResponse, SearchedUser};
pub use verify_email::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};

use campus_config::{Config, Directory, OracleProviderConfig};
use campus_domain::{
	Candidate, MatchRequest, UserRecord,
	otp::{Clock, MemoryOtpStore, OtpStore, SystemClock},
};
use campus_providers::{directory, oracle};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only boundary to the user directory service. Account storage and
/// profile CRUD live behind it; the matching core only fetches.
pub trait DirectoryProvider
where
	Self: Send + Sync,
{
	fn all_users<'a>(
		&'a self,
		cfg: &'a Directory,
	) -> BoxFuture<'a, color_eyre::Result<Vec<UserRecord>>>;

	fn connections<'a>(
		&'a self,
		cfg: &'a Directory,
		user_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<String>>>;
}

/// The external inference boundary that performs the semantic matching.
pub trait OracleProvider
where
	Self: Send + Sync,
{
	fn suggest<'a>(
		&'a self,
		cfg: &'a OracleProviderConfig,
		priority_score_floor: f32,
		request: &'a MatchRequest,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Candidate>>>;
}

/// Delivery channel for verification codes.
pub trait Mailer
where
	Self: Send + Sync,
{
	fn deliver<'a>(
		&'a self,
		email: &'a str,
		code: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub directory: Arc<dyn DirectoryProvider>,
	pub oracle: Arc<dyn OracleProvider>,
	pub mailer: Arc<dyn Mailer>,
}

struct DefaultProviders;

impl DirectoryProvider for DefaultProviders {
	fn all_users<'a>(
		&'a self,
		cfg: &'a Directory,
	) -> BoxFuture<'a, color_eyre::Result<Vec<UserRecord>>> {
		Box::pin(directory::fetch_all_users(cfg))
	}

	fn connections<'a>(
		&'a self,
		cfg: &'a Directory,
		user_id: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<Vec<String>>> {
		Box::pin(directory::fetch_connections(cfg, user_id))
	}
}

impl OracleProvider for DefaultProviders {
	fn suggest<'a>(
		&'a self,
		cfg: &'a OracleProviderConfig,
		priority_score_floor: f32,
		request: &'a MatchRequest,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Candidate>>> {
		Box::pin(oracle::suggest(cfg, priority_score_floor, request))
	}
}

/// Logs the code instead of sending mail. Real delivery is an external
/// collaborator; this mirrors the simulated delivery of the original demo
/// service.
struct LogMailer;

impl Mailer for LogMailer {
	fn deliver<'a>(
		&'a self,
		email: &'a str,
		code: &'a str,
	) -> BoxFuture<'a, color_eyre::Result<()>> {
		tracing::info!(%email, %code, "Issued verification code.");

		Box::pin(async move { Ok(()) })
	}
}

impl Providers {
	pub fn new(
		directory: Arc<dyn DirectoryProvider>,
		oracle: Arc<dyn OracleProvider>,
		mailer: Arc<dyn Mailer>,
	) -> Self {
		Self { directory, oracle, mailer }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { directory: provider.clone(), oracle: provider, mailer: Arc::new(LogMailer) }
	}
}

pub struct CampusService {
	pub cfg: Config,
	pub providers: Providers,
	pub otp_store: Arc<dyn OtpStore>,
	pub clock: Arc<dyn Clock>,
}

impl CampusService {
	pub fn new(cfg: Config) -> Self {
		Self {
			cfg,
			providers: Providers::default(),
			otp_store: Arc::new(MemoryOtpStore::new()),
			clock: Arc::new(SystemClock),
		}
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self {
			cfg,
			providers,
			otp_store: Arc::new(MemoryOtpStore::new()),
			clock: Arc::new(SystemClock),
		}
	}
}
