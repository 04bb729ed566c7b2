pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Oracle error: {message}")]
	Oracle { message: String },
	#[error("Directory error: {message}")]
	Directory { message: String },
	#[error("Mailer error: {message}")]
	Mailer { message: String },
}
