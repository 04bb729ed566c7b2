mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Directory, Matching, OracleProviderConfig, Providers, Service, Verification,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.directory.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "directory.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.directory.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "directory.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.oracle.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.oracle.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.oracle.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.oracle.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.default_suggestions == 0 {
		return Err(Error::Validation {
			message: "matching.default_suggestions must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.feed_suggestions == 0 {
		return Err(Error::Validation {
			message: "matching.feed_suggestions must be greater than zero.".to_string(),
		});
	}
	if !cfg.matching.priority_score_floor.is_finite() {
		return Err(Error::Validation {
			message: "matching.priority_score_floor must be a finite number.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.matching.priority_score_floor) {
		return Err(Error::Validation {
			message: "matching.priority_score_floor must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.verification.otp_validity_minutes <= 0 {
		return Err(Error::Validation {
			message: "verification.otp_validity_minutes must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	strip_trailing_slash(&mut cfg.directory.api_base);
	strip_trailing_slash(&mut cfg.providers.oracle.api_base);
}

fn strip_trailing_slash(base: &mut String) {
	if base.ends_with('/') {
		base.truncate(base.len() - 1);
	}
}
