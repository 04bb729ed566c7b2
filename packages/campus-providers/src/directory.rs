// std
use std::time::Duration as StdDuration;

// crates.io
use color_eyre::{Result, eyre};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use campus_config::Directory;
use campus_domain::UserRecord;

/// Fetches every record in the user directory. The corpus is always built
/// from a full fetch; the directory exposes no pagination.
pub async fn fetch_all_users(cfg: &Directory) -> Result<Vec<UserRecord>> {
	let url = format!("{}{}", cfg.api_base, cfg.users_path);
	let json: Value = client(cfg)?
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.send()
		.await?
		.error_for_status()?
		.json()
		.await?;

	parse_users_response(json)
}

/// Fetches the ids the given user is already connected with. A 404 means no
/// connection records exist, which is the normal case for new accounts.
pub async fn fetch_connections(cfg: &Directory, user_id: &str) -> Result<Vec<String>> {
	let url = format!("{}{}/{user_id}/connections", cfg.api_base, cfg.users_path);
	let res = client(cfg)?
		.get(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.send()
		.await?;

	if res.status() == StatusCode::NOT_FOUND {
		return Ok(Vec::new());
	}

	let json: Value = res.error_for_status()?.json().await?;

	parse_connections_response(json)
}

fn client(cfg: &Directory) -> Result<Client> {
	Ok(Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?)
}

fn parse_users_response(json: Value) -> Result<Vec<UserRecord>> {
	let users = json
		.get("users")
		.cloned()
		.ok_or_else(|| eyre::eyre!("Directory response is missing users array."))?;

	serde_json::from_value(users)
		.map_err(|err| eyre::eyre!("Directory user record failed validation: {err}."))
}

fn parse_connections_response(json: Value) -> Result<Vec<String>> {
	let connections = json
		.get("connections")
		.cloned()
		.ok_or_else(|| eyre::eyre!("Directory response is missing connections array."))?;

	serde_json::from_value(connections)
		.map_err(|err| eyre::eyre!("Directory connection ids failed validation: {err}."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_user_records_with_optional_fields_defaulted() {
		let json = serde_json::json!({
			"users": [
				{ "id": "u1", "firstName": "Ada", "lastName": "Lee",
					"interests": ["ai"], "skills": ["rust"], "bio": "Hi." },
				{ "id": "u2", "firstName": "Bea" }
			]
		});
		let users = parse_users_response(json).expect("parse failed");

		assert_eq!(users.len(), 2);
		assert_eq!(users[0].display_name(), "Ada Lee");
		assert!(users[1].interests.is_empty());
		assert_eq!(users[1].bio, "");
	}

	#[test]
	fn user_record_without_id_is_rejected() {
		let json = serde_json::json!({
			"users": [ { "firstName": "Ada" } ]
		});

		assert!(parse_users_response(json).is_err());
	}

	#[test]
	fn parses_connection_ids() {
		let json = serde_json::json!({ "connections": ["u2", "u3"] });
		let ids = parse_connections_response(json).expect("parse failed");

		assert_eq!(ids, vec!["u2".to_string(), "u3".to_string()]);
	}

	#[test]
	fn missing_connections_array_is_rejected() {
		let json = serde_json::json!({ "items": [] });

		assert!(parse_connections_response(json).is_err());
	}
}
