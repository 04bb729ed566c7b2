// std
use std::time::Duration as StdDuration;

// crates.io
use color_eyre::{Result, eyre};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use campus_config::OracleProviderConfig;
use campus_domain::{Candidate, MatchRequest};

#[derive(Debug, Deserialize)]
struct SuggestionsPayload {
	suggestions: Vec<Candidate>,
}

/// Sends one match request to the oracle and returns its raw suggestions.
///
/// The prompt asks the oracle to score already-connected users at or above
/// `priority_score_floor` and to skip the requesting user, but neither
/// instruction is trusted: final ordering and self-exclusion are enforced by
/// the ranker. A response failing schema validation fails the whole call; no
/// partial results, no retries.
pub async fn suggest(
	cfg: &OracleProviderConfig,
	priority_score_floor: f32,
	request: &MatchRequest,
) -> Result<Vec<Candidate>> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"response_format": { "type": "json_object" },
		"messages": build_messages(priority_score_floor, request),
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_suggestions_response(json)
}

fn build_messages(priority_score_floor: f32, request: &MatchRequest) -> Vec<Value> {
	let system = "You are an assistant that suggests potential collaboration partners to \
		users on a campus platform. Analyze the current user's profile, compare it against \
		all other user profiles in the system, and identify the best potential \
		collaborators. Consider shared interests, complementary skills, and common project \
		goals. Do not suggest the current user to themselves. Respond with a JSON object of \
		the form {\"suggestions\": [{\"userId\": \"user123\", \"name\": \"Alice Smith\", \
		\"commonInterests\": [\"AI\"], \"matchScore\": 0.85}]} where matchScore is a float \
		between 0 and 1.";
	let mut user = String::new();

	if !request.priority_ids.is_empty() {
		user.push_str(&format!(
			"The user is already connected with the following user IDs: {}. Give these \
				users a matchScore of at least {priority_score_floor} to reflect the \
				existing connection, in addition to any other good matches you find.\n\n",
			request.priority_ids.join(", "),
		));
	}

	user.push_str(&format!(
		"Current User Profile:\n{}\n\nAll User Profiles in the system:\n{}\n\nPlease \
			generate {} partner suggestions.",
		request.current_user_profile, request.corpus, request.desired_count,
	));

	vec![
		serde_json::json!({ "role": "system", "content": system }),
		serde_json::json!({ "role": "user", "content": user }),
	]
}

fn parse_suggestions_response(json: Value) -> Result<Vec<Candidate>> {
	if let Some(content) = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
	{
		let payload: SuggestionsPayload = serde_json::from_str(content)
			.map_err(|err| eyre::eyre!("Oracle content failed schema validation: {err}."))?;

		return Ok(payload.suggestions);
	}

	// Some deployments return the object directly instead of wrapping it in
	// a chat completion.
	if json.is_object() {
		let payload: SuggestionsPayload = serde_json::from_value(json)
			.map_err(|err| eyre::eyre!("Oracle response failed schema validation: {err}."))?;

		return Ok(payload.suggestions);
	}

	Err(eyre::eyre!("Oracle response is missing JSON content."))
}
