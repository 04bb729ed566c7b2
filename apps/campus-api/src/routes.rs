use axum::{
	Json, Router,
	extract::State,
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use campus_service::{
	Error as ServiceError, FindPartnersRequest, FindPartnersResponse, SearchUsersRequest,
	SearchUsersResponse, SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse,
};

use crate::state::AppState;

/// Identity seam: the authenticated user id, resolved upstream by the
/// identity provider, arrives as a header.
const REQUESTER_ID_HEADER: &str = "x-requester-id";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/match/find_partners", post(find_partners))
		.route("/v1/users/search", post(search_users))
		.route("/v1/account/send_otp", post(send_otp))
		.route("/v1/account/verify_otp", post(verify_otp))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindPartnersBody {
	profile_text: String,
	suggestion_count: Option<u32>,
}

async fn find_partners(
	State(state): State<AppState>,
	headers: HeaderMap,
	Json(payload): Json<FindPartnersBody>,
) -> Result<Json<FindPartnersResponse>, ApiError> {
	let requester_id = headers
		.get(REQUESTER_ID_HEADER)
		.and_then(|value| value.to_str().ok())
		.map(str::to_string);
	let response = state
		.service
		.find_partners(FindPartnersRequest {
			requester_id,
			profile_text: payload.profile_text,
			suggestion_count: payload.suggestion_count,
		})
		.await?;

	Ok(Json(response))
}

async fn search_users(
	State(state): State<AppState>,
	Json(payload): Json<SearchUsersRequest>,
) -> Result<Json<SearchUsersResponse>, ApiError> {
	let response = state.service.search_users(payload).await?;

	Ok(Json(response))
}

async fn send_otp(
	State(state): State<AppState>,
	Json(payload): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
	let response = state.service.send_otp(payload).await?;

	Ok(Json(response))
}

async fn verify_otp(
	State(state): State<AppState>,
	Json(payload): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
	let response = state.service.verify_otp(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, error_code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::Oracle { .. } => (StatusCode::BAD_GATEWAY, "oracle_unavailable"),
			ServiceError::Directory { .. } => {
				(StatusCode::BAD_GATEWAY, "directory_unavailable")
			},
			ServiceError::Mailer { .. } => (StatusCode::BAD_GATEWAY, "mailer_unavailable"),
		};

		Self { status, error_code: error_code.to_string(), message: err.to_string() }
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
