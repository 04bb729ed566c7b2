use serde::{Deserialize, Serialize};
use time::Duration;

use campus_domain::otp;

use crate::{CampusService, Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendOtpRequest {
	pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SendOtpResponse {
	pub sent: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
	pub email: String,
	pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
	pub verified: bool,
}

impl CampusService {
	pub async fn send_otp(&self, req: SendOtpRequest) -> Result<SendOtpResponse> {
		let email = req.email.trim();

		if email.is_empty() || !email.contains('@') {
			return Err(Error::InvalidRequest {
				message: "A valid email address is required.".to_string(),
			});
		}

		let validity = Duration::minutes(self.cfg.verification.otp_validity_minutes);
		let code = otp::issue(self.otp_store.as_ref(), self.clock.as_ref(), validity, email);

		self.providers
			.mailer
			.deliver(email, &code)
			.await
			.map_err(|err| Error::Mailer { message: err.to_string() })?;

		Ok(SendOtpResponse { sent: true })
	}

	pub async fn verify_otp(&self, req: VerifyOtpRequest) -> Result<VerifyOtpResponse> {
		let email = req.email.trim();
		let code = req.code.trim();

		if email.is_empty() || code.is_empty() {
			return Err(Error::InvalidRequest {
				message: "Email and code are required.".to_string(),
			});
		}

		let verified = otp::verify(self.otp_store.as_ref(), self.clock.as_ref(), email, code);

		Ok(VerifyOtpResponse { verified })
	}
}
