use std::{collections::HashMap, sync::Mutex};

use time::{Duration, OffsetDateTime};

/// Time source for expiry checks. Injected so verification rules can be
/// tested without waiting on wall-clock time.
pub trait Clock
where
	Self: Send + Sync,
{
	fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpEntry {
	pub code: String,
	pub expires_at: OffsetDateTime,
}

/// Storage for outstanding codes, keyed by email. Injected rather than kept
/// in a process-wide map so each service instance owns its own state.
pub trait OtpStore
where
	Self: Send + Sync,
{
	fn put(&self, email: &str, entry: OtpEntry);
	fn get(&self, email: &str) -> Option<OtpEntry>;
	fn remove(&self, email: &str);
}

#[derive(Debug, Default)]
pub struct MemoryOtpStore {
	entries: Mutex<HashMap<String, OtpEntry>>,
}
impl MemoryOtpStore {
	pub fn new() -> Self {
		Self::default()
	}
}
impl OtpStore for MemoryOtpStore {
	fn put(&self, email: &str, entry: OtpEntry) {
		let mut entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		entries.insert(email.to_string(), entry);
	}

	fn get(&self, email: &str) -> Option<OtpEntry> {
		let entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		entries.get(email).cloned()
	}

	fn remove(&self, email: &str) {
		let mut entries = self.entries.lock().unwrap_or_else(|err| err.into_inner());

		entries.remove(email);
	}
}

/// Draws a six-digit code from v4 uuid entropy.
pub fn issue_code() -> String {
	let bytes = *uuid::Uuid::new_v4().as_bytes();
	let seed = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

	format!("{}", 100_000 + seed % 900_000)
}

/// Stores a fresh code for `email`, replacing any outstanding one, and
/// returns it for delivery.
pub fn issue(
	store: &dyn OtpStore,
	clock: &dyn Clock,
	validity: Duration,
	email: &str,
) -> String {
	let code = issue_code();

	store.put(email, OtpEntry { code: code.clone(), expires_at: clock.now() + validity });

	code
}

/// Checks a submitted code. Codes are single-use: a match removes the entry.
/// An expired entry is removed and fails. A mismatch leaves the entry in
/// place so the user may retry until expiry.
pub fn verify(store: &dyn OtpStore, clock: &dyn Clock, email: &str, code: &str) -> bool {
	let Some(entry) = store.get(email) else {
		return false;
	};

	if clock.now() > entry.expires_at {
		store.remove(email);

		return false;
	}
	if entry.code == code {
		store.remove(email);

		return true;
	}

	false
}

#[cfg(test)]
mod tests {
	use super::*;

	struct ManualClock {
		now: OffsetDateTime,
	}
	impl Clock for ManualClock {
		fn now(&self) -> OffsetDateTime {
			self.now
		}
	}

	fn epoch() -> OffsetDateTime {
		OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("valid timestamp")
	}

	#[test]
	fn issued_codes_are_six_digits() {
		for _ in 0..32 {
			let code = issue_code();

			assert_eq!(code.len(), 6);
			assert!(code.parse::<u32>().is_ok());
		}
	}

	#[test]
	fn matching_code_verifies_once() {
		let store = MemoryOtpStore::new();
		let clock = ManualClock { now: epoch() };
		let code = issue(&store, &clock, Duration::minutes(15), "a@campus.edu");

		assert!(verify(&store, &clock, "a@campus.edu", &code));
		assert!(!verify(&store, &clock, "a@campus.edu", &code));
	}

	#[test]
	fn expired_code_fails_and_is_removed() {
		let store = MemoryOtpStore::new();
		let issue_clock = ManualClock { now: epoch() };
		let code = issue(&store, &issue_clock, Duration::minutes(15), "a@campus.edu");
		let late_clock = ManualClock { now: epoch() + Duration::minutes(16) };

		assert!(!verify(&store, &late_clock, "a@campus.edu", &code));
		assert!(store.get("a@campus.edu").is_none());
	}

	#[test]
	fn mismatched_code_keeps_entry_for_retry() {
		let store = MemoryOtpStore::new();
		let clock = ManualClock { now: epoch() };
		let code = issue(&store, &clock, Duration::minutes(15), "a@campus.edu");

		assert!(!verify(&store, &clock, "a@campus.edu", "000000"));
		assert!(verify(&store, &clock, "a@campus.edu", &code));
	}

	#[test]
	fn unknown_email_fails_quietly() {
		let store = MemoryOtpStore::new();
		let clock = ManualClock { now: epoch() };

		assert!(!verify(&store, &clock, "nobody@campus.edu", "123456"));
	}

	#[test]
	fn reissue_replaces_outstanding_code() {
		let store = MemoryOtpStore::new();
		let clock = ManualClock { now: epoch() };
		let first = issue(&store, &clock, Duration::minutes(15), "a@campus.edu");
		let second = issue(&store, &clock, Duration::minutes(15), "a@campus.edu");

		if first != second {
			assert!(!verify(&store, &clock, "a@campus.edu", &first));
		}
		assert!(verify(&store, &clock, "a@campus.edu", &second));
	}
}
