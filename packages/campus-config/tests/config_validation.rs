use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use campus_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn set_path(value: &mut Value, path: &[&str], new: Value) {
	let mut cursor = value;

	for key in &path[..path.len() - 1] {
		cursor = cursor
			.as_table_mut()
			.and_then(|table| table.get_mut(*key))
			.expect("Sample config is missing a table.");
	}

	cursor
		.as_table_mut()
		.expect("Sample config leaf parent must be a table.")
		.insert(path[path.len() - 1].to_string(), new);
}

fn write_temp_config(contents: &str) -> PathBuf {
	let stamp = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("Clock before epoch.")
		.as_nanos();
	let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
	let path = env::temp_dir().join(format!("campus_config_{stamp}_{unique}.toml"));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn load_from(value: &Value) -> Result<Config, Error> {
	let rendered = toml::to_string(value).expect("Failed to render config.");
	let path = write_temp_config(&rendered);
	let result = campus_config::load(&path);

	fs::remove_file(&path).ok();

	result
}

#[test]
fn loads_sample_config() {
	let cfg = load_from(&sample_value()).expect("Sample config must load.");

	assert_eq!(cfg.service.http_bind, "127.0.0.1:8080");
	assert_eq!(cfg.matching.default_suggestions, 5);
	assert_eq!(cfg.matching.feed_suggestions, 6);
	assert_eq!(cfg.verification.otp_validity_minutes, 15);
}

#[test]
fn normalizes_trailing_slash_on_api_bases() {
	let cfg = load_from(&sample_value()).expect("Sample config must load.");

	assert_eq!(cfg.directory.api_base, "http://127.0.0.1:9090");
}

#[test]
fn defaults_matching_and_verification_sections() {
	let mut value = sample_value();
	let table = value.as_table_mut().expect("Sample config must be a table.");

	table.remove("matching");
	table.remove("verification");

	let cfg = load_from(&value).expect("Config without optional sections must load.");

	assert_eq!(cfg.matching.default_suggestions, 5);
	assert_eq!(cfg.matching.feed_suggestions, 6);
	assert!((cfg.matching.priority_score_floor - 0.9).abs() < f32::EPSILON);
	assert_eq!(cfg.verification.otp_validity_minutes, 15);
}

#[test]
fn rejects_zero_suggestion_counts() {
	let mut value = sample_value();

	set_path(&mut value, &["matching", "default_suggestions"], Value::Integer(0));

	let err = load_from(&value).expect_err("Zero default_suggestions must fail.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_priority_floor_outside_unit_range() {
	let mut value = sample_value();

	set_path(&mut value, &["matching", "priority_score_floor"], Value::Float(1.5));

	let err = load_from(&value).expect_err("Out-of-range priority floor must fail.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_zero_oracle_timeout() {
	let mut value = sample_value();

	set_path(&mut value, &["providers", "oracle", "timeout_ms"], Value::Integer(0));

	let err = load_from(&value).expect_err("Zero oracle timeout must fail.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_empty_http_bind() {
	let mut value = sample_value();

	set_path(&mut value, &["service", "http_bind"], Value::String("  ".to_string()));

	let err = load_from(&value).expect_err("Blank http_bind must fail.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_nonpositive_otp_validity() {
	let mut value = sample_value();

	set_path(&mut value, &["verification", "otp_validity_minutes"], Value::Integer(0));

	let err = load_from(&value).expect_err("Zero OTP validity must fail.");

	assert!(matches!(err, Error::Validation { .. }));
}
