use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::json;
use tempfile::TempDir;

fn hotelcmp_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_hotelcmp"))
}

/// Address nothing listens on.
fn dead_backend() -> String {
	let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
	let addr = listener.local_addr().expect("probe address");
	drop(listener);
	format!("http://{addr}")
}

fn run_hotelcmp(credentials: &Path, args: &[&str]) -> (bool, serde_json::Value, String) {
	let base_url = dead_backend();
	let output = Command::new(hotelcmp_binary())
		.env_remove("HOTELCMP_BASE_URL")
		.env_remove("HOTELCMP_TIMEOUT_SECS")
		.env_remove("HOTELCMP_PASSWORD")
		.env_remove("RUST_LOG")
		.env("HOTELCMP_CREDENTIALS", credentials)
		.args(["-f", "json", "--base-url", base_url.as_str(), "--timeout-secs", "5"])
		.args(args)
		.output()
		.expect("failed to execute hotelcmp");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	let parsed = serde_json::from_str::<serde_json::Value>(&stdout).unwrap_or_else(|_| json!({ "raw": stdout }));
	(output.status.success(), parsed, stderr)
}

fn write_credentials(path: &Path) {
	std::fs::write(path, r#"{"access_token":"stored-access","refresh_token":"stored-refresh"}"#)
		.expect("credentials should be written");
}

#[test]
fn logout_without_session_succeeds() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");

	let (success, json, stderr) = run_hotelcmp(&credentials, &["logout"]);

	assert!(success, "logout failed: {stderr}");
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "logout");
	assert_eq!(json["data"]["loggedOut"], true);
	assert!(json["durationMs"].is_u64());
}

#[test]
fn logout_erases_stored_credential() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");
	write_credentials(&credentials);

	let (success, _, stderr) = run_hotelcmp(&credentials, &["logout"]);

	assert!(success, "logout failed: {stderr}");
	assert!(!credentials.exists());
}

#[test]
fn whoami_without_credentials_is_anonymous() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");

	let (success, json, stderr) = run_hotelcmp(&credentials, &["whoami"]);

	assert!(success, "whoami failed: {stderr}");
	assert_eq!(json["data"]["authenticated"], false);
}

#[test]
fn whoami_clears_credential_it_cannot_verify() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");
	write_credentials(&credentials);

	let (success, json, stderr) = run_hotelcmp(&credentials, &["whoami"]);

	assert!(success, "whoami failed: {stderr}");
	assert_eq!(json["data"]["authenticated"], false);
	assert!(!credentials.exists());
}

#[test]
fn inverted_price_range_is_rejected_before_login_check() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");

	let (success, json, _) = run_hotelcmp(
		&credentials,
		&["search", "--city", "Dhaka", "--min-price", "5000", "--max-price", "1000"],
	);

	assert!(!success);
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "search");
	assert_eq!(json["error"]["code"], "INVALID_CRITERIA");
	assert!(json.get("data").is_none());
}

#[test]
fn search_without_session_is_unauthenticated() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");

	let (success, json, _) = run_hotelcmp(
		&credentials,
		&["search", "--city", "Dhaka", "--min-price", "1000", "--max-price", "5000"],
	);

	assert!(!success);
	assert_eq!(json["error"]["code"], "UNAUTHENTICATED");
}

#[test]
fn bookmark_position_zero_is_invalid_input() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");

	let (success, json, _) = run_hotelcmp(
		&credentials,
		&["search", "--city", "Dhaka", "--min-price", "1", "--max-price", "2", "--bookmark", "0"],
	);

	assert!(!success);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
}

#[test]
fn login_against_unreachable_backend_is_network_error() {
	let tmp = TempDir::new().expect("temp dir should be created");
	let credentials = tmp.path().join("credentials.json");

	let (success, json, _) = run_hotelcmp(&credentials, &["login", "--email", "t@example.com", "--password", "pw"]);

	assert!(!success);
	assert_eq!(json["error"]["code"], "NETWORK_ERROR");
	assert!(!credentials.exists());
}
