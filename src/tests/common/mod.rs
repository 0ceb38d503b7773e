// tests/common/mod.rs
pub use serde_json::json;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use httpmock::MockServer;

use crate::client::{FinnotechClient, FinnotechClientBuilder};

pub const MOCK_CLIENT_ID: &str = "mock-app";
pub const MOCK_CLIENT_SECRET: &str = "mock-secret";
pub const MOCK_CLIENT_NID: &str = "3333333333";
pub const MOCK_IBAN: &str = "IR910800005000115426432001";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// `Authorization: Basic ...` value the mock identity endpoints expect.
pub fn mock_basic_header() -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{MOCK_CLIENT_ID}:{MOCK_CLIENT_SECRET}"))
    )
}

/// A three-segment signed-looking token string carrying the given claims.
pub fn raw_token(creation_date: &str, life_time: i64, scopes: &[&str]) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({
            "creationDate": creation_date,
            "lifeTime": life_time,
            "scopes": scopes,
        })
        .to_string(),
    );
    format!("{header}.{payload}.sig")
}

/// Token-issuing envelope as the identity endpoint returns it.
pub fn token_envelope(value: &str, life_time: i64, scopes: &[&str]) -> serde_json::Value {
    json!({
        "result": {
            "value": value,
            "refreshToken": "refresh-1",
            "creationDate": "1399/03/06 12:33:01",
            "lifeTime": life_time,
            "scopes": scopes,
        },
        "status": "DONE",
        "trackId": "token-track",
    })
}

pub fn client_builder(server: &MockServer) -> FinnotechClientBuilder {
    FinnotechClient::builder(MOCK_CLIENT_ID)
        .client_secret(MOCK_CLIENT_SECRET)
        .client_national_id(MOCK_CLIENT_NID)
        .scopes(["oak:iban-inquiry:get"])
        .base_url(server.base_url())
}

pub fn build_client(server: &MockServer) -> FinnotechClient {
    client_builder(server).build().expect("client builds")
}
