//! Credential acquisition: scope tables, the client-credentials exchange,
//! and the SMS authorization flow.

pub mod provider;
pub mod sms;

pub(crate) const TOKEN_PATH: &str = "/dev/v2/oauth2/token";
pub(crate) const AUTHORIZE_PATH: &str = "/dev/v2/oauth2/authorize";
pub(crate) const VERIFY_SMS_PATH: &str = "/dev/v2/oauth2/verify/sms";

/// Scopes grantable through the client-credentials exchange.
pub const CLIENT_CREDENTIAL_SCOPES: &[&str] = &[
    "oak:iban-inquiry:get",
    "card:information:get",
    "facility:card-to-iban:get",
    "credit:cc-standard-reliability:get",
];

/// Scopes grantable through the SMS authorization flow.
pub const AUTHORIZATION_TOKEN_SCOPES: &[&str] = &["facility:sms-nid-verification:get"];

/// Comma-join the configured scopes that are eligible for a grant family,
/// preserving configured order.
pub(crate) fn eligible_scopes(configured: &[String], eligible: &[&str]) -> String {
    configured
        .iter()
        .filter(|scope| eligible.contains(&scope.as_str()))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn default_scopes() -> Vec<String> {
    CLIENT_CREDENTIAL_SCOPES
        .iter()
        .chain(AUTHORIZATION_TOKEN_SCOPES)
        .map(|scope| (*scope).to_owned())
        .collect()
}
