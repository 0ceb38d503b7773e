//! Token data model: decoding, validity policies, and header presentation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::Deserialize;

use crate::error::{Error, Result};

pub mod cache;

/// Header name older credit endpoints expect instead of `Authorization`.
pub const LEGACY_CREDENTIAL_HEADER: &str = "CLIENT-CREDENTIAL";

/// Grant family a token was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Machine-to-machine credential from the client-credentials exchange.
    ClientCredential,
    /// User-authorized credential from the SMS flow.
    FacilitySmsAccess,
}

impl TokenKind {
    /// How tokens of this kind are presented on the wire.
    pub fn header_scheme(self) -> HeaderScheme {
        match self {
            TokenKind::ClientCredential | TokenKind::FacilitySmsAccess => HeaderScheme::Bearer,
        }
    }
}

/// Per-kind presentation of a credential as HTTP header(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderScheme {
    /// `Authorization: Bearer <value>`
    Bearer,
    /// A bare token value under a provider-specific header name, e.g.
    /// [`LEGACY_CREDENTIAL_HEADER`].
    Custom(&'static str),
}

/// Policy answering "may this token still be used?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
    /// A token is usable until its issuance instant plus `life_time` has
    /// passed. This is the default.
    #[default]
    Expiring,
    /// A token is usable forever once issued. Compatibility mode for
    /// deployments that never exercised real expiry; prefer [`Expiring`].
    ///
    /// [`Expiring`]: ExpiryPolicy::Expiring
    AssumeValid,
}

/// An access credential plus the metadata the provider issued with it.
///
/// Immutable once constructed; refreshing produces a brand-new `Token` and
/// the cache swaps its held reference.
#[derive(Debug, Clone)]
pub struct Token {
    kind: TokenKind,
    value: String,
    refresh_token: Option<String>,
    creation_date: String,
    life_time: i64,
    scopes: Vec<String>,
    issued_at_ms: i64,
    policy: ExpiryPolicy,
}

/// The `result` object of a token-issuing response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPayload {
    pub value: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub creation_date: String,
    pub life_time: i64,
    pub scopes: Vec<String>,
}

/// Metadata carried in the middle segment of a signed token string.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    creation_date: String,
    life_time: i64,
    scopes: Vec<String>,
}

impl Token {
    pub(crate) fn from_payload(
        kind: TokenKind,
        payload: TokenPayload,
        policy: ExpiryPolicy,
    ) -> Result<Self> {
        if payload.value.is_empty() {
            return Err(Error::TokenDecode("empty token value".to_owned()));
        }
        Ok(Self {
            kind,
            value: payload.value,
            refresh_token: payload.refresh_token,
            creation_date: payload.creation_date,
            life_time: payload.life_time,
            scopes: payload.scopes,
            issued_at_ms: Utc::now().timestamp_millis(),
            policy,
        })
    }

    /// Reconstruct a token from a previously issued opaque token string.
    ///
    /// Decodes the middle segment of the three-part dot-separated string
    /// (base64url JSON, padding tolerated) and takes the raw string itself
    /// as the credential value. This is metadata extraction only; no
    /// signature verification happens here.
    ///
    /// The issuance instant is unknowable from the string alone, so the
    /// load time is recorded instead; a loaded token under
    /// [`ExpiryPolicy::Expiring`] is usable for `life_time` from now.
    pub fn load(
        kind: TokenKind,
        raw: &str,
        refresh_token: Option<String>,
        policy: ExpiryPolicy,
    ) -> Result<Self> {
        let segments: Vec<&str> = raw.split('.').collect();
        if segments.len() != 3 {
            return Err(Error::TokenDecode(format!(
                "expected three dot-separated segments, found {}",
                segments.len()
            )));
        }
        let payload = segments[1].trim_end_matches('=');
        let decoded = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| Error::TokenDecode(format!("payload segment: {e}")))?;
        let claims: TokenClaims = serde_json::from_slice(&decoded)
            .map_err(|e| Error::TokenDecode(format!("payload claims: {e}")))?;

        Ok(Self {
            kind,
            value: raw.to_owned(),
            refresh_token,
            creation_date: claims.creation_date,
            life_time: claims.life_time,
            scopes: claims.scopes,
            issued_at_ms: Utc::now().timestamp_millis(),
            policy,
        })
    }

    /// Whether the token may still be presented, per its [`ExpiryPolicy`].
    ///
    /// Depends only on the token's own fields and the wall clock.
    pub fn is_valid(&self) -> bool {
        match self.policy {
            ExpiryPolicy::AssumeValid => true,
            ExpiryPolicy::Expiring => {
                Utc::now().timestamp_millis() < self.issued_at_ms + self.life_time
            }
        }
    }

    /// The header(s) presenting this credential, per its kind's scheme.
    pub fn authorization_header(&self) -> Result<HeaderMap> {
        scheme_headers(self.kind.header_scheme(), &self.value)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The opaque bearer string. Non-empty by construction.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Issuance timestamp exactly as the provider reported it. Free-form;
    /// not necessarily a parseable date.
    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    /// Validity duration in provider units (milliseconds).
    pub fn life_time(&self) -> i64 {
        self.life_time
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }
}

pub(crate) fn scheme_headers(scheme: HeaderScheme, value: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    match scheme {
        HeaderScheme::Bearer => {
            let header = HeaderValue::from_str(&format!("Bearer {value}"))
                .map_err(|e| Error::TokenDecode(format!("token value not header-safe: {e}")))?;
            headers.insert(AUTHORIZATION, header);
        }
        HeaderScheme::Custom(name) => {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::TokenDecode(format!("bad credential header name: {e}")))?;
            let header = HeaderValue::from_str(value)
                .map_err(|e| Error::TokenDecode(format!("token value not header-safe: {e}")))?;
            headers.insert(name, header);
        }
    }
    Ok(headers)
}
