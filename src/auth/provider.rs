//! The out-of-band credential exchanges against the identity endpoints.

use http::Method;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::{self, CLIENT_CREDENTIAL_SCOPES, TOKEN_PATH};
use crate::client::FinnotechClient;
use crate::error::{Error, Result};
use crate::token::{ExpiryPolicy, Token, TokenKind, TokenPayload};

/// Perform the client-credentials exchange and build a fresh token.
///
/// Requests only the intersection of the client's configured scopes and the
/// client-credential-eligible set. Any non-200 response or transport
/// failure surfaces as [`Error::Request`]; bad credentials and a dead
/// network are indistinguishable at this layer.
pub(crate) async fn fetch_client_credential(client: &FinnotechClient) -> Result<Token> {
    let nid = client
        .client_national_id()
        .ok_or(Error::Config("client_national_id"))?;
    let scopes = auth::eligible_scopes(client.scopes(), CLIENT_CREDENTIAL_SCOPES);
    info!(scopes = %scopes, "fetching client-credential token");

    let body = json!({
        "grant_type": "client_credentials",
        "nid": nid,
        "scopes": scopes,
    });
    let envelope = client
        .identity_round_trip(Method::POST, TOKEN_PATH, &[], Some(&body))
        .await?;
    token_from_envelope(TokenKind::ClientCredential, &envelope, client.expiry_policy())
}

/// Renew an SMS access token through the refresh-token grant.
pub(crate) async fn refresh_access_token(
    client: &FinnotechClient,
    token: &Token,
) -> Result<Token> {
    let refresh = token.refresh_token().ok_or(Error::Config("refresh_token"))?;
    info!("refreshing sms access token");

    let body = json!({
        "grant_type": "refresh_token",
        "token": refresh,
        "auth_type": "SMS",
    });
    let envelope = client
        .identity_round_trip(Method::POST, TOKEN_PATH, &[], Some(&body))
        .await?;
    token_from_envelope(TokenKind::FacilitySmsAccess, &envelope, client.expiry_policy())
}

/// Build a token from the `result` object of a token-issuing envelope.
///
/// Strict: a missing `result` or missing required payload fields is a
/// decode failure, never a silently defaulted token.
pub(crate) fn token_from_envelope(
    kind: TokenKind,
    envelope: &Value,
    policy: ExpiryPolicy,
) -> Result<Token> {
    let result = envelope
        .get("result")
        .cloned()
        .ok_or_else(|| Error::TokenDecode("token response has no result object".to_owned()))?;
    let payload: TokenPayload = serde_json::from_value(result)
        .map_err(|e| Error::TokenDecode(format!("token payload: {e}")))?;
    Token::from_payload(kind, payload, policy)
}
