//! SMS-based user authorization.
//!
//! Three sequential exchanges (request an OTP text, verify it, then trade
//! the resulting authorization code for an access token), each gated on
//! possession of the previous step's output. There is no automatic retry
//! of a partial flow; a failed step drops its state and the caller starts
//! over from [`FinnotechClient::request_sms`].

use http::Method;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::{provider, AUTHORIZE_PATH, TOKEN_PATH, VERIFY_SMS_PATH};
use crate::client::{FinnotechClient, RequestAuth, Tracking};
use crate::error::{Error, Result};
use crate::token::{Token, TokenKind};
use crate::validate;

/// Proof that an OTP text was requested; input to
/// [`FinnotechClient::verify_sms`].
#[derive(Debug, Clone)]
pub struct SmsChallenge {
    track_id: String,
    phone: String,
    redirect_uri: String,
}

impl SmsChallenge {
    /// The correlation id the identity provider tracks this flow under.
    pub fn track_id(&self) -> &str {
        &self.track_id
    }
}

/// A verified authorization code; input to
/// [`FinnotechClient::request_sms_token`].
#[derive(Debug, Clone)]
pub struct SmsGrant {
    code: String,
    track_id: String,
    redirect_uri: String,
}

impl SmsGrant {
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl FinnotechClient {
    /// Ask the identity provider to text an OTP to `phone`.
    pub async fn request_sms(
        &self,
        phone: &str,
        redirect_uri: &str,
        scopes: &[&str],
    ) -> Result<SmsChallenge> {
        validate::phone(phone)?;
        let track_id = self.generate_track_id();
        let scope = scopes.join(",");
        info!(track_id = %track_id, "requesting sms otp");

        let query = [
            ("client_id", self.client_id()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("scope", scope.as_str()),
            ("mobile", phone),
            ("auth_type", "SMS"),
            ("trackId", track_id.as_str()),
        ];
        self.execute(
            Method::GET,
            AUTHORIZE_PATH,
            &query,
            None,
            RequestAuth::Basic,
            Tracking::ProviderManaged,
        )
        .await?;

        Ok(SmsChallenge {
            track_id,
            phone: phone.to_owned(),
            redirect_uri: redirect_uri.to_owned(),
        })
    }

    /// Submit the OTP the user received, yielding an authorization code.
    pub async fn verify_sms(
        &self,
        challenge: &SmsChallenge,
        national_id: &str,
        otp: &str,
    ) -> Result<SmsGrant> {
        validate::national_id(national_id)?;
        validate::otp(otp)?;
        info!(track_id = %challenge.track_id, "verifying sms otp");

        let body = json!({
            "mobile": challenge.phone,
            "otp": otp,
            "nid": national_id,
            "trackId": challenge.track_id,
        });
        let envelope = self
            .execute(
                Method::POST,
                VERIFY_SMS_PATH,
                &[],
                Some(&body),
                RequestAuth::Basic,
                Tracking::ProviderManaged,
            )
            .await?;

        let code = envelope
            .get("result")
            .and_then(|result| result.get("code"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Request {
                message: "verification response has no code".to_owned(),
                track_id: Some(challenge.track_id.clone()),
            })?
            .to_owned();

        Ok(SmsGrant {
            code,
            track_id: challenge.track_id.clone(),
            redirect_uri: challenge.redirect_uri.clone(),
        })
    }

    /// Exchange a verified authorization code for an access token.
    pub async fn request_sms_token(&self, grant: SmsGrant) -> Result<Token> {
        info!(track_id = %grant.track_id, "exchanging sms authorization code");

        let body = json!({
            "grant_type": "authorization_code",
            "code": grant.code,
            "redirect_uri": grant.redirect_uri,
            "auth_type": "SMS",
        });
        let envelope = self
            .execute(
                Method::POST,
                TOKEN_PATH,
                &[],
                Some(&body),
                RequestAuth::Basic,
                Tracking::ProviderManaged,
            )
            .await?;
        provider::token_from_envelope(
            TokenKind::FacilitySmsAccess,
            &envelope,
            self.expiry_policy(),
        )
    }
}
