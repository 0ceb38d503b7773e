//! The API client and its authenticated request executor.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use http::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::auth::{self, provider};
use crate::error::{Error, Result};
use crate::token::cache::TokenCache;
use crate::token::{ExpiryPolicy, Token, TokenKind};

pub const URL_MAINNET: &str = "https://apibeta.finnotech.ir";
pub const URL_SANDBOX: &str = "https://sandboxapi.finnotech.ir";

/// Credential attached to one request.
#[derive(Debug)]
pub(crate) enum RequestAuth<'a> {
    /// `Authorization: Basic <client_id:client_secret>`, for the identity
    /// endpoints.
    Basic,
    /// The cache-managed client-credential token; fetched lazily and
    /// refreshed on 403.
    ClientCredential,
    /// A caller-supplied SMS access token; refreshed on 403 when it
    /// carries a refresh token.
    Access(&'a Token),
}

/// Whether the executor attaches its own `trackId` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tracking {
    /// Generate a fresh unique id and send it as `trackId`.
    Auto,
    /// The identity provider manages its own tracking; send nothing.
    ProviderManaged,
}

/// Client for the Finnotech REST API.
///
/// One instance owns one credential cache.
#[derive(Debug)]
pub struct FinnotechClient {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: Option<String>,
    client_national_id: Option<String>,
    scopes: Vec<String>,
    expiry_policy: ExpiryPolicy,
    credential_cache: TokenCache,
}

impl FinnotechClient {
    pub fn builder(client_id: impl Into<String>) -> FinnotechClientBuilder {
        FinnotechClientBuilder::new(client_id)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_national_id(&self) -> Option<&str> {
        self.client_national_id.as_deref()
    }

    pub(crate) fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub(crate) fn expiry_policy(&self) -> ExpiryPolicy {
        self.expiry_policy
    }

    /// The current usable client-credential token, fetching one first if
    /// none is cached or the cached one is no longer valid.
    pub async fn client_credential(&self) -> Result<Token> {
        self.credential_cache
            .get_or_fetch(|| provider::fetch_client_credential(self))
            .await
    }

    pub(crate) fn generate_track_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Send one logical operation as one-or-two physical requests.
    ///
    /// A 403 on the first attempt triggers a single credential refresh and
    /// one resend of the identical request; a second 403 (or any other
    /// non-200) is terminal. Transport and JSON failures normalize into
    /// [`Error::Request`] with the cause's message preserved.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        auth: RequestAuth<'_>,
        tracking: Tracking,
    ) -> Result<Value> {
        let track_id = match tracking {
            Tracking::Auto => Some(self.generate_track_id()),
            Tracking::ProviderManaged => None,
        };
        let track = track_id.as_deref();

        let (headers, used_token) = self.auth_headers(&auth).await?;
        let response = self
            .send_once(&method, path, query, &headers, body, track)
            .await?;

        if response.status() == StatusCode::FORBIDDEN {
            if let Some(refreshed) = self.refresh_credential(&auth, used_token.as_ref()).await? {
                info!(track_id = ?track, "retrying with refreshed credential after 403");
                let headers = refreshed.authorization_header()?;
                let retried = self
                    .send_once(&method, path, query, &headers, body, track)
                    .await?;
                return self.into_envelope(retried, track).await;
            }
        }
        self.into_envelope(response, track).await
    }

    /// Resolve the request credential into headers, remembering which
    /// token was presented so the 403 path can tell whether a concurrent
    /// caller already replaced it.
    async fn auth_headers(
        &self,
        auth: &RequestAuth<'_>,
    ) -> Result<(HeaderMap, Option<Token>)> {
        match auth {
            RequestAuth::Basic => Ok((self.basic_authorization()?, None)),
            RequestAuth::ClientCredential => {
                let token = self.client_credential().await?;
                Ok((token.authorization_header()?, Some(token)))
            }
            RequestAuth::Access(token) => Ok((token.authorization_header()?, None)),
        }
    }

    async fn refresh_credential(
        &self,
        auth: &RequestAuth<'_>,
        used: Option<&Token>,
    ) -> Result<Option<Token>> {
        match auth {
            RequestAuth::ClientCredential => {
                info!("refreshing client-credential token after 403");
                let token = self
                    .credential_cache
                    .force_refresh(used, || provider::fetch_client_credential(self))
                    .await?;
                Ok(Some(token))
            }
            RequestAuth::Access(token) if token.refresh_token().is_some() => {
                let refreshed = provider::refresh_access_token(self, token).await?;
                Ok(Some(refreshed))
            }
            _ => Ok(None),
        }
    }

    /// One Basic-authenticated exchange against an identity endpoint.
    ///
    /// Identity calls manage their own tracking and are never
    /// refresh-retried: a 403 here means the client credentials themselves
    /// are wrong, and a fresh token cannot fix that.
    pub(crate) async fn identity_round_trip(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let headers = self.basic_authorization()?;
        let response = self
            .send_once(&method, path, query, &headers, body, None)
            .await?;
        self.into_envelope(response, None).await
    }

    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        query: &[(&str, &str)],
        headers: &HeaderMap,
        body: Option<&Value>,
        track_id: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), url)
            .headers(headers.clone())
            .query(query);
        if let Some(track_id) = track_id {
            request = request.query(&[("trackId", track_id)]);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(path, track_id = ?track_id, query = ?query, "dispatching api request");
        request.send().await.map_err(|e| {
            error!(path, track_id = ?track_id, error = %e, "transport failure");
            Error::Request {
                message: e.to_string(),
                track_id: track_id.map(str::to_owned),
            }
        })
    }

    /// Terminal response handling: non-200 fails with the raw body, 200
    /// yields the parsed JSON envelope.
    async fn into_envelope(
        &self,
        response: reqwest::Response,
        track_id: Option<&str>,
    ) -> Result<Value> {
        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                format!("http status {status}")
            } else {
                body
            };
            error!(%status, track_id = ?track_id, message = %message, "api request failed");
            return Err(Error::Request {
                message,
                track_id: track_id.map(str::to_owned),
            });
        }
        response.json::<Value>().await.map_err(|e| {
            error!(track_id = ?track_id, error = %e, "response body is not valid json");
            Error::Request {
                message: e.to_string(),
                track_id: track_id.map(str::to_owned),
            }
        })
    }

    fn basic_authorization(&self) -> Result<HeaderMap> {
        let secret = self
            .client_secret
            .as_deref()
            .ok_or(Error::Config("client_secret"))?;
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, secret));
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Basic {encoded}"))
            .expect("base64 output is header-safe");
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Builder for [`FinnotechClient`].
pub struct FinnotechClientBuilder {
    client_id: String,
    client_secret: Option<String>,
    client_national_id: Option<String>,
    scopes: Option<Vec<String>>,
    base_url: Option<String>,
    sandbox: bool,
    expiry_policy: ExpiryPolicy,
    http: Option<reqwest::Client>,
    seeded_token: Option<(String, Option<String>)>,
}

impl FinnotechClientBuilder {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            client_national_id: None,
            scopes: None,
            base_url: None,
            sandbox: false,
            expiry_policy: ExpiryPolicy::default(),
            http: None,
            seeded_token: None,
        }
    }

    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    pub fn client_national_id(mut self, national_id: impl Into<String>) -> Self {
        self.client_national_id = Some(national_id.into());
        self
    }

    /// Requested scopes. Defaults to every scope the client understands.
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    /// Target the sandbox origin instead of mainnet.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Explicit base origin; overrides the sandbox flag.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry_policy = policy;
        self
    }

    /// Inject a pre-configured transport (timeouts, proxies, TLS options).
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Seed the credential cache with a previously obtained token string.
    pub fn client_credential_token(
        mut self,
        raw: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Self {
        self.seeded_token = Some((raw.into(), refresh_token));
        self
    }

    pub fn build(self) -> Result<FinnotechClient> {
        let base_url = match self.base_url {
            Some(url) => url.trim_end_matches('/').to_owned(),
            None if self.sandbox => URL_SANDBOX.to_owned(),
            None => URL_MAINNET.to_owned(),
        };
        let credential_cache = match self.seeded_token {
            Some((raw, refresh_token)) => TokenCache::seeded(Token::load(
                TokenKind::ClientCredential,
                &raw,
                refresh_token,
                self.expiry_policy,
            )?),
            None => TokenCache::new(),
        };
        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .build()
                .expect("Failed to build HTTP client"),
        };

        Ok(FinnotechClient {
            http,
            base_url,
            client_id: self.client_id,
            client_secret: self.client_secret,
            client_national_id: self.client_national_id,
            scopes: self.scopes.unwrap_or_else(auth::default_scopes),
            expiry_policy: self.expiry_policy,
            credential_cache,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_mainnet() {
        let client = FinnotechClient::builder("app").build().unwrap();
        assert_eq!(client.base_url, URL_MAINNET);
        assert!(!client.scopes.is_empty());
    }

    #[test]
    fn sandbox_flag_and_base_url_override() {
        let client = FinnotechClient::builder("app").sandbox(true).build().unwrap();
        assert_eq!(client.base_url, URL_SANDBOX);

        let client = FinnotechClient::builder("app")
            .sandbox(true)
            .base_url("http://localhost:9999/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn seeding_with_garbage_token_fails_to_build() {
        let err = FinnotechClient::builder("app")
            .client_credential_token("not-a-token", None)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::TokenDecode(_)));
    }

    #[test]
    fn basic_authorization_needs_a_secret() {
        let client = FinnotechClient::builder("app").build().unwrap();
        assert!(matches!(
            client.basic_authorization().unwrap_err(),
            Error::Config("client_secret")
        ));

        let client = FinnotechClient::builder("app")
            .client_secret("s3cret")
            .build()
            .unwrap();
        let headers = client.basic_authorization().unwrap();
        let value = headers.get(AUTHORIZATION).unwrap().to_str().unwrap();
        assert_eq!(value, format!("Basic {}", STANDARD.encode("app:s3cret")));
    }
}
