//! Google ID-token verification for federated login.
//!
//! [`GoogleTokenVerifier`] asks Google's `tokeninfo` endpoint to decode the
//! token, then checks the audience and issuer locally. Any network failure,
//! non-2xx response, or claim mismatch fails closed.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// Issuer strings Google places in ID tokens.
pub const ACCEPTED_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Default token introspection endpoint.
const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Backoff before each retry of a failed transport attempt.
const RETRY_DELAYS_MS: [u64; 1] = [500];

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Google Sign-In configuration.
#[derive(Clone)]
pub struct GoogleConfig {
    /// OAuth client id; the required `aud` of every accepted token.
    pub client_id: String,
    /// OAuth client secret. Loaded for deployments that share one env file
    /// with the frontend; never serialized.
    pub client_secret: String,
    pub tokeninfo_url: String,
    pub verify_timeout_secs: u64,
    /// Accept the legacy `{google_id, email}` login body without a token.
    pub allow_unverified: bool,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("tokeninfo_url", &self.tokeninfo_url)
            .field("verify_timeout_secs", &self.verify_timeout_secs)
            .field("allow_unverified", &self.allow_unverified)
            .finish()
    }
}

impl GoogleConfig {
    /// Load Google configuration from environment variables.
    ///
    /// | Env Var                      | Default                                   |
    /// |------------------------------|-------------------------------------------|
    /// | `GOOGLE_CLIENT_ID`           | empty (every token is rejected)           |
    /// | `GOOGLE_CLIENT_SECRET`       | empty                                     |
    /// | `GOOGLE_TOKENINFO_URL`       | `https://oauth2.googleapis.com/tokeninfo` |
    /// | `GOOGLE_VERIFY_TIMEOUT_SECS` | `10`                                      |
    /// | `GOOGLE_ALLOW_UNVERIFIED`    | `false`                                   |
    pub fn from_env() -> Self {
        let verify_timeout_secs: u64 = std::env::var("GOOGLE_VERIFY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("GOOGLE_VERIFY_TIMEOUT_SECS must be a valid u64");

        Self {
            client_id: std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
            tokeninfo_url: std::env::var("GOOGLE_TOKENINFO_URL")
                .unwrap_or_else(|_| DEFAULT_TOKENINFO_URL.into()),
            verify_timeout_secs,
            allow_unverified: crate::config::env_flag("GOOGLE_ALLOW_UNVERIFIED", false),
        }
    }
}

// ---------------------------------------------------------------------------
// Claims and errors
// ---------------------------------------------------------------------------

/// Subset of the `tokeninfo` response we rely on. Google returns every
/// value as a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleClaims {
    pub sub: Option<String>,
    pub aud: Option<String>,
    pub iss: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// A verified Google identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    /// Google's stable subject id for the account.
    pub google_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Reasons an ID token was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    /// The HTTP request failed (network, DNS, timeout, bad JSON).
    #[error("Token introspection request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Google rejected the token.
    #[error("Token introspection returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Token audience does not match the configured client id")]
    AudienceMismatch,

    #[error("Untrusted token issuer: {0}")]
    UntrustedIssuer(String),

    #[error("Token has no subject")]
    MissingSubject,
}

/// Check audience, issuer, and subject of decoded claims.
///
/// An empty `client_id` matches nothing.
pub fn check_claims(claims: GoogleClaims, client_id: &str) -> Result<GoogleIdentity, AssertionError> {
    match claims.aud.as_deref() {
        Some(aud) if !client_id.is_empty() && aud == client_id => {}
        _ => return Err(AssertionError::AudienceMismatch),
    }

    let iss = claims.iss.unwrap_or_default();
    if !ACCEPTED_ISSUERS.contains(&iss.as_str()) {
        return Err(AssertionError::UntrustedIssuer(iss));
    }

    let google_id = claims
        .sub
        .filter(|s| !s.is_empty())
        .ok_or(AssertionError::MissingSubject)?;

    Ok(GoogleIdentity {
        google_id,
        email: claims.email.filter(|e| !e.is_empty()),
        name: claims.name.filter(|n| !n.is_empty()),
    })
}

// ---------------------------------------------------------------------------
// Verifier
// ---------------------------------------------------------------------------

/// Turns a Google ID token into a verified identity.
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, AssertionError>;
}

/// [`IdTokenVerifier`] backed by Google's `tokeninfo` endpoint.
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    tokeninfo_url: String,
    client_id: String,
}

impl GoogleTokenVerifier {
    /// Build a verifier with a bounded per-request timeout.
    pub fn new(config: &GoogleConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.verify_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            tokeninfo_url: config.tokeninfo_url.clone(),
            client_id: config.client_id.clone(),
        })
    }

    /// Single `GET tokeninfo?id_token=...` round trip.
    async fn fetch_claims(&self, id_token: &str) -> Result<GoogleClaims, AssertionError> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AssertionError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json::<GoogleClaims>().await?)
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenVerifier {
    /// Transport errors are retried after a short backoff; a response from
    /// Google (any status) is final.
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, AssertionError> {
        let mut attempt = 0;
        let claims = loop {
            match self.fetch_claims(id_token).await {
                Err(AssertionError::Request(e)) if attempt < RETRY_DELAYS_MS.len() => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        error = %e,
                        "Google token introspection failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAYS_MS[attempt])).await;
                    attempt += 1;
                }
                other => break other?,
            }
        };

        check_claims(claims, &self.client_id)
    }
}
