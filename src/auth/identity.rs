//! External identity provider: authorization URL, id-token decoding, and the
//! authorization-code exchange.
//!
//! DESIGN
//! ======
//! The consent redirect itself is out of process. We build the outbound URL,
//! and when the provider redirects back with a `code` we hand it to an
//! [`IdentityProvider`] which returns a profile. The trait exists so tests and
//! alternate providers can stand in for the Google implementation.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::config::OAuthConfig;
use crate::types::IdentityProfile;

pub const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/userinfo.email",
];

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("malformed id token: {0}")]
    Decode(String),
    #[error("token exchange failed: {0}")]
    TokenExchange(String),
    #[error("userinfo request failed: {0}")]
    UserInfo(String),
    #[error("identity provider not configured: {0}")]
    NotConfigured(String),
}

/// Exchanges an authorization code for the signed-in user's profile.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`IdentityError`] if the exchange or the profile fetch fails.
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityError>;
}

/// Build the provider consent URL for `config`.
///
/// # Errors
///
/// Fails only if the fixed authorize endpoint cannot be parsed.
pub fn authorize_url(config: &OAuthConfig) -> Result<String, IdentityError> {
    let scope = SCOPES.join(" ");
    let url = url::Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| IdentityError::NotConfigured(e.to_string()))?;
    Ok(url.into())
}

/// Pull the `code` query parameter out of a provider redirect URL.
#[must_use]
pub fn code_from_redirect(redirect: &str) -> Option<String> {
    let url = url::Url::parse(redirect).ok()?;
    url.query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// ID TOKEN
// =============================================================================

#[derive(Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picture: Option<String>,
}

/// Decode the payload segment of a JWT id token into a profile.
///
/// # Errors
///
/// Returns [`IdentityError::Decode`] if the token does not have three
/// segments, the payload is not base64url, or the claims are not JSON with a
/// `sub` field.
pub fn decode_id_token(token: &str) -> Result<IdentityProfile, IdentityError> {
    let segments = token.trim().split('.').collect::<Vec<_>>();
    if segments.len() != 3 {
        return Err(IdentityError::Decode(format!("expected 3 segments, got {}", segments.len())));
    }
    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| IdentityError::Decode(e.to_string()))?;
    let claims: IdTokenClaims = serde_json::from_slice(&payload).map_err(|e| IdentityError::Decode(e.to_string()))?;
    Ok(IdentityProfile { id: claims.sub, name: claims.name, email: claims.email, picture: claims.picture })
}

// =============================================================================
// GOOGLE
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picture: Option<String>,
}

fn parse_token_response(body: &str) -> Result<String, IdentityError> {
    let token: TokenResponse = serde_json::from_str(body)
        .map_err(|_| IdentityError::TokenExchange(format!("unexpected response: {body}")))?;
    Ok(token.access_token)
}

fn parse_userinfo(body: &str) -> Result<IdentityProfile, IdentityError> {
    let info: UserInfo = serde_json::from_str(body).map_err(|e| IdentityError::UserInfo(e.to_string()))?;
    Ok(IdentityProfile { id: info.sub, name: info.name, email: info.email, picture: info.picture })
}

/// Google OAuth code exchange over HTTPS.
#[cfg(not(target_arch = "wasm32"))]
pub struct GoogleIdentityProvider {
    http: reqwest::Client,
    config: OAuthConfig,
}

#[cfg(not(target_arch = "wasm32"))]
impl GoogleIdentityProvider {
    const REQUEST_TIMEOUT_SECS: u64 = 30;
    const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// # Errors
    ///
    /// Fails if the client secret is missing or the HTTP client cannot be built.
    pub fn new(config: OAuthConfig) -> Result<Self, IdentityError> {
        if config.client_secret.is_none() {
            return Err(IdentityError::NotConfigured("OAUTH_CLIENT_SECRET not set".to_owned()));
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(Self::REQUEST_TIMEOUT_SECS))
            .connect_timeout(std::time::Duration::from_secs(Self::CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| IdentityError::NotConfigured(e.to_string()))?;
        Ok(Self { http, config })
    }

    async fn exchange_token(&self, code: &str) -> Result<String, IdentityError> {
        let secret = self.config.client_secret.as_deref().unwrap_or_default();
        let resp = self
            .http
            .post(TOKEN_URL)
            .header("Accept", "application/json")
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", secret),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| IdentityError::TokenExchange(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| IdentityError::TokenExchange(e.to_string()))?;
        if !status.is_success() {
            return Err(IdentityError::TokenExchange(format!("{status}: {body}")));
        }
        parse_token_response(&body)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<IdentityProfile, IdentityError> {
        let resp = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| IdentityError::UserInfo(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| IdentityError::UserInfo(e.to_string()))?;
        if !status.is_success() {
            return Err(IdentityError::UserInfo(format!("{status}: {body}")));
        }
        parse_userinfo(&body)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn exchange_code(&self, code: &str) -> Result<IdentityProfile, IdentityError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(IdentityError::TokenExchange("missing authorization code".to_owned()));
        }
        let access_token = self.exchange_token(code).await?;
        tracing::info!("identity: authorization code exchanged");
        self.fetch_userinfo(&access_token).await
    }
}
