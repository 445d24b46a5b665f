// OAuth2 service-account flow (JWT bearer grant) for the Sheets API.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::LedgerError;

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

pub struct ServiceAccountAuth {
    email: String,
    private_key: String,
    token_url: String,
    http: reqwest::Client,
    cached: RwLock<Option<CachedToken>>,
}

/// Keys pasted into environment variables usually carry literal `\n`
/// sequences instead of line breaks.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

impl ServiceAccountAuth {
    pub fn new(email: &str, private_key: &str, token_url: &str, http: reqwest::Client) -> Self {
        ServiceAccountAuth {
            email: email.to_string(),
            private_key: normalize_private_key(private_key),
            token_url: token_url.to_string(),
            http,
            cached: RwLock::new(None),
        }
    }

    /// Signed RS256 assertion exchanged for an access token.
    pub fn build_assertion(&self, now: DateTime<Utc>) -> Result<String, LedgerError> {
        let claims = Claims {
            iss: &self.email,
            scope: SHEETS_SCOPE,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }

    /// Returns a bearer token, reusing the cached one until shortly before
    /// it expires.
    pub async fn access_token(&self) -> Result<String, LedgerError> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let now = Utc::now();
        let assertion = self.build_assertion(now)?;
        tracing::debug!(account = %self.email, "Requesting service account access token");

        let response = self
            .http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::StoreResponse { status: status.as_u16(), body });
        }

        let token: TokenResponse = response.json().await?;
        let fresh = CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        };
        let access_token = fresh.access_token.clone();
        *cached = Some(fresh);
        Ok(access_token)
    }

    #[cfg(test)]
    async fn seed_token(&self, access_token: &str, expires_at: DateTime<Utc>) {
        *self.cached.write().await =
            Some(CachedToken { access_token: access_token.to_string(), expires_at });
    }
}
