use uuid::Uuid;

use super::error::CrunchyrollError;
use super::types::TokenResponse;

const TOKEN_URL: &str = "https://www.crunchyroll.com/auth/v1/token";
const DEVICE_NAME: &str = "anisync";
const DEVICE_TYPE: &str = "Rust";

/// An authenticated Crunchyroll session.
#[derive(Debug, Clone)]
pub struct CrunchyrollSession {
    pub access_token: String,
    pub account_id: String,
}

/// Client credentials used for HTTP basic auth on the token endpoint.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Stable per-account device id, so repeated logins reuse one device slot.
pub fn device_id(email: &str) -> Uuid {
    Uuid::new_v3(&Uuid::NAMESPACE_OID, email.as_bytes())
}

/// Authenticate with Crunchyroll using Resource Owner Password Grant.
pub async fn authenticate(
    http: &reqwest::Client,
    credentials: &ClientCredentials,
    email: &str,
    password: &str,
) -> Result<CrunchyrollSession, CrunchyrollError> {
    let device_id = device_id(email).to_string();
    let resp = http
        .post(TOKEN_URL)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "password"),
            ("username", email),
            ("password", password),
            ("scope", "offline_access"),
            ("device_id", device_id.as_str()),
            ("device_name", DEVICE_NAME),
            ("device_type", DEVICE_TYPE),
        ])
        .send()
        .await?;

    let status = resp.status();
    if status.as_u16() == 401 {
        let body = resp.text().await.unwrap_or_default();
        return Err(CrunchyrollError::Auth(body));
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CrunchyrollError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let token = resp
        .json::<TokenResponse>()
        .await
        .map_err(|e| CrunchyrollError::Parse(e.to_string()))?;

    tracing::debug!(expires_in = ?token.expires_in, "Crunchyroll token issued");

    let account_id = token
        .account_id
        .ok_or_else(|| CrunchyrollError::Auth("token response has no account id".into()))?;

    Ok(CrunchyrollSession {
        access_token: token.access_token,
        account_id,
    })
}
