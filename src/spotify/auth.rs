use chrono::Utc;
use reqwest::{Client, header::AUTHORIZATION};
use serde_json::Value;

use crate::{config::ClientCredentials, error::HarvestError, types::Credential, utils};

/// Lifetime assumed when the provider does not declare one.
const DEFAULT_EXPIRES_IN: u64 = 3600;

/// Requests a new bearer credential with the OAuth2 client-credentials grant.
///
/// The client id and secret are sent as a basic-auth header and the form body
/// carries `grant_type=client_credentials`.
///
/// # Errors
///
/// Returns [`HarvestError::Auth`] when
/// - the token endpoint cannot be reached,
/// - it answers with a non-success status (e.g. rejected credentials),
/// - the response body is not JSON or lacks `access_token`.
pub async fn request_client_credentials(
    client: &Client,
    token_url: &str,
    credentials: &ClientCredentials,
) -> Result<Credential, HarvestError> {
    let res = client
        .post(token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&credentials.client_id, &credentials.client_secret),
        )
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| HarvestError::Auth(e.to_string()))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| HarvestError::Auth(e.to_string()))?;

    if !status.is_success() {
        return Err(HarvestError::Auth(format!(
            "token endpoint answered {status}: {body}"
        )));
    }

    let json: Value = serde_json::from_str(&body).map_err(|e| HarvestError::Auth(e.to_string()))?;
    credential_from_json(&json, Utc::now().timestamp() as u64)
}

pub fn credential_from_json(json: &Value, obtained_at: u64) -> Result<Credential, HarvestError> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HarvestError::Auth("access token not found in response".to_string()))?;

    Ok(Credential {
        access_token: access_token.to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(DEFAULT_EXPIRES_IN),
        obtained_at,
    })
}
