use std::sync::atomic::{AtomicU32, Ordering};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::ClientCredentials, error::HarvestError, spotify::auth::request_client_credentials,
    types::Credential,
};

/// Owns the bearer credential of a run.
///
/// Every stage asks the manager for a token instead of holding one. An expired
/// credential is replaced before it is handed out, and the refresh happens
/// while the slot is locked, so callers arriving during a refresh wait for it
/// and reuse its result: at most one grant request is ever in flight.
pub struct TokenManager {
    client: Client,
    token_url: String,
    credentials: ClientCredentials,
    token: Mutex<Option<Credential>>,
    grants: AtomicU32,
}

impl TokenManager {
    pub fn new(client: Client, token_url: String, credentials: ClientCredentials) -> Self {
        TokenManager {
            client,
            token_url,
            credentials,
            token: Mutex::new(None),
            grants: AtomicU32::new(0),
        }
    }

    /// Returns a credential that is not expired, requesting one if needed.
    pub async fn get_token(&self) -> Result<Credential, HarvestError> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let fresh = request_client_credentials(&self.client, &self.token_url, &self.credentials)
            .await?;
        self.grants.fetch_add(1, Ordering::SeqCst);
        *slot = Some(fresh.clone());
        Ok(fresh)
    }

    pub async fn get_valid_token(&self) -> Result<String, HarvestError> {
        Ok(self.get_token().await?.access_token)
    }

    /// Drops the cached credential, e.g. after the API rejected it with 401.
    pub async fn invalidate(&self) {
        *self.token.lock().await = None;
    }

    /// Number of grants issued by this manager so far.
    pub fn grants_issued(&self) -> u32 {
        self.grants.load(Ordering::SeqCst)
    }
}
