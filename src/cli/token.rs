use std::time::Duration;

use crate::{
    config::{self, ClientCredentials},
    error, info,
    management::TokenManager,
    spotify::client::build_http_client,
    success,
};

/// Requests a credential to check the configured client id and secret.
pub async fn token(timeout: Duration) {
    let credentials = match ClientCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };
    let http = match build_http_client(timeout) {
        Ok(http) => http,
        Err(e) => error!("{}", e),
    };

    let manager = TokenManager::new(
        http,
        config::spotify_apitoken_url(),
        credentials,
    );

    match manager.get_token().await {
        Ok(token) => {
            success!("Client credentials accepted.");
            info!(
                "Token expires at {}",
                token.expires_at().format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        Err(e) => error!("{}", e),
    }
}
