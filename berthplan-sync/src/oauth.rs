use http_client::HttpClient;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct OauthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub token_url: String,
}

/// Access token obtained through the client-credentials grant.
pub struct BearerToken(String);

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    scope: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl BearerToken {
    pub async fn acquire(client: &HttpClient, config: &OauthConfig) -> Result<BearerToken> {
        let request = TokenRequest {
            grant_type: "client_credentials",
            client_id: &config.client_id,
            client_secret: &config.client_secret,
            scope: &config.scope,
        };

        let response: TokenResponse = client
            .post(&config.token_url)
            .form(&request)
            .send()
            .await?
            .json()
            .await?;

        Ok(BearerToken(response.access_token))
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}
