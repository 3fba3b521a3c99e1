use crate::config::trello::TrelloConfig;
use crate::domain::ports::{Card, CardTracker, CommentAction};
use crate::utils::error::{DevisError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Error payload the service returns on most failures.
#[derive(Debug, Deserialize)]
struct TrelloErrorBody {
    message: String,
}

/// Thin reqwest client for the three card-tracking calls. Authentication is
/// the service's key/token query-parameter scheme; no retries, the caller
/// sees every failure.
pub struct TrelloClient {
    client: Client,
    config: TrelloConfig,
}

impl TrelloClient {
    pub fn new(config: TrelloConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &TrelloConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_root.trim_end_matches('/'), path)
    }

    fn auth_params(&self) -> [(&'static str, &str); 2] {
        [("key", self.config.key.as_str()), ("token", self.config.token.as_str())]
    }

    /// Non-2xx responses carry either a JSON `{"message": …}` or plain text;
    /// surface whichever is there, tagged with the status code.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<TrelloErrorBody>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) => body,
        };
        Err(DevisError::TrelloApiError {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CardTracker for TrelloClient {
    async fn add_comment(&self, card_id: &str, text: &str) -> Result<CommentAction> {
        let url = self.endpoint(&format!("/cards/{}/actions/comments", card_id));
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&self.auth_params())
            .query(&[("text", text)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn create_card(&self, list_id: &str, name: &str, desc: &str) -> Result<Card> {
        let url = self.endpoint("/cards");
        tracing::debug!("POST {} (list {})", url, list_id);

        let response = self
            .client
            .post(&url)
            .query(&self.auth_params())
            .query(&[("idList", list_id), ("name", name), ("desc", desc)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }

    async fn update_description(&self, card_id: &str, desc: &str) -> Result<Card> {
        let url = self.endpoint(&format!("/cards/{}", card_id));
        tracing::debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .query(&self.auth_params())
            .query(&[("desc", desc)])
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Ok(response.json().await?)
    }
}
