use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A card as the tracking service returns it. Only the fields the flows
/// actually read; everything else in the payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "shortUrl", default)]
    pub short_url: Option<String>,
}

/// The action created by posting a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAction {
    pub id: String,
}

/// Port to the external card-tracking service. The submit flows only know
/// these three calls; the reqwest implementation lives in `adapters`.
#[async_trait]
pub trait CardTracker: Send + Sync {
    async fn add_comment(&self, card_id: &str, text: &str) -> Result<CommentAction>;
    async fn create_card(&self, list_id: &str, name: &str, desc: &str) -> Result<Card>;
    async fn update_description(&self, card_id: &str, desc: &str) -> Result<Card>;
}
