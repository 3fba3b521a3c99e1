use crate::core::quote::QuoteForm;
use crate::core::render;
use crate::domain::model::ContactRequest;
use crate::domain::ports::{Card, CardTracker, CommentAction};
use crate::utils::error::{DevisError, Result};
use crate::utils::validation::Validate;
use url::Url;

/// Result of the new-client flow: the created card and the personalized
/// form link written into its description.
#[derive(Debug, Clone)]
pub struct NewClientCard {
    pub card: Card,
    pub form_link: Url,
}

/// Drives the two user-facing flows over whichever `CardTracker`
/// implementation it is given.
pub struct QuoteSubmitter<T: CardTracker> {
    tracker: T,
}

impl<T: CardTracker> QuoteSubmitter<T> {
    pub fn new(tracker: T) -> Self {
        Self { tracker }
    }

    /// Renders the quote and posts it as a comment on an existing card.
    /// An all-zero quote is refused: there is nothing to send.
    pub async fn attach_quote(
        &self,
        card_id: &str,
        form: &QuoteForm<'_>,
    ) -> Result<CommentAction> {
        if form.is_empty() {
            return Err(DevisError::ValidationError {
                message: "Aucune option sélectionnée : le devis est vide".to_string(),
            });
        }

        let text = render::quote_comment(form);
        tracing::debug!("Quote comment for card {}:\n{}", card_id, text);

        let action = self.tracker.add_comment(card_id, &text).await?;
        tracing::info!("Quote attached to card {} (action {})", card_id, action.id);
        Ok(action)
    }

    /// Creates a card for a new client on the given list, then rewrites its
    /// description with the contact block and the form link carrying the
    /// freshly assigned card id.
    pub async fn create_client_card(
        &self,
        contact: &ContactRequest,
        list_id: &str,
        form_base_url: &str,
    ) -> Result<NewClientCard> {
        contact.validate()?;

        let name = render::client_card_name(contact);
        tracing::info!("Creating client card '{}' on list {}", name, list_id);
        let card = self.tracker.create_card(list_id, &name, "").await?;
        tracing::debug!("Card created with id {}", card.id);

        let form_link = render::form_link(form_base_url, &card.id)?;
        let desc = render::client_card_description(contact, &form_link);
        let card = self.tracker.update_description(&card.id, &desc).await?;
        tracing::info!("Card {} description updated with form link", card.id);

        Ok(NewClientCard { card, form_link })
    }
}
