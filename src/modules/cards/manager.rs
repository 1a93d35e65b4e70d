use log::{info, warn};

use super::model::{Card, CardFields};
use super::user::User;
use super::CardError;
use crate::modules::storage::{CatalogSource, MessageCatalog, UserRepository};
use crate::modules::utils::logging::log_data_operation;
use crate::{SAMPLE_FROM, SAMPLE_ITEM, SAMPLE_MESSAGE_TYPE, SAMPLE_TO};

const USER_RECORD: &str = "user record";

/// Binds one user's persisted cards and the message catalog to the card operations.
///
/// Every mutation is written through to the repository before returning.
pub struct ThankyouManager {
    user: User,
    messages: MessageCatalog,
    repository: Box<dyn UserRepository>,
}

impl ThankyouManager {
    /// Load `username`'s record, creating and saving an empty one on first use.
    /// The catalog is read fresh for every manager.
    pub fn load(
        username: &str,
        repository: Box<dyn UserRepository>,
        catalog: &dyn CatalogSource,
    ) -> Result<Self, CardError> {
        let messages = catalog.load_catalog()?;

        let (user, is_new) = match repository.load_user(username)? {
            Some(user) => (user, false),
            None => (User::new(username), true),
        };

        let manager = ThankyouManager {
            user,
            messages,
            repository,
        };

        if is_new {
            info!("No card record for new user, creating one");
            manager.persist("create_user")?;
        }

        Ok(manager)
    }

    pub fn username(&self) -> &str {
        self.user.username()
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn cards(&self) -> &[Card] {
        self.user.cards()
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.messages
    }

    pub fn next_card_id(&self) -> Result<u64, CardError> {
        self.user.next_card_id()
    }

    /// Append a card whose id the caller took from `next_card_id`, then save
    pub fn create_card(&mut self, fields: CardFields) -> Result<&Card, CardError> {
        let id = fields.id;
        self.user.add_card(fields)?;
        self.persist("create_card")?;
        self.find_card(id)
    }

    /// Overwrite every field of the card with `fields.id`, then save
    pub fn edit_card(&mut self, fields: CardFields) -> Result<&Card, CardError> {
        let id = fields.id;
        self.user
            .find_card_mut(id)
            .ok_or(CardError::NotFound(id))?
            .edit(fields);
        self.persist("edit_card")?;
        self.find_card(id)
    }

    /// True only for an existing card that has not been sent yet
    pub fn is_valid_unsent_card_id(&self, id: u64) -> bool {
        self.user.find_card(id).map_or(false, |card| !card.sent)
    }

    pub fn find_card(&self, id: u64) -> Result<&Card, CardError> {
        self.user.find_card(id).ok_or(CardError::NotFound(id))
    }

    /// The card's message type template with its item filled in
    pub fn personalize_message(&self, card: &Card) -> Result<String, CardError> {
        self.messages
            .personalize(&card.message_type, &card.item)
            .ok_or_else(|| CardError::TemplateNotFound(card.message_type.clone()))
    }

    /// Draft → Sent. Nothing is delivered; only the flag and timestamp change.
    pub fn mark_card_sent(&mut self, id: u64) -> Result<&Card, CardError> {
        self.user
            .find_card_mut(id)
            .ok_or(CardError::NotFound(id))?
            .mark_sent();
        self.persist("mark_card_sent")?;
        self.find_card(id)
    }

    /// Placeholder card for an empty new-card form. Never saved.
    pub fn build_sample_card(&self) -> Result<Card, CardError> {
        Ok(Card::new(CardFields {
            to: SAMPLE_TO.to_string(),
            from: SAMPLE_FROM.to_string(),
            item: SAMPLE_ITEM.to_string(),
            message_type: SAMPLE_MESSAGE_TYPE.to_string(),
            sender: String::new(),
            recipient: String::new(),
            id: self.next_card_id()?,
            sent: false,
            date_sent: None,
        }))
    }

    /// Unsaved card built from attempted form values. Never saved.
    pub fn preview_edited_card(&self, fields: CardFields) -> Card {
        Card::new(fields)
    }

    // Save the whole record, retrying once before giving up
    fn persist(&self, operation: &str) -> Result<(), CardError> {
        let username = self.user.username();

        if let Err(first) = self.repository.save_user(&self.user) {
            warn!("Save failed during {}, retrying once: {}", operation, first);

            if let Err(e) = self.repository.save_user(&self.user) {
                log_data_operation(operation, username, USER_RECORD, false, Some(&e.to_string()));
                return Err(CardError::Persistence(e));
            }
        }

        log_data_operation(operation, username, USER_RECORD, true, None);
        Ok(())
    }
}
