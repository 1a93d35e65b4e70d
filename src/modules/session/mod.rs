pub mod forms;
pub mod view;

use crate::modules::auth::{AuthError, CredentialStore};
use crate::modules::cards::{Card, CardError, ThankyouManager};
use crate::modules::storage::{CatalogSource, StorageError, UserRepository};
use crate::modules::utils::logging::log_auth_event;
use crate::SAMPLE_MESSAGE_TYPE;

pub use forms::{validate_card_form, CardForm, CardFormError};
pub use view::{card_summary, render_card, sorted_cards};

pub const CREATED_MESSAGE: &str = "You have created a new thank you card!";
pub const EDITED_MESSAGE: &str = "You have edited your thank you card.";
pub const SENT_MESSAGE: &str = "Eventually, the email functionality will work, but nothing has been sent.";
pub const SIGNED_OUT_MESSAGE: &str = "You have signed out.";

/// Outcome of submitting the card form
#[derive(Debug)]
pub enum Submission {
    /// The card was saved under this id
    Saved(u64),
    /// Nothing was saved; `preview` holds the attempted values for redisplay
    Rejected { error: CardFormError, preview: Card },
}

/// A signed-in user with their loaded cards and a one-shot flash message
pub struct Session {
    manager: ThankyouManager,
    flash: Option<String>,
}

impl Session {
    /// Check the password and load the user's cards
    pub fn sign_in(
        credentials: &CredentialStore,
        username: &str,
        password: &str,
        repository: Box<dyn UserRepository>,
        catalog: &dyn CatalogSource,
    ) -> Result<Session, AuthError> {
        if !credentials.verify(username, password) {
            log_auth_event("signin", username, false, Some("invalid credentials"));
            return Err(AuthError::InvalidCredentials);
        }

        let manager = ThankyouManager::load(username, repository, catalog)?;
        log_auth_event("signin", username, true, None);

        Ok(Session {
            manager,
            flash: Some(format!("Welcome {}.", username)),
        })
    }

    /// Register a new account and sign straight in
    pub fn sign_up(
        credentials: &mut CredentialStore,
        username: &str,
        password: &str,
        repository: Box<dyn UserRepository>,
        catalog: &dyn CatalogSource,
    ) -> Result<Session, AuthError> {
        if let Err(e) = credentials.add_user(username, password) {
            log_auth_event("signup", username, false, Some(&e.to_string()));
            return Err(e);
        }
        log_auth_event("signup", username, true, None);

        Session::sign_in(credentials, username, password, repository, catalog)
    }

    /// End the session, returning the goodbye message
    pub fn sign_out(self) -> String {
        log_auth_event("signout", self.username(), true, None);
        SIGNED_OUT_MESSAGE.to_string()
    }

    /// Welcome text for visitors who are not signed in
    pub fn welcome(catalog: &dyn CatalogSource) -> Result<String, StorageError> {
        Ok(catalog.load_catalog()?.welcome)
    }

    pub fn username(&self) -> &str {
        self.manager.username()
    }

    pub fn manager(&self) -> &ThankyouManager {
        &self.manager
    }

    /// The pending flash message, cleared once read
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }

    pub fn card_list(&self) -> Vec<&Card> {
        sorted_cards(self.manager.cards())
    }

    /// Preview, edit and send only apply to existing cards that are still drafts
    pub fn ensure_unsent(&self, id: u64) -> Result<&Card, CardError> {
        let card = self.manager.find_card(id)?;
        if card.sent {
            return Err(CardError::AlreadySent(id));
        }
        Ok(card)
    }

    /// Rendered placeholder card for the empty new-card form
    pub fn sample_preview(&self) -> Result<String, CardError> {
        let sample = self.manager.build_sample_card()?;
        let message = self.manager.personalize_message(&sample)?;
        Ok(render_card(&sample, &message))
    }

    pub fn preview(&self, id: u64) -> Result<String, CardError> {
        let card = self.ensure_unsent(id)?;
        let message = self.manager.personalize_message(card)?;
        Ok(render_card(card, &message))
    }

    /// Current values of a draft card, for the edit form
    pub fn edit_form(&self, id: u64) -> Result<CardForm, CardError> {
        self.ensure_unsent(id).map(CardForm::from_card)
    }

    /// Validate and save a card form. `card_id` is `None` for a new card and the
    /// draft's id when editing. Invalid input saves nothing.
    pub fn submit_card(
        &mut self,
        mut form: CardForm,
        card_id: Option<u64>,
    ) -> Result<Submission, CardError> {
        let id = match card_id {
            Some(id) => {
                self.ensure_unsent(id)?;
                id
            }
            None => self.manager.next_card_id()?,
        };

        if form.message_type.trim().is_empty() {
            form.message_type = SAMPLE_MESSAGE_TYPE.to_string();
        }

        let validation = validate_card_form(&form).and_then(|_| {
            if self.manager.catalog().contains(&form.message_type) {
                Ok(())
            } else {
                Err(CardFormError::UnknownMessageType(form.message_type.clone()))
            }
        });
        let fields = form.into_fields(id);

        if let Err(error) = validation {
            self.flash = Some(error.to_string());
            let preview = self.manager.preview_edited_card(fields);
            return Ok(Submission::Rejected { error, preview });
        }

        match card_id {
            Some(_) => {
                self.manager.edit_card(fields)?;
                self.flash = Some(EDITED_MESSAGE.to_string());
            }
            None => {
                self.manager.create_card(fields)?;
                self.flash = Some(CREATED_MESSAGE.to_string());
            }
        }

        Ok(Submission::Saved(id))
    }

    /// Mark a draft as sent. No email leaves the machine.
    pub fn send_card(&mut self, id: u64) -> Result<&Card, CardError> {
        self.ensure_unsent(id)?;
        self.manager.mark_card_sent(id)?;
        self.flash = Some(SENT_MESSAGE.to_string());
        self.manager.find_card(id)
    }
}
