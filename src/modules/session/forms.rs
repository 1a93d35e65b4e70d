use thiserror::Error;

use crate::modules::cards::{Card, CardFields};
use crate::modules::utils::io::is_valid_email;

/// Raw card values as entered by the user, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub to: String,
    pub from: String,
    pub item: String,
    pub message_type: String,
    pub sender: String,
    pub recipient: String,
}

impl CardForm {
    /// Prefill from a saved card
    pub fn from_card(card: &Card) -> Self {
        CardForm {
            to: card.to.clone(),
            from: card.from.clone(),
            item: card.item.clone(),
            message_type: card.message_type.clone(),
            sender: card.sender.clone(),
            recipient: card.recipient.clone(),
        }
    }

    /// Field set for `id`. Submitted cards always start out unsent.
    pub fn into_fields(self, id: u64) -> CardFields {
        CardFields {
            to: self.to,
            from: self.from,
            item: self.item,
            message_type: self.message_type,
            sender: self.sender,
            recipient: self.recipient,
            id,
            sent: false,
            date_sent: None,
        }
    }
}

/// Why a submitted card form was rejected. Display text is shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardFormError {
    #[error("Invalid input for {0} field.")]
    EmptyField(&'static str),

    #[error("Invalid email for {0}")]
    InvalidEmail(&'static str),

    #[error("Unknown message type '{0}'.")]
    UnknownMessageType(String),
}

/// Text fields must be filled in and the two addresses must parse.
/// Fields are checked in form order and the first problem wins.
pub fn validate_card_form(form: &CardForm) -> Result<(), CardFormError> {
    let checks: [(&'static str, &str, bool); 5] = [
        ("to", form.to.as_str(), false),
        ("from", form.from.as_str(), false),
        ("sender", form.sender.as_str(), true),
        ("recipient", form.recipient.as_str(), true),
        ("item", form.item.as_str(), false),
    ];

    for (name, value, is_email) in checks {
        if is_email {
            if !is_valid_email(value) {
                return Err(CardFormError::InvalidEmail(name));
            }
        } else if value.trim().is_empty() {
            return Err(CardFormError::EmptyField(name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CardForm {
        CardForm {
            to: "Somebody".to_string(),
            from: "Me".to_string(),
            item: "candy".to_string(),
            message_type: "tons".to_string(),
            sender: "me@example.com".to_string(),
            recipient: "you@example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(validate_card_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_empty_text_field() {
        let mut form = valid_form();
        form.item = "  ".to_string();
        let err = validate_card_form(&form).unwrap_err();
        assert_eq!(err, CardFormError::EmptyField("item"));
        assert_eq!(err.to_string(), "Invalid input for item field.");
    }

    #[test]
    fn test_invalid_email() {
        let mut form = valid_form();
        form.recipient = "not-an-address".to_string();
        let err = validate_card_form(&form).unwrap_err();
        assert_eq!(err, CardFormError::InvalidEmail("recipient"));
        assert_eq!(err.to_string(), "Invalid email for recipient");
    }

    #[test]
    fn test_first_problem_wins() {
        let mut form = valid_form();
        form.to = String::new();
        form.sender = "bad".to_string();
        assert_eq!(
            validate_card_form(&form),
            Err(CardFormError::EmptyField("to"))
        );
    }

    #[test]
    fn test_into_fields_starts_unsent() {
        let fields = valid_form().into_fields(4);
        assert_eq!(fields.id, 4);
        assert!(!fields.sent);
        assert!(fields.date_sent.is_none());
        assert_eq!(fields.to, "Somebody");
    }

    #[test]
    fn test_form_round_trips_through_card() {
        let card = Card::new(valid_form().into_fields(0));
        assert_eq!(CardForm::from_card(&card), valid_form());
    }
}
