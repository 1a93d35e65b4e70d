use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::modules::utils::time::format_sent_date;

/// Every recognized card field, as supplied by the front end for create and edit.
/// Unknown keys are rejected when deserializing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CardFields {
    pub to: String,
    pub from: String,
    pub item: String,
    pub message_type: String,
    pub sender: String,
    pub recipient: String,
    pub id: u64,
    #[serde(default)]
    pub sent: bool,
    #[serde(default)]
    pub date_sent: Option<DateTime<Local>>,
}

/// A single thank-you note and its send state
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub to: String,
    pub from: String,
    pub item: String,
    pub message_type: String,
    pub sender: String,   // email address of the person thanking
    pub recipient: String, // email address of the person being thanked
    pub id: u64,
    pub sent: bool,
    pub date_sent: Option<DateTime<Local>>, // set exactly when `sent` is true
}

impl Card {
    pub fn new(fields: CardFields) -> Self {
        Card {
            to: fields.to,
            from: fields.from,
            item: fields.item,
            message_type: fields.message_type,
            sender: fields.sender,
            recipient: fields.recipient,
            id: fields.id,
            sent: fields.sent,
            date_sent: fields.date_sent,
        }
    }

    /// Replace every field with the given values. Nothing from the old state survives.
    pub fn edit(&mut self, fields: CardFields) {
        *self = Card::new(fields);
    }

    /// Flip the card to sent and stamp the current time
    pub fn mark_sent(&mut self) {
        self.sent = true;
        self.date_sent = Some(Local::now());
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// "MM/DD/YY HH:MM" for sent cards, `None` while the card is a draft
    pub fn formatted_sent_date(&self) -> Option<String> {
        self.date_sent.as_ref().map(format_sent_date)
    }

    /// Current values as a field set, used to prefill the edit form
    pub fn fields(&self) -> CardFields {
        CardFields {
            to: self.to.clone(),
            from: self.from.clone(),
            item: self.item.clone(),
            message_type: self.message_type.clone(),
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            id: self.id,
            sent: self.sent,
            date_sent: self.date_sent,
        }
    }
}
