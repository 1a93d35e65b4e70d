pub mod manager;
pub mod model;
pub mod user;

use thiserror::Error;

use crate::modules::storage::StorageError;

pub use manager::ThankyouManager;
pub use model::{Card, CardFields};
pub use user::User;

/// Errors raised by card operations, for the front end to turn into redirects or messages
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Card {0} not found")]
    NotFound(u64),

    #[error("Card {0} has already been sent")]
    AlreadySent(u64),

    #[error("Card id {0} is already in use")]
    DuplicateId(u64),

    #[error("No card ids left")]
    IdExhausted,

    #[error("No message template for type '{0}'")]
    TemplateNotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),
}
