pub mod hashing;
pub mod password;
pub mod store;

use thiserror::Error;

use crate::modules::cards::CardError;
use crate::modules::storage::StorageError;

// Re-export the main types and functions
pub use hashing::{derive_password_hash, generate_random_salt};
pub use password::{validate_password, validate_username, PasswordError, UsernameError};
pub use store::{Credential, CredentialStore};

/// Sign-up and sign-in failures. Display text is what the user is shown.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid login.")]
    InvalidCredentials,

    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    #[error(transparent)]
    InvalidPassword(#[from] PasswordError),

    #[error("Credential store error: {0}")]
    Storage(#[from] StorageError),

    #[error("Could not load cards: {0}")]
    Cards(#[from] CardError),
}
