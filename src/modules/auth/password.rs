use thiserror::Error;

use crate::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN};

/// Username literally reserved by the sign-up form
const RESERVED_USERNAME: &str = "username";

/// Password rule violations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must be between 8 and 16 characters.")]
    Length,
    #[error("Password must not contain any spaces.")]
    Whitespace,
}

/// Username rule violations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsernameError {
    #[error("That username is taken.")]
    Taken,
    #[error("Your username must be at least 3 characters and cannot contain any spaces.")]
    Format,
    #[error("Your username may only contain letters, numbers, '_' and '-'.")]
    Characters,
}

/// Function to validate password rules
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(PasswordError::Length);
    }
    if password.chars().any(char::is_whitespace) {
        return Err(PasswordError::Whitespace);
    }
    Ok(())
}

/// Check the shape of a new username. Whether it is already registered is
/// checked by the credential store.
pub fn validate_username(username: &str) -> Result<(), UsernameError> {
    if username == RESERVED_USERNAME {
        return Err(UsernameError::Taken);
    }

    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
        || username.chars().any(char::is_whitespace)
    {
        return Err(UsernameError::Format);
    }

    // Usernames double as file names for card records
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(UsernameError::Characters);
    }

    Ok(())
}
