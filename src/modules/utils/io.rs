use lettre::Address;
use std::io;

/// Helper function to validate email format
pub fn is_valid_email(email: &str) -> bool {
    !email.trim().is_empty() && email.trim() == email && email.parse::<Address>().is_ok()
}

/// Prompt on the terminal and read a password without echoing it
pub fn prompt_password(prompt: &str) -> io::Result<String> {
    rpassword::prompt_password(prompt)
}
