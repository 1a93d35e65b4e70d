use std::path::PathBuf;

use super::{read_json, write_json_atomic, StorageError};
use crate::modules::cards::user::User;

/// Persistence seam for per-user card records.
///
/// The manager only talks to this trait, so the flat-file store below can be
/// replaced by a locked or transactional one without touching card logic.
pub trait UserRepository {
    /// Load the record for `username`, or `None` if it was never saved.
    /// A stored record naming a different owner is an error.
    fn load_user(&self, username: &str) -> Result<Option<User>, StorageError>;

    /// Write the whole record, replacing any previous version
    fn save_user(&self, user: &User) -> Result<(), StorageError>;
}

/// One JSON file per username under a single directory
#[derive(Debug, Clone)]
pub struct FileUserRepository {
    dir: PathBuf,
}

impl FileUserRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the record for `username`; rejects names that would escape the directory
    pub fn user_path(&self, username: &str) -> Result<PathBuf, StorageError> {
        let unsafe_name = username.is_empty()
            || username.starts_with('.')
            || username
                .chars()
                .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control());
        if unsafe_name {
            return Err(StorageError::InvalidKey(username.to_string()));
        }

        Ok(self.dir.join(format!("{}.json", username)))
    }
}

impl UserRepository for FileUserRepository {
    fn load_user(&self, username: &str) -> Result<Option<User>, StorageError> {
        let path = self.user_path(username)?;
        let user: Option<User> = read_json(&path)?;

        match user {
            Some(user) if user.username() != username => Err(StorageError::OwnerMismatch {
                path,
                expected: username.to_string(),
                found: user.username().to_string(),
            }),
            user => Ok(user),
        }
    }

    fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let path = self.user_path(user.username())?;
        write_json_atomic(&path, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cards::model::CardFields;
    use tempfile::TempDir;

    fn card_fields(id: u64, to: &str) -> CardFields {
        CardFields {
            to: to.to_string(),
            from: "Me".to_string(),
            item: "candy".to_string(),
            message_type: "tons".to_string(),
            sender: "me@example.com".to_string(),
            recipient: "you@example.com".to_string(),
            id,
            sent: false,
            date_sent: None,
        }
    }

    #[test]
    fn test_unknown_user_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let repo = FileUserRepository::new(dir.path());
        assert!(repo.load_user("nobody").unwrap().is_none());
    }

    #[test]
    fn test_user_round_trip_preserves_cards_and_order() {
        let dir = TempDir::new().unwrap();
        let repo = FileUserRepository::new(dir.path().join("user_data"));

        let mut user = User::new("admin");
        user.add_card(card_fields(0, "Somebody")).unwrap();
        user.add_card(card_fields(1, "Another")).unwrap();
        user.find_card_mut(1).unwrap().mark_sent();

        repo.save_user(&user).unwrap();
        let loaded = repo.load_user("admin").unwrap().unwrap();

        assert_eq!(loaded, user);
        assert_eq!(loaded.cards()[0].to, "Somebody");
        assert_eq!(loaded.cards()[1].to, "Another");
        assert!(loaded.cards()[1].sent);
        assert!(loaded.cards()[1].date_sent.is_some());
    }

    #[test]
    fn test_record_owned_by_another_user_is_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = FileUserRepository::new(dir.path());
        std::fs::write(
            dir.path().join("alice.json"),
            r#"{"username":"bob","cards":[]}"#,
        )
        .unwrap();

        let result = repo.load_user("alice");
        assert!(matches!(
            result,
            Err(StorageError::OwnerMismatch { ref expected, ref found, .. })
                if expected == "alice" && found == "bob"
        ));
        assert!(!dir.path().join("bob.json").exists());
    }

    #[test]
    fn test_path_traversal_is_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = FileUserRepository::new(dir.path());

        assert!(matches!(
            repo.user_path("../etc/passwd"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(repo.user_path(""), Err(StorageError::InvalidKey(_))));
        assert!(repo.user_path("admin").unwrap().ends_with("admin.json"));
    }
}
