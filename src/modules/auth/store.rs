use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::hashing::{derive_password_hash, generate_random_salt, verify_password_hash};
use super::password::{validate_password, validate_username, UsernameError};
use super::AuthError;
use crate::modules::storage::{read_json, write_json_atomic, StorageError};
use crate::PBKDF2_ITERATIONS;

/// Salted password hash for one username
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Credential {
    pub salt: String, // hex
    pub hash: String, // hex
    pub iterations: u32,
}

impl Credential {
    fn matches(&self, password: &str) -> bool {
        let (Ok(salt), Ok(expected)) = (hex::decode(&self.salt), hex::decode(&self.hash)) else {
            return false;
        };
        verify_password_hash(password, &salt, self.iterations, &expected)
    }
}

/// The shared username → credential file. New usernames are only ever appended.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    iterations: u32,
    credentials: BTreeMap<String, Credential>,
}

impl CredentialStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let credentials = read_json(&path)?.unwrap_or_default();
        Ok(CredentialStore {
            path,
            iterations: PBKDF2_ITERATIONS,
            credentials,
        })
    }

    /// Hash cost used for credentials added from now on
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, username: &str) -> bool {
        self.credentials.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Taken first, then the shape rules
    pub fn check_username(&self, username: &str) -> Result<(), UsernameError> {
        if self.contains(username) {
            return Err(UsernameError::Taken);
        }
        validate_username(username)
    }

    /// Validate and register a new user, then rewrite the store file
    pub fn add_user(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        self.check_username(username)?;
        validate_password(password)?;

        let salt = generate_random_salt();
        let hash = derive_password_hash(password, &salt, self.iterations);
        self.credentials.insert(
            username.to_string(),
            Credential {
                salt: hex::encode(&salt),
                hash: hex::encode(hash),
                iterations: self.iterations,
            },
        );

        if let Err(e) = self.save() {
            self.credentials.remove(username);
            return Err(e.into());
        }
        Ok(())
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.credentials
            .get(username)
            .map_or(false, |credential| credential.matches(password))
    }

    pub fn save(&self) -> Result<(), StorageError> {
        write_json_atomic(&self.path, &self.credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_store() -> (CredentialStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::open(dir.path().join("users.json"))
            .unwrap()
            .with_iterations(1_000);
        (store, dir)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let (store, _dir) = setup_test_store();
        assert!(store.is_empty());
        assert!(!store.verify("admin", "secretpw"));
    }

    #[test]
    fn test_user_creation_and_verification() {
        let (mut store, _dir) = setup_test_store();

        store.add_user("sampleuser", "somepass").unwrap();
        assert!(store.contains("sampleuser"));
        assert!(store.verify("sampleuser", "somepass"));
        assert!(!store.verify("sampleuser", "wrongpass"));
        assert!(!store.verify("otheruser", "somepass"));
    }

    #[test]
    fn test_store_persists_across_opens() {
        let (mut store, dir) = setup_test_store();
        store.add_user("sampleuser", "somepass").unwrap();

        let reopened = CredentialStore::open(dir.path().join("users.json")).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.verify("sampleuser", "somepass"));
    }

    #[test]
    fn test_duplicate_username_is_taken() {
        let (mut store, _dir) = setup_test_store();
        store.add_user("sampleuser", "somepass").unwrap();

        let result = store.add_user("sampleuser", "otherpass");
        assert!(matches!(
            result,
            Err(AuthError::InvalidUsername(UsernameError::Taken))
        ));
        assert!(store.verify("sampleuser", "somepass"));
    }

    #[test]
    fn test_invalid_signup_is_not_stored() {
        let (mut store, _dir) = setup_test_store();

        assert!(matches!(
            store.add_user("ab", "somepass"),
            Err(AuthError::InvalidUsername(UsernameError::Format))
        ));
        assert!(matches!(
            store.add_user("sampleuser", "short"),
            Err(AuthError::InvalidPassword(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_damaged_hash_never_verifies() {
        let (mut store, _dir) = setup_test_store();
        store.add_user("sampleuser", "somepass").unwrap();

        let credential = store.credentials.get_mut("sampleuser").unwrap();
        let mut hash = credential.hash.clone();
        hash.truncate(hash.len() - 2);
        credential.hash = hash;
        assert!(!store.verify("sampleuser", "somepass"));

        store.credentials.get_mut("sampleuser").unwrap().hash = "not hex".to_string();
        assert!(!store.verify("sampleuser", "somepass"));
    }

    #[test]
    fn test_salts_differ_per_user() {
        let (mut store, _dir) = setup_test_store();
        store.add_user("alice", "somepass").unwrap();
        store.add_user("bob_1", "somepass").unwrap();

        let alice = &store.credentials["alice"];
        let bob = &store.credentials["bob_1"];
        assert_ne!(alice.salt, bob.salt);
        assert_ne!(alice.hash, bob.hash);
    }
}
