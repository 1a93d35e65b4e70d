use std::path::{Path, PathBuf};

use crate::modules::auth::CredentialStore;
use crate::modules::storage::{FileCatalogSource, FileUserRepository, StorageError};
use crate::{DEFAULT_DATA_DIR, LOG_FILE, MESSAGES_FILE, PBKDF2_ITERATIONS, USERS_FILE, USER_DATA_DIR};

/// Where the data files live and how new credentials are hashed
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub hash_iterations: u32,
}

impl AppConfig {
    /// Configuration rooted at `data_dir`, everything else at defaults
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        AppConfig {
            log_file: data_dir.join(LOG_FILE),
            data_dir,
            hash_iterations: PBKDF2_ITERATIONS,
        }
    }

    /// The explicit directory if given (flag or environment, resolved by the
    /// CLI), otherwise `./data`
    pub fn resolve(data_dir: Option<&Path>) -> Self {
        match data_dir {
            Some(dir) => AppConfig::new(dir),
            None => AppConfig::new(DEFAULT_DATA_DIR),
        }
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn messages_path(&self) -> PathBuf {
        self.data_dir.join(MESSAGES_FILE)
    }

    pub fn user_data_dir(&self) -> PathBuf {
        self.data_dir.join(USER_DATA_DIR)
    }

    /// Create the data directories and an empty credential store if missing
    pub fn ensure_layout(&self) -> Result<(), StorageError> {
        let user_data = self.user_data_dir();
        std::fs::create_dir_all(&user_data).map_err(|e| StorageError::io(&user_data, e))?;

        let credentials = self.open_credentials()?;
        if !credentials.path().exists() {
            credentials.save()?;
        }
        Ok(())
    }

    pub fn open_credentials(&self) -> Result<CredentialStore, StorageError> {
        Ok(CredentialStore::open(self.credentials_path())?.with_iterations(self.hash_iterations))
    }

    pub fn user_repository(&self) -> FileUserRepository {
        FileUserRepository::new(self.user_data_dir())
    }

    pub fn catalog_source(&self) -> FileCatalogSource {
        FileCatalogSource::new(self.messages_path())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig::resolve(None)
    }
}
