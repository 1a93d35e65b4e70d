pub mod catalog;
pub mod files;
pub mod repository;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use catalog::{CatalogSource, FileCatalogSource, MessageCatalog};
pub use files::{read_json, write_json_atomic};
pub use repository::{FileUserRepository, UserRepository};

/// Failure reading or writing one of the flat data files
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid data in {}: {source}", .path.display())]
    InvalidData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing data file: {}", .0.display())]
    Missing(PathBuf),

    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),

    #[error("Record {} belongs to {found:?}, expected {expected:?}", .path.display())]
    OwnerMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_data(path: &Path, source: serde_json::Error) -> Self {
        StorageError::InvalidData {
            path: path.to_path_buf(),
            source,
        }
    }
}
