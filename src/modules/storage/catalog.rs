use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::{read_json, StorageError};
use crate::ITEM_PLACEHOLDER;

/// Shared message templates keyed by message type, plus the signed-out welcome text
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MessageCatalog {
    #[serde(default)]
    pub welcome: String,
    pub messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn template(&self, message_type: &str) -> Option<&str> {
        self.messages.get(message_type).map(String::as_str)
    }

    pub fn contains(&self, message_type: &str) -> bool {
        self.messages.contains_key(message_type)
    }

    /// Message types in a stable order for listing
    pub fn message_types(&self) -> Vec<&str> {
        self.messages.keys().map(String::as_str).sorted().collect()
    }

    /// Fill the template for `message_type` with `item`.
    /// Only the first placeholder is replaced; `None` if the type is unknown.
    pub fn personalize(&self, message_type: &str, item: &str) -> Option<String> {
        self.template(message_type)
            .map(|template| template.replacen(ITEM_PLACEHOLDER, item, 1))
    }
}

/// Read-only source of the message catalog, injected wherever templates are needed
pub trait CatalogSource {
    fn load_catalog(&self) -> Result<MessageCatalog, StorageError>;
}

/// Catalog backed by a JSON file, re-read on every load
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load_catalog(&self) -> Result<MessageCatalog, StorageError> {
        read_json(&self.path)?.ok_or_else(|| StorageError::Missing(self.path.clone()))
    }
}

impl CatalogSource for MessageCatalog {
    fn load_catalog(&self) -> Result<MessageCatalog, StorageError> {
        Ok(self.clone())
    }
}
