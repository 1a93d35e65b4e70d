// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{auth, cards, config, session, storage, utils};

// Re-export commonly used types
pub use modules::auth::store::CredentialStore;
pub use modules::cards::manager::ThankyouManager;
pub use modules::cards::model::{Card, CardFields};
pub use modules::cards::user::User;
pub use modules::cards::CardError;
pub use modules::config::AppConfig;
pub use modules::session::Session;
pub use modules::storage::{MessageCatalog, StorageError, UserRepository};

// Data files
pub const USERS_FILE: &str = "users.json";
pub const MESSAGES_FILE: &str = "messages.json";
pub const USER_DATA_DIR: &str = "user_data";
pub const LOG_FILE: &str = "thankyou.log";
pub const DEFAULT_DATA_DIR: &str = "data";

// Catalog placeholder replaced by the card's item
pub const ITEM_PLACEHOLDER: &str = "[item]";

// Sample card shown on the new-card form
pub const SAMPLE_TO: &str = "Somebody";
pub const SAMPLE_FROM: &str = "Me";
pub const SAMPLE_ITEM: &str = "gift";
pub const SAMPLE_MESSAGE_TYPE: &str = "tons";

// Sign-up rules
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 12;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 16;
pub const PBKDF2_ITERATIONS: u32 = 100_000;

// Type aliases
pub type HmacSha256 = hmac::Hmac<sha2::Sha256>;
