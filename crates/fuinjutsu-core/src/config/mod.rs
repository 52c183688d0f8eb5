//! Settings and API-key persistence
//!
//! - `ConfigStore`: JSON file with `settings` and encrypted `api_keys`
//! - `ConfigFile`: the on-disk document
//! - `ConfigRecord`: the decrypted in-memory state

mod traits;
mod file;
mod record;
mod service;
mod store;

pub use traits::{ConfigError, ConfigResult};
pub use file::{default_config_path, ConfigFile, CONFIG_PATH_ENV};
pub use record::{ConfigRecord, StoredSecret};
pub use service::{canonical_service_id, display_name, mask_secret, KNOWN_SERVICES};
pub use store::{ApiKeyEntry, ConfigStore, Encryption, KeyStatus, StoreOptions};
