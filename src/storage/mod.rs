//! Key-value persistence for the transaction list and the display preference.
//!
//! Backends store opaque string values under string keys. Loading is forgiving:
//! absent or unreadable values fall back to defaults so startup never fails.

pub mod json_backend;
pub mod memory;

use tracing::warn;

use crate::{core::render::DisplayMode, errors::LedgerError, ledger::Ledger};

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Storage key holding the serialized transaction array.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Storage key holding the dark-mode flag.
pub const DARK_MODE_KEY: &str = "dark_mode";

/// Abstraction over string-valued key-value stores.
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}

/// Loads the persisted ledger; missing or corrupt data yields an empty ledger.
pub fn load_ledger<S: StorageBackend + ?Sized>(storage: &S) -> Ledger {
    read_json(storage, TRANSACTIONS_KEY).unwrap_or_default()
}

/// Writes the full transaction list under [`TRANSACTIONS_KEY`].
pub fn save_ledger<S: StorageBackend + ?Sized>(storage: &S, ledger: &Ledger) -> Result<()> {
    let json = serde_json::to_string(ledger)?;
    storage.set_item(TRANSACTIONS_KEY, &json)
}

/// Loads the dark-mode flag; anything unreadable means disabled.
pub fn load_display_mode<S: StorageBackend + ?Sized>(storage: &S) -> DisplayMode {
    read_json(storage, DARK_MODE_KEY).unwrap_or_default()
}

pub fn save_display_mode<S: StorageBackend + ?Sized>(storage: &S, mode: DisplayMode) -> Result<()> {
    let json = serde_json::to_string(&mode)?;
    storage.set_item(DARK_MODE_KEY, &json)
}

fn read_json<S, T>(storage: &S, key: &str) -> Option<T>
where
    S: StorageBackend + ?Sized,
    T: serde::de::DeserializeOwned,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn!(key, error = %err, "failed to read stored value, using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "stored value is not valid, using default");
            None
        }
    }
}
