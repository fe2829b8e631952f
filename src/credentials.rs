//! API key storage via the OS keychain.
//!
//! At startup, [`populate_env_from_keychain`] copies a stored key into the
//! environment so [`crate::config::fetch_config`] picks it up without the
//! user exporting it in every shell.

use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Keychain service name used for all stored credentials.
const SERVICE: &str = "candleterm";

/// Keychain entry holding the market-data API key.
const API_KEY_ID: &str = "market_data_api_key";

/// Environment variable the API key is exposed under.
pub const API_KEY_ENV: &str = "CANDLETERM_API_KEY";

/// Loads the API key from the keychain, returning `None` if not set.
pub fn load_api_key() -> Option<Zeroizing<String>> {
    let entry = keyring::Entry::new(SERVICE, API_KEY_ID).ok()?;
    match entry.get_password() {
        Ok(password) => Some(Zeroizing::new(password)),
        Err(keyring::Error::NoEntry) => None,
        Err(e) => {
            warn!(key = API_KEY_ID, error = %e, "failed to read keychain entry");
            None
        }
    }
}

/// Saves the API key to the keychain.
///
/// # Errors
///
/// Returns [`ChartError::Config`](crate::ChartError::Config) if the keychain
/// is unavailable or rejects the write.
pub fn save_api_key(value: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::ChartError::Config(
            "refusing to store an empty API key".to_string(),
        ));
    }
    let entry = keyring::Entry::new(SERVICE, API_KEY_ID)
        .map_err(|e| crate::ChartError::Config(format!("keyring entry error: {e}")))?;
    entry
        .set_password(value.trim())
        .map_err(|e| crate::ChartError::Config(format!("failed to save to keychain: {e}")))
}

/// Sets `CANDLETERM_API_KEY` from the keychain if the environment does not
/// already provide it.
///
/// Call this at startup before [`crate::config::fetch_config`].
pub fn populate_env_from_keychain() {
    if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.is_empty()) {
        return;
    }
    if let Some(value) = load_api_key() {
        debug!(key = API_KEY_ENV, "loaded credential from keychain");
        // SAFETY: called before any tokio tasks are spawned
        unsafe {
            std::env::set_var(API_KEY_ENV, value.as_str());
        }
    }
}
