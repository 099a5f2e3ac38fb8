//
//  samplify
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Secret Storage
//!
//! The CLI never writes the client secret to its config file. `auth login`
//! stores it in the platform keyring instead (Keychain on macOS, Secret
//! Service on Linux, Credential Manager on Windows), keyed by client ID.
//!
//! ## Storage Model
//!
//! - **Service**: `samplify`
//! - **Username/Key**: the client ID
//! - **Password/Value**: the client secret
//!
//! ## Example
//!
//! ```rust,no_run
//! use samplify::auth::KeyringStore;
//!
//! fn manage_secret() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!
//!     store.store("my-client-id", "my-client-secret")?;
//!
//!     if let Some(secret) = store.get("my-client-id")? {
//!         println!("Found secret of {} characters", secret.len());
//!     }
//!
//!     store.delete("my-client-id")?;
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use keyring::Entry;

/// The service name identifying this application in the system keyring.
const SERVICE_NAME: &str = "samplify";

/// Client secret storage in the system's native keyring.
///
/// # Notes
///
/// - No keyring access happens at construction; each call opens its entry.
/// - On Linux a secret service daemon (GNOME Keyring, KWallet) must be running.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores the secret for `client_id`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Fails when the keyring service is unavailable or access is denied.
    pub fn store(&self, client_id: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(&self.service, client_id)?;
        entry
            .set_password(secret)
            .with_context(|| format!("Failed to store secret for client '{}' in keyring", client_id))?;
        tracing::debug!("Stored client secret for {} in keyring", client_id);
        Ok(())
    }

    /// Looks up the secret for `client_id`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no entry exists; errors only for keyring failures.
    pub fn get(&self, client_id: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, client_id)?;
        match entry.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read client secret from keyring"),
        }
    }

    /// Removes the secret for `client_id`. Deleting a missing entry succeeds.
    pub fn delete(&self, client_id: &str) -> Result<()> {
        let entry = Entry::new(&self.service, client_id)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete client secret from keyring"),
        }
    }
}
