use keyring::Entry;
use thiserror::Error;
use tracing::{debug, info};

pub const TOKEN_ACCOUNT: &str = "authToken";

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("Credential store error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Where the session token lives between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Overwrites any token already stored.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Returns `false` when there was nothing to delete.
    fn delete(&self) -> Result<bool, TokenStoreError>;
}

/// OS keyring entry under a fixed service and the `authToken` account.
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self) -> Result<Entry, TokenStoreError> {
        Ok(Entry::new(&self.service, TOKEN_ACCOUNT)?)
    }
}

impl TokenStore for KeyringStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.entry()?.set_password(token)?;
        info!("Stored auth token in keyring service '{}'", self.service);
        Ok(())
    }

    fn delete(&self) -> Result<bool, TokenStoreError> {
        match self.entry()?.delete_credential() {
            Ok(()) => {
                info!("Deleted auth token from keyring");
                Ok(true)
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No auth token found in keyring");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
