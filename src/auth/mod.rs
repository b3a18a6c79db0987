pub mod token;
pub mod validate;

pub use self::token::{KeyringStore, TokenStore, TokenStoreError};
pub use self::validate::{ValidationError, validate_credentials};
