//! Auth-domain models: credentials, payload signing, bearer tokens, and session nonces.

pub mod credentials;
pub mod nonce;
pub mod signer;
pub mod token;

pub use credentials::*;
pub use nonce::*;
pub use signer::*;
pub use token::*;
