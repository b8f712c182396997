//! # Cyrup ECDSA key handles
//!
//! Parse elliptic-curve keys from whatever encoding they arrive in, then
//! sign and verify pre-computed digests with ECDSA.
//!
//! ## Features
//!
//! - **Format detection**: SEC1 DER private keys, SEC1 public points, PEM
//!   `PUBLIC KEY`, `PRIVATE KEY`, `EC PUBLIC KEY` and `EC PRIVATE KEY`
//! - **Curves**: P-256, secp256k1 and P-384
//! - **Digest signing**: callers hash, this crate only signs the digest
//! - **DER signatures**: malformed signatures are errors, mismatches are `false`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cryypt_ecdsa::KeyHandle;
//!
//! # fn main() -> Result<(), cryypt_ecdsa::EcdsaError> {
//! let pem = std::fs::read("key.pem").unwrap_or_default();
//! let key = KeyHandle::parse(&pem)?;
//!
//! let digest = [0u8; 32]; // SHA-256 of the message, computed by the caller
//! let signature = key.sign(&digest)?;
//! assert!(key.verify(&signature, &digest)?);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod curve;
pub mod error;
pub mod format;
pub mod key;
mod material;
pub mod parser;

pub use curve::Curve;
pub use error::{EcdsaError, Result};
pub use format::{KeyFormat, PUBLIC_KEY_PEM_PREFIX};
pub use key::KeyHandle;
pub use parser::{KeyParser, ParserConfig};

/// Main entry point for EC key operations
pub struct Ecdsa;

impl Ecdsa {
    /// Parse a key with the default parser, same as [`KeyHandle::parse`]
    pub fn key(bytes: &[u8]) -> Result<KeyHandle> {
        KeyHandle::parse(bytes)
    }

    /// Configurable parser
    #[must_use]
    pub fn parser() -> KeyParser {
        KeyParser::new()
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Curve, EcdsaError, Ecdsa, KeyFormat, KeyHandle, KeyParser, Result};
}
