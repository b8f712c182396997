//! Error handling for EC key parsing, signing and verification

use thiserror::Error;

/// ECDSA key-handle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcdsaError {
    /// None of the supported key encodings matched the input
    #[error("Failed to parse key: no recognized key encoding")]
    KeyParse,

    /// The signing primitive failed or the key cannot sign
    #[error("Failed to sign the digest: {0}")]
    Sign(String),

    /// The signature bytes are not a decodable ECDSA signature
    #[error("Failed to decode the signature: {0}")]
    Verify(String),

    /// Parser configuration is unusable
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl EcdsaError {
    /// Create a signing error
    #[inline]
    pub fn sign_failed(msg: impl Into<String>) -> Self {
        Self::Sign(msg.into())
    }

    /// Create a signature decoding error
    #[inline]
    pub fn malformed_signature(msg: impl Into<String>) -> Self {
        Self::Verify(msg.into())
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether this error came from key parsing
    #[must_use]
    pub fn is_key_parse(&self) -> bool {
        matches!(self, Self::KeyParse)
    }

    /// Whether this error came from signing
    #[must_use]
    pub fn is_sign(&self) -> bool {
        matches!(self, Self::Sign(_))
    }

    /// Whether this error came from decoding a signature during verification
    #[must_use]
    pub fn is_verify(&self) -> bool {
        matches!(self, Self::Verify(_))
    }
}

/// Result type for ECDSA key operations
pub type Result<T> = std::result::Result<T, EcdsaError>;
