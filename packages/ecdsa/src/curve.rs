//! Supported elliptic curves

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EcdsaError;

/// Elliptic curves a [`KeyHandle`](crate::KeyHandle) can hold keys for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    /// NIST P-256 (secp256r1, prime256v1)
    #[serde(rename = "P-256")]
    P256,
    /// secp256k1
    #[serde(rename = "secp256k1")]
    Secp256k1,
    /// NIST P-384 (secp384r1)
    #[serde(rename = "P-384")]
    P384,
}

impl Curve {
    /// All supported curves, in the order key parsing tries them
    pub const ALL: [Curve; 3] = [Curve::P256, Curve::Secp256k1, Curve::P384];

    /// Canonical curve name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::Secp256k1 => "secp256k1",
            Curve::P384 => "P-384",
        }
    }

    /// Size of a field element / scalar in bytes
    #[must_use]
    pub const fn field_size(self) -> usize {
        match self {
            Curve::P256 | Curve::Secp256k1 => 32,
            Curve::P384 => 48,
        }
    }

    /// Upper bound on the length of a DER-encoded ECDSA signature for this curve.
    ///
    /// A signature is `SEQUENCE { INTEGER r, INTEGER s }`; each integer may carry
    /// a leading zero byte, and every header is at most two bytes at these sizes.
    #[must_use]
    pub const fn max_signature_len(self) -> usize {
        6 + 2 * (self.field_size() + 1)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Curve {
    type Err = EcdsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "secp256r1" | "prime256v1" => Ok(Curve::P256),
            "secp256k1" | "k256" => Ok(Curve::Secp256k1),
            "p-384" | "p384" | "secp384r1" => Ok(Curve::P384),
            other => Err(EcdsaError::configuration(format!(
                "unsupported curve: {other}"
            ))),
        }
    }
}
