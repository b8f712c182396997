//! Parsed EC key handle with ECDSA sign / verify over pre-computed digests

use std::fmt;

use crate::curve::Curve;
use crate::error::{EcdsaError, Result};
use crate::format::KeyFormat;
use crate::material::KeyMaterial;
use crate::parser::default_parser;

/// One parsed EC key, private or public.
///
/// The handle owns its key material exclusively and never exposes it for
/// mutation. Secret scalars are wiped when the handle is dropped. `sign` and
/// `verify` take `&self` and are pure functions of key and input, so a handle
/// may be shared across threads (e.g. behind an `Arc`).
pub struct KeyHandle {
    material: KeyMaterial,
    format: KeyFormat,
    can_sign: bool,
}

impl KeyHandle {
    pub(crate) fn new(material: KeyMaterial, format: KeyFormat) -> Self {
        debug_assert_eq!(material.is_signing(), format.is_private());
        Self {
            can_sign: format.is_private(),
            material,
            format,
        }
    }

    /// Parse an EC key from DER or PEM bytes on any supported curve.
    ///
    /// Encodings are tried in a fixed order and the first one that decodes
    /// wins: SEC1 DER private key, SEC1 public point, then PEM. Input starting
    /// with `-----BEGIN PUBLIC KEY-----` is only tried as a SubjectPublicKeyInfo
    /// PEM; other PEM input is tried as PKCS#8 `PRIVATE KEY`, `EC PUBLIC KEY`
    /// and `EC PRIVATE KEY`, in that order.
    ///
    /// Within one encoding every supported curve is tried. Some inputs are
    /// valid on more than one curve: a compressed 33-byte point is often a
    /// point on both P-256 and secp256k1, and a SEC1 private key without
    /// curve parameters is a valid scalar on several curves. Such input is
    /// rejected; parse it with [`KeyParser::with_curves`](crate::KeyParser::with_curves).
    ///
    /// # Errors
    ///
    /// [`EcdsaError::KeyParse`] when no encoding matches, or when the
    /// matching encoding decodes on more than one curve.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        default_parser().parse(bytes)
    }

    /// Sign a pre-computed digest, returning a DER-encoded ECDSA signature.
    ///
    /// The digest is signed as given: no hashing happens here. Nonces are
    /// deterministic (RFC 6979). Digests longer than the curve order are
    /// truncated and shorter digests are taken at their integer value, so a
    /// SHA-1 digest signs on every curve.
    ///
    /// # Errors
    ///
    /// [`EcdsaError::Sign`] if the key is public-only or signing fails.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>> {
        if !self.can_sign {
            return Err(EcdsaError::sign_failed(format!(
                "{} key cannot sign",
                self.format
            )));
        }

        let max_len = self.max_signature_len();
        let mut signature = Vec::with_capacity(max_len);
        self.material
            .sign_prehash(digest, &mut signature)
            .map_err(EcdsaError::sign_failed)?;

        debug_assert!(!signature.is_empty() && signature.len() <= max_len);
        Ok(signature)
    }

    /// Verify a DER-encoded ECDSA signature over a pre-computed digest.
    ///
    /// Returns `Ok(false)` for a well-formed signature that does not match.
    /// Both the low-S and high-S forms of a valid signature verify.
    ///
    /// # Errors
    ///
    /// [`EcdsaError::Verify`] if `signature` cannot be decoded as a DER
    /// signature for this key's curve.
    pub fn verify(&self, signature: &[u8], digest: &[u8]) -> Result<bool> {
        self.material
            .verify_prehash(signature, digest)
            .map_err(EcdsaError::malformed_signature)
    }

    /// Curve this key lives on
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.material.curve()
    }

    /// Encoding the key was parsed from
    #[must_use]
    pub fn format(&self) -> KeyFormat {
        self.format
    }

    /// Whether the key holds a private scalar and can sign
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.can_sign
    }

    /// Upper bound on signature length for this key's curve
    #[must_use]
    pub fn max_signature_len(&self) -> usize {
        self.curve().max_signature_len()
    }

    /// SEC1 encoding of the public key, accepted back by [`KeyHandle::parse`]
    #[must_use]
    pub fn public_key_sec1(&self, compressed: bool) -> Vec<u8> {
        self.material.public_sec1(compressed)
    }
}

impl fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyHandle")
            .field("curve", &self.curve())
            .field("format", &self.format)
            .field("can_sign", &self.can_sign)
            .finish_non_exhaustive()
    }
}
