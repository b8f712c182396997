//! Curve-specific key material backed by the RustCrypto curve crates
//!
//! Each backend module wraps one curve crate's `SigningKey` / `VerifyingKey`
//! pair behind the same small surface, and [`KeyMaterial`] dispatches to the
//! backend for the curve a key was decoded on.

use std::borrow::Cow;

use crate::curve::Curve;

/// Binary encodings a backend knows how to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    /// SEC1 `ECPrivateKey` DER
    Sec1Der,
    /// SEC1 elliptic-curve point (compressed or uncompressed)
    Sec1Point,
    /// PKCS#8 `PrivateKeyInfo` DER
    Pkcs8Der,
    /// X.509 `SubjectPublicKeyInfo` DER
    SpkiDer,
}

macro_rules! curve_backend {
    ($(#[$meta:meta])* $module:ident, $krate:ident) => {
        $(#[$meta])*
        pub(crate) mod $module {
            use $krate::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
            use $krate::ecdsa::{Signature, SigningKey, VerifyingKey};
            use $krate::pkcs8::{DecodePrivateKey, DecodePublicKey};
            use $krate::SecretKey;

            use super::Encoding;

            pub(crate) enum Key {
                Signing(SigningKey),
                Verifying(VerifyingKey),
            }

            impl Key {
                pub(crate) fn decode(encoding: Encoding, bytes: &[u8]) -> Result<Self, String> {
                    match encoding {
                        Encoding::Sec1Der => SecretKey::from_sec1_der(bytes)
                            .map(|secret| Self::Signing(SigningKey::from(secret)))
                            .map_err(|e| e.to_string()),
                        Encoding::Sec1Point => VerifyingKey::from_sec1_bytes(bytes)
                            .map(Self::Verifying)
                            .map_err(|e| e.to_string()),
                        Encoding::Pkcs8Der => SigningKey::from_pkcs8_der(bytes)
                            .map(Self::Signing)
                            .map_err(|e| e.to_string()),
                        Encoding::SpkiDer => VerifyingKey::from_public_key_der(bytes)
                            .map(Self::Verifying)
                            .map_err(|e| e.to_string()),
                    }
                }

                fn verifying_key(&self) -> &VerifyingKey {
                    match self {
                        Self::Signing(key) => key.verifying_key(),
                        Self::Verifying(key) => key,
                    }
                }

                pub(crate) fn is_signing(&self) -> bool {
                    matches!(self, Self::Signing(_))
                }

                pub(crate) fn sign_prehash(
                    &self,
                    digest: &[u8],
                    out: &mut Vec<u8>,
                ) -> Result<(), String> {
                    let Self::Signing(key) = self else {
                        return Err("key material holds no private scalar".to_string());
                    };
                    let signature = PrehashSigner::<Signature>::sign_prehash(key, digest)
                        .map_err(|e| e.to_string())?;
                    out.extend_from_slice(signature.to_der().as_bytes());
                    Ok(())
                }

                pub(crate) fn verify_prehash(
                    &self,
                    signature: &[u8],
                    digest: &[u8],
                ) -> Result<bool, String> {
                    let signature = Signature::from_der(signature).map_err(|e| e.to_string())?;
                    // (r, s) and (r, n - s) are both valid; the verifier only takes low-S.
                    let signature = signature.normalize_s().unwrap_or(signature);
                    Ok(self
                        .verifying_key()
                        .verify_prehash(digest, &signature)
                        .is_ok())
                }

                pub(crate) fn public_sec1(&self, compressed: bool) -> Vec<u8> {
                    self.verifying_key()
                        .to_encoded_point(compressed)
                        .as_bytes()
                        .to_vec()
                }
            }
        }
    };
}

curve_backend!(
    /// NIST P-256 backend
    p256_backend,
    p256
);
curve_backend!(
    /// secp256k1 backend, signatures are low-S normalized on signing
    k256_backend,
    k256
);
curve_backend!(
    /// NIST P-384 backend
    p384_backend,
    p384
);

/// Decoded key for one of the supported curves
pub(crate) enum KeyMaterial {
    P256(p256_backend::Key),
    Secp256k1(k256_backend::Key),
    P384(p384_backend::Key),
}

/// Left-pad `digest` with zeros up to `field_size` bytes.
///
/// The prehash primitives reject digests shorter than half the field size.
/// Zero-padding keeps the integer value of the digest, which is what ECDSA
/// signs for digests narrower than the curve order.
fn prehash_input(digest: &[u8], field_size: usize) -> Cow<'_, [u8]> {
    if digest.len() >= field_size {
        return Cow::Borrowed(digest);
    }
    let mut padded = vec![0u8; field_size];
    padded[field_size - digest.len()..].copy_from_slice(digest);
    Cow::Owned(padded)
}

macro_rules! with_key {
    ($material:expr, $key:ident => $body:expr) => {
        match $material {
            KeyMaterial::P256($key) => $body,
            KeyMaterial::Secp256k1($key) => $body,
            KeyMaterial::P384($key) => $body,
        }
    };
}

impl KeyMaterial {
    /// Decode `bytes` as `encoding` on `curve`
    pub(crate) fn decode(curve: Curve, encoding: Encoding, bytes: &[u8]) -> Result<Self, String> {
        match curve {
            Curve::P256 => p256_backend::Key::decode(encoding, bytes).map(Self::P256),
            Curve::Secp256k1 => k256_backend::Key::decode(encoding, bytes).map(Self::Secp256k1),
            Curve::P384 => p384_backend::Key::decode(encoding, bytes).map(Self::P384),
        }
    }

    pub(crate) fn curve(&self) -> Curve {
        match self {
            Self::P256(_) => Curve::P256,
            Self::Secp256k1(_) => Curve::Secp256k1,
            Self::P384(_) => Curve::P384,
        }
    }

    pub(crate) fn is_signing(&self) -> bool {
        with_key!(self, key => key.is_signing())
    }

    /// Append the DER signature over `digest` to `out`
    pub(crate) fn sign_prehash(&self, digest: &[u8], out: &mut Vec<u8>) -> Result<(), String> {
        let digest = prehash_input(digest, self.curve().field_size());
        with_key!(self, key => key.sign_prehash(&digest, out))
    }

    /// `Err` only when `signature` is not a decodable DER signature
    pub(crate) fn verify_prehash(&self, signature: &[u8], digest: &[u8]) -> Result<bool, String> {
        let digest = prehash_input(digest, self.curve().field_size());
        with_key!(self, key => key.verify_prehash(signature, &digest))
    }

    pub(crate) fn public_sec1(&self, compressed: bool) -> Vec<u8> {
        with_key!(self, key => key.public_sec1(compressed))
    }
}
