//! Key encodings and the ordered chain used to detect them
//!
//! Key encodings are not self-describing, so detection walks a fixed list of
//! `(KeyFormat, decoder)` pairs and stops at the first decoder that succeeds.

use std::fmt;

use der::pem;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::curve::Curve;
use crate::material::{Encoding, KeyMaterial};

/// Textual marker that routes PEM input to the public-key decoder only
pub const PUBLIC_KEY_PEM_PREFIX: &[u8] = b"-----BEGIN PUBLIC KEY-----";

const PEM_LABEL_PUBLIC_KEY: &str = "PUBLIC KEY";
const PEM_LABEL_PRIVATE_KEY: &str = "PRIVATE KEY";
const PEM_LABEL_EC_PUBLIC_KEY: &str = "EC PUBLIC KEY";
const PEM_LABEL_EC_PRIVATE_KEY: &str = "EC PRIVATE KEY";

/// Encoding a key was recognized as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyFormat {
    /// Binary SEC1 `ECPrivateKey` DER
    DerEcPrivateKey,
    /// Binary SEC1 public point
    DerEcPublicPoint,
    /// PEM `PUBLIC KEY` (SubjectPublicKeyInfo)
    PemPublicKey,
    /// PEM `PRIVATE KEY` (PKCS#8)
    PemPrivateKey,
    /// PEM `EC PUBLIC KEY`
    PemEcPublicKey,
    /// PEM `EC PRIVATE KEY` (SEC1)
    PemEcPrivateKey,
}

impl KeyFormat {
    /// Whether keys in this format carry a private scalar
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(
            self,
            KeyFormat::DerEcPrivateKey | KeyFormat::PemPrivateKey | KeyFormat::PemEcPrivateKey
        )
    }

    /// Whether this is a PEM (textual) format
    #[must_use]
    pub const fn is_pem(self) -> bool {
        !matches!(self, KeyFormat::DerEcPrivateKey | KeyFormat::DerEcPublicPoint)
    }

    /// Human-readable format name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KeyFormat::DerEcPrivateKey => "DER EC private key",
            KeyFormat::DerEcPublicPoint => "DER EC public point",
            KeyFormat::PemPublicKey => "PEM public key",
            KeyFormat::PemPrivateKey => "PEM private key",
            KeyFormat::PemEcPublicKey => "PEM EC public key",
            KeyFormat::PemEcPrivateKey => "PEM EC private key",
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded PEM document, body wiped on drop
struct PemDocument {
    label: String,
    body: Zeroizing<Vec<u8>>,
}

/// Input bytes plus a lazily decoded PEM view shared by the PEM decoders
pub(crate) struct ParseInput<'a> {
    bytes: &'a [u8],
    pem: OnceCell<Result<PemDocument, String>>,
}

impl<'a> ParseInput<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pem: OnceCell::new(),
        }
    }

    /// PEM body, if the input is a PEM document with the given label
    fn pem_body(&self, label: &str) -> Result<&[u8], String> {
        let document = self
            .pem
            .get_or_init(|| {
                pem::decode_vec(self.bytes)
                    .map(|(label, body)| PemDocument {
                        label: label.to_owned(),
                        body: Zeroizing::new(body),
                    })
                    .map_err(|e| format!("not a PEM document: {e}"))
            })
            .as_ref()
            .map_err(Clone::clone)?;

        if document.label != label {
            return Err(format!(
                "PEM label is {:?}, expected {label:?}",
                document.label
            ));
        }
        Ok(&document.body)
    }
}

type DecodeFn = fn(&ParseInput<'_>, Curve) -> Result<KeyMaterial, String>;

/// Decoders tried when the input starts with [`PUBLIC_KEY_PEM_PREFIX`]
const PUBLIC_PEM_CHAIN: [(KeyFormat, DecodeFn); 3] = [
    (KeyFormat::DerEcPrivateKey, decode_der_private),
    (KeyFormat::DerEcPublicPoint, decode_der_point),
    (KeyFormat::PemPublicKey, decode_pem_public),
];

/// Decoders tried for every other input
const DEFAULT_CHAIN: [(KeyFormat, DecodeFn); 5] = [
    (KeyFormat::DerEcPrivateKey, decode_der_private),
    (KeyFormat::DerEcPublicPoint, decode_der_point),
    (KeyFormat::PemPrivateKey, decode_pem_private),
    (KeyFormat::PemEcPublicKey, decode_pem_ec_public),
    (KeyFormat::PemEcPrivateKey, decode_pem_ec_private),
];

/// Ordered decode chain for `bytes`
pub(crate) fn decode_chain(bytes: &[u8]) -> &'static [(KeyFormat, DecodeFn)] {
    // starts_with is length-guarded, short input just doesn't match
    if bytes.starts_with(PUBLIC_KEY_PEM_PREFIX) {
        &PUBLIC_PEM_CHAIN
    } else {
        &DEFAULT_CHAIN
    }
}

fn decode_der_private(input: &ParseInput<'_>, curve: Curve) -> Result<KeyMaterial, String> {
    KeyMaterial::decode(curve, Encoding::Sec1Der, input.bytes)
}

fn decode_der_point(input: &ParseInput<'_>, curve: Curve) -> Result<KeyMaterial, String> {
    KeyMaterial::decode(curve, Encoding::Sec1Point, input.bytes)
}

fn decode_pem_public(input: &ParseInput<'_>, curve: Curve) -> Result<KeyMaterial, String> {
    let body = input.pem_body(PEM_LABEL_PUBLIC_KEY)?;
    KeyMaterial::decode(curve, Encoding::SpkiDer, body)
}

fn decode_pem_private(input: &ParseInput<'_>, curve: Curve) -> Result<KeyMaterial, String> {
    let body = input.pem_body(PEM_LABEL_PRIVATE_KEY)?;
    KeyMaterial::decode(curve, Encoding::Pkcs8Der, body)
}

fn decode_pem_ec_public(input: &ParseInput<'_>, curve: Curve) -> Result<KeyMaterial, String> {
    let body = input.pem_body(PEM_LABEL_EC_PUBLIC_KEY)?;
    // Body is usually a SubjectPublicKeyInfo; some tools emit the bare point.
    KeyMaterial::decode(curve, Encoding::SpkiDer, body)
        .or_else(|spki_err| {
            KeyMaterial::decode(curve, Encoding::Sec1Point, body)
                .map_err(|point_err| format!("{spki_err}; {point_err}"))
        })
}

fn decode_pem_ec_private(input: &ParseInput<'_>, curve: Curve) -> Result<KeyMaterial, String> {
    let body = input.pem_body(PEM_LABEL_EC_PRIVATE_KEY)?;
    KeyMaterial::decode(curve, Encoding::Sec1Der, body)
}
