//! Shared fixtures: freshly generated keys in every supported encoding

#![allow(dead_code)]

use cryypt_ecdsa::Curve;
use rand::Rng;
use sha2::{Digest, Sha256, Sha384};

/// One key pair encoded every way the parser understands
pub struct EncodedKey {
    pub curve: Curve,
    pub sec1_der: Vec<u8>,
    pub public_point: Vec<u8>,
    pub public_point_compressed: Vec<u8>,
    pub pkcs8_pem: String,
    pub spki_pem: String,
    pub ec_public_pem: String,
    pub sec1_pem: String,
}

macro_rules! encode_key {
    ($krate:ident, $curve:expr) => {{
        use $krate::elliptic_curve::sec1::ToEncodedPoint;
        use $krate::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};

        let mut rng = rand::rng();
        let secret = loop {
            let mut bytes = vec![0u8; $curve.field_size()];
            rng.fill(&mut bytes[..]);
            if let Ok(secret) = $krate::SecretKey::from_slice(&bytes) {
                break secret;
            }
        };
        let public = secret.public_key();
        let spki_der = public.to_public_key_der().unwrap();

        EncodedKey {
            curve: $curve,
            sec1_der: secret.to_sec1_der().unwrap().to_vec(),
            public_point: public.to_encoded_point(false).as_bytes().to_vec(),
            public_point_compressed: public.to_encoded_point(true).as_bytes().to_vec(),
            pkcs8_pem: secret.to_pkcs8_pem(LineEnding::LF).unwrap().to_string(),
            spki_pem: public.to_public_key_pem(LineEnding::LF).unwrap(),
            ec_public_pem: der::pem::encode_string(
                "EC PUBLIC KEY",
                LineEnding::LF,
                spki_der.as_bytes(),
            )
            .unwrap(),
            sec1_pem: secret.to_sec1_pem(LineEnding::LF).unwrap().to_string(),
        }
    }};
}

/// Generate a fresh key pair on `curve`
pub fn generate(curve: Curve) -> EncodedKey {
    match curve {
        Curve::P256 => encode_key!(p256, Curve::P256),
        Curve::Secp256k1 => encode_key!(k256, Curve::Secp256k1),
        Curve::P384 => encode_key!(p384, Curve::P384),
    }
}

/// Digest sized for `curve`
pub fn digest_for(curve: Curve, message: &[u8]) -> Vec<u8> {
    match curve {
        Curve::P384 => Sha384::digest(message).to_vec(),
        Curve::P256 | Curve::Secp256k1 => Sha256::digest(message).to_vec(),
    }
}

/// Route crate tracing output to the test harness, honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
