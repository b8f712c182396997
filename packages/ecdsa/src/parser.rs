//! Key parsing: format detection across the enabled curves

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::curve::Curve;
use crate::error::{EcdsaError, Result};
use crate::format::{KeyFormat, ParseInput, decode_chain};
use crate::key::KeyHandle;
use crate::material::KeyMaterial;

/// Parser used by [`KeyHandle::parse`], built once per process
static DEFAULT_PARSER: Lazy<KeyParser> = Lazy::new(|| {
    let parser = KeyParser::new();
    debug!(curves = ?parser.config.curves, "EC key parser initialized");
    parser
});

pub(crate) fn default_parser() -> &'static KeyParser {
    &DEFAULT_PARSER
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Curves to try, in order, for every key format
    pub curves: Vec<Curve>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            curves: Curve::ALL.to_vec(),
        }
    }
}

impl ParserConfig {
    /// Check the configuration can parse anything at all
    pub fn validate(&self) -> Result<()> {
        if self.curves.is_empty() {
            return Err(EcdsaError::configuration("no curves enabled"));
        }
        Ok(())
    }
}

/// One failed decode attempt
#[derive(Debug)]
struct AttemptFailure {
    format: KeyFormat,
    curve: Curve,
    reason: String,
}

/// Failures accumulated while walking the decode chain.
///
/// Always consumed by [`ParseContext::reset`] before `parse` returns, so no
/// failure detail outlives the call that produced it.
#[derive(Debug, Default)]
struct ParseContext {
    failures: Vec<AttemptFailure>,
}

impl ParseContext {
    fn record(&mut self, format: KeyFormat, curve: Curve, reason: String) {
        self.failures.push(AttemptFailure {
            format,
            curve,
            reason,
        });
    }

    fn reset(&mut self) {
        for failure in self.failures.drain(..) {
            trace!(
                format = %failure.format,
                curve = %failure.curve,
                reason = %failure.reason,
                "key decode attempt failed"
            );
        }
    }
}

/// Builder-style EC key parser
///
/// ```rust
/// use cryypt_ecdsa::{Curve, KeyParser};
///
/// let parser = KeyParser::new().with_curves([Curve::P256]);
/// assert!(parser.parse(b"not a key").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyParser {
    config: ParserConfig,
}

impl KeyParser {
    /// Parser accepting every supported curve
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser from an explicit configuration
    pub fn from_config(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Restrict parsing to `curves`, tried in the given order
    #[must_use]
    pub fn with_curves(mut self, curves: impl IntoIterator<Item = Curve>) -> Self {
        let mut enabled = Vec::new();
        for curve in curves {
            if !enabled.contains(&curve) {
                enabled.push(curve);
            }
        }
        self.config.curves = enabled;
        self
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `bytes` as an EC key, returning the first encoding that decodes.
    ///
    /// Every enabled curve is tried for each encoding. An encoding that
    /// decodes on more than one of them is [`EcdsaError::KeyParse`].
    pub fn parse(&self, bytes: &[u8]) -> Result<KeyHandle> {
        self.config.validate()?;

        let input = ParseInput::new(bytes);
        let mut context = ParseContext::default();

        for (format, decode) in decode_chain(bytes) {
            let mut decoded: Option<KeyMaterial> = None;
            for &curve in &self.config.curves {
                match decode(&input, curve) {
                    Ok(material) => {
                        if let Some(first) = &decoded {
                            context.reset();
                            debug!(
                                format = %format,
                                first = %first.curve(),
                                second = %curve,
                                "key encoding is valid on more than one curve"
                            );
                            return Err(EcdsaError::KeyParse);
                        }
                        decoded = Some(material);
                    }
                    Err(reason) => context.record(*format, curve, reason),
                }
            }

            if let Some(material) = decoded {
                context.reset();
                debug!(format = %format, curve = %material.curve(), "parsed EC key");
                return Ok(KeyHandle::new(material, *format));
            }
        }

        context.reset();
        debug!(len = bytes.len(), "no recognized key encoding");
        Err(EcdsaError::KeyParse)
    }
}
