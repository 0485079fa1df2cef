//! Transcoder configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::RuleError;

/// Line terminator used when rendering rule text.
///
/// The claim engine itself stores rules with CRLF; LF is friendlier for
/// configuration files and diffs. Parsing accepts both regardless of this setting.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Parse a configured name (`lf` / `crlf`), mapping failures into the crate error.
    pub fn from_name(name: &str) -> Result<Self, RuleError> {
        LineEnding::from_str(name).map_err(|_| {
            RuleError::InvalidFormat(format!(
                "unknown line ending '{name}' (expected 'lf' or 'crlf')"
            ))
        })
    }
}

/// Configuration for [`Serializer`](crate::Serializer).
///
/// ```
/// use claims_rules_core::{LineEnding, TranscoderConfig};
///
/// let config = TranscoderConfig::builder()
///     .line_ending(LineEnding::Crlf)
///     .build();
/// assert_eq!(config.line_ending, LineEnding::Crlf);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranscoderConfig {
    /// Line terminator for rendered rules. Default: LF
    pub line_ending: LineEnding,
}

impl TranscoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TranscoderConfigBuilder {
        TranscoderConfigBuilder::default()
    }

    /// The configuration the claim engine expects on the wire.
    pub fn engine() -> Self {
        Self {
            line_ending: LineEnding::Crlf,
        }
    }
}

/// Builder for `TranscoderConfig`.
#[derive(Debug, Clone, Default)]
pub struct TranscoderConfigBuilder {
    line_ending: Option<LineEnding>,
}

impl TranscoderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = Some(line_ending);
        self
    }

    pub fn build(self) -> TranscoderConfig {
        TranscoderConfig {
            line_ending: self.line_ending.unwrap_or_default(),
        }
    }
}
