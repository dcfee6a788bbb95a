//! Core types for gain map metadata handling.

use alloc::format;
use alloc::string::String;
use thiserror::Error;

/// Errors that can occur during metadata parsing, generation, or buffer
/// writes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The metadata packet is too short, oversized, or its namespace
    /// declaration does not match.
    #[error("invalid metadata packet: {0}")]
    InvalidPacket(String),

    /// The XML tokenizer reported a structural error.
    #[error("XMP parsing error: {0}")]
    XmpParse(String),

    /// A required attribute was not found in the packet.
    #[error("could not find attribute {0}")]
    MissingAttribute(&'static str),

    /// An attribute was present but its value could not be coerced to its
    /// target type.
    #[error("unable to parse attribute {0}")]
    MalformedAttribute(&'static str),

    /// The packet requests a mode this implementation does not support.
    #[error("unsupported metadata: {0}")]
    Unsupported(&'static str),

    /// Metadata field values are out of range or not finite.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// A write into a caller-owned destination buffer would exceed its
    /// capacity.
    #[error(
        "output buffer to store compressed data is too small: \
         write position: {position}, size: {size}, capacity: {capacity}"
    )]
    BufferOverflow {
        /// Write cursor at the time of the attempt.
        position: usize,
        /// Number of bytes that were to be written.
        size: usize,
        /// Total capacity of the destination buffer.
        capacity: usize,
    },
}

/// Result type for gain map metadata operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Gain map metadata (linear scale values).
///
/// These values describe how to apply a gain map to reconstruct the HDR
/// rendition from the SDR base image. Boost and capacity fields are stored
/// here as linear multipliers; their XMP textual form is the base-2
/// logarithm.
#[derive(Debug, Clone, PartialEq)]
pub struct GainMapMetadata {
    /// Gain map format version, written verbatim to and from XMP.
    pub version: String,

    /// Minimum content boost (HDR/SDR ratio). Allows darkening as well as
    /// brightening.
    pub min_content_boost: f32,

    /// Maximum content boost (HDR/SDR ratio).
    pub max_content_boost: f32,

    /// Gamma applied to the gain map encoding.
    pub gamma: f32,

    /// Offset added to SDR values before gain computation.
    pub offset_sdr: f32,

    /// Offset added to HDR values before gain computation.
    pub offset_hdr: f32,

    /// Minimum display boost for which the gain map is fully applied.
    pub hdr_capacity_min: f32,

    /// Maximum display boost the gain map is designed to target.
    pub hdr_capacity_max: f32,

    /// Whether the base rendition is the HDR image. Decoding rejects `true`;
    /// the encoder always writes `"False"`.
    pub base_rendition_is_hdr: bool,
}

impl Default for GainMapMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl GainMapMetadata {
    /// Create metadata with default values per the Ultra HDR spec.
    pub fn new() -> Self {
        Self {
            version: String::from("1.0"),
            min_content_boost: 1.0,
            max_content_boost: 1.0,
            gamma: 1.0,
            offset_sdr: 1.0 / 64.0, // 0.015625
            offset_hdr: 1.0 / 64.0,
            hdr_capacity_min: 1.0,
            hdr_capacity_max: 1.0,
            base_rendition_is_hdr: false,
        }
    }

    /// Validate metadata values are within reasonable bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.max_content_boost.is_finite() || self.max_content_boost <= 0.0 {
            return Err(Error::InvalidMetadata(
                "max_content_boost must be positive finite".into(),
            ));
        }
        if !self.min_content_boost.is_finite() || self.min_content_boost <= 0.0 {
            return Err(Error::InvalidMetadata(
                "min_content_boost must be positive finite".into(),
            ));
        }
        if self.min_content_boost > self.max_content_boost {
            return Err(Error::InvalidMetadata(format!(
                "min_content_boost ({}) > max_content_boost ({})",
                self.min_content_boost, self.max_content_boost
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::InvalidMetadata(
                "gamma must be positive finite".into(),
            ));
        }
        if !self.offset_sdr.is_finite() {
            return Err(Error::InvalidMetadata("offset_sdr must be finite".into()));
        }
        if !self.offset_hdr.is_finite() {
            return Err(Error::InvalidMetadata("offset_hdr must be finite".into()));
        }
        if !self.hdr_capacity_min.is_finite() || self.hdr_capacity_min < 0.0 {
            return Err(Error::InvalidMetadata(
                "hdr_capacity_min must be non-negative finite".into(),
            ));
        }
        if !self.hdr_capacity_max.is_finite() || self.hdr_capacity_max < 1.0 {
            return Err(Error::InvalidMetadata(
                "hdr_capacity_max must be >= 1.0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_defaults() {
        let metadata = GainMapMetadata::new();
        assert_eq!(metadata.version, "1.0");
        assert_eq!(metadata.offset_sdr, 0.015625);
        assert!(!metadata.base_rendition_is_hdr);
        assert!(metadata.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_min_gt_max_boost() {
        let metadata = GainMapMetadata {
            min_content_boost: 5.0,
            max_content_boost: 2.0,
            hdr_capacity_max: 5.0,
            ..GainMapMetadata::new()
        };
        let msg = metadata.validate().unwrap_err().to_string();
        assert!(
            msg.contains("min_content_boost"),
            "error should mention min_content_boost: {}",
            msg
        );
    }

    #[test]
    fn test_validate_rejects_nan_and_negatives() {
        let base = GainMapMetadata {
            max_content_boost: 4.0,
            hdr_capacity_max: 4.0,
            ..GainMapMetadata::new()
        };
        assert!(base.validate().is_ok());

        let mut m = base.clone();
        m.gamma = -1.0;
        assert!(m.validate().is_err());

        let mut m = base.clone();
        m.max_content_boost = f32::NAN;
        assert!(m.validate().is_err());

        let mut m = base.clone();
        m.offset_hdr = f32::INFINITY;
        assert!(m.validate().is_err());

        let mut m = base;
        m.hdr_capacity_max = 0.5;
        assert!(m.validate().is_err());
    }
}
