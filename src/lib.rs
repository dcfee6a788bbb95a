//! Gain map XMP metadata for Ultra HDR images.
//!
//! Ultra HDR stores HDR content in a backwards-compatible JPEG: an SDR base
//! image plus a compressed gain map, glued together by XMP metadata. This
//! crate handles the metadata side of that container:
//!
//! - Parsing the embedded XMP packet (Adobe `hdrgm` namespace) into a typed
//!   [`GainMapMetadata`] record, with required/optional field policy and
//!   log2 → linear conversion of boost and capacity values.
//! - Serializing the two XMP documents an Ultra HDR file carries: the
//!   container directory for the primary image and the standalone gain map
//!   parameters for the secondary image.
//! - Bounded, all-or-nothing append buffers ([`buffer::DataBuffer`] and
//!   [`buffer::write_to`]) used when assembling the compressed output.
//!
//! This crate has **no JPEG codec dependency** and performs no I/O; callers
//! hand it byte ranges and records. All operations are synchronous and work
//! on caller-owned memory.
//!
//! # Example
//!
//! ```
//! use ultrahdr_xmp::{generate_gainmap_xmp, parse_xmp_packet, GainMapMetadata};
//!
//! let metadata = GainMapMetadata {
//!     max_content_boost: 4.0,
//!     hdr_capacity_max: 4.0,
//!     ..GainMapMetadata::new()
//! };
//!
//! let xmp = generate_gainmap_xmp(&metadata);
//!
//! let mut packet = ultrahdr_xmp::xmp::XAP_NAMESPACE.to_vec();
//! packet.extend_from_slice(xmp.as_bytes());
//! let parsed = parse_xmp_packet(&packet).unwrap();
//! assert!((parsed.max_content_boost - 4.0).abs() < 1e-4);
//! ```
//!
//! # Standards
//!
//! - [Ultra HDR Image Format v1.1](https://developer.android.com/media/platform/hdr-image-format)
//! - Adobe XMP (hdrgm namespace)

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

pub mod buffer;
pub mod xml;
pub mod xmp;

mod types;

pub use buffer::{write_to, DataBuffer};
pub use types::{Error, GainMapMetadata, Result};
pub use xmp::{generate_container_xmp, generate_gainmap_xmp, parse_xmp_packet};

/// Safety limits for parsing.
pub mod limits {
    /// Maximum XMP packet length to parse (16 MB).
    pub const MAX_XMP_LENGTH: usize = 16 * 1024 * 1024;
}
