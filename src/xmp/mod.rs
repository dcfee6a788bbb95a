//! Gain map XMP: fixed names, scanner, decoder, and serializers.

pub mod decode;
pub mod encode;
pub mod scanner;

pub use decode::parse_xmp_packet;
pub use encode::{generate_container_xmp, generate_gainmap_xmp};
pub use scanner::{advance, ScanState, XmpAttr, XmpScanner};

/// XMP identifier prefixing the packet inside an APP1 segment, including the
/// terminating NUL.
pub const XAP_NAMESPACE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

/// XMP namespace URI for HDR gain map metadata.
pub const HDRGM_NAMESPACE: &str = "http://ns.adobe.com/hdr-gain-map/1.0/";
/// Namespace prefix for gain map attributes.
pub const HDRGM_PREFIX: &str = "hdrgm";

/// XMP namespace URI for the container directory.
pub const CONTAINER_NAMESPACE: &str = "http://ns.google.com/photos/1.0/container/";
/// Namespace prefix for the container directory.
pub const CONTAINER_PREFIX: &str = "Container";

/// XMP namespace URI for container items.
pub const ITEM_NAMESPACE: &str = "http://ns.google.com/photos/1.0/container/item/";
/// Namespace prefix for container items.
pub const ITEM_PREFIX: &str = "Item";

/// The one element the scanner records attributes inside of.
pub const DESCRIPTION_ELEMENT: &str = "rdf:Description";

/// Qualified name of the version attribute.
pub const ATTR_VERSION: &str = "hdrgm:Version";
/// Qualified name of the minimum content boost attribute (log2 in text).
pub const ATTR_GAIN_MAP_MIN: &str = "hdrgm:GainMapMin";
/// Qualified name of the maximum content boost attribute (log2 in text).
pub const ATTR_GAIN_MAP_MAX: &str = "hdrgm:GainMapMax";
/// Qualified name of the gamma attribute.
pub const ATTR_GAMMA: &str = "hdrgm:Gamma";
/// Qualified name of the SDR offset attribute.
pub const ATTR_OFFSET_SDR: &str = "hdrgm:OffsetSDR";
/// Qualified name of the HDR offset attribute.
pub const ATTR_OFFSET_HDR: &str = "hdrgm:OffsetHDR";
/// Qualified name of the minimum HDR capacity attribute (log2 in text).
pub const ATTR_HDR_CAPACITY_MIN: &str = "hdrgm:HDRCapacityMin";
/// Qualified name of the maximum HDR capacity attribute (log2 in text).
pub const ATTR_HDR_CAPACITY_MAX: &str = "hdrgm:HDRCapacityMax";
/// Qualified name of the base rendition flag attribute.
pub const ATTR_BASE_RENDITION_IS_HDR: &str = "hdrgm:BaseRenditionIsHDR";
