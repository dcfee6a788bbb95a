//! XMP packet decoding into [`GainMapMetadata`].

use alloc::format;
use alloc::string::String;

use crate::limits;
use crate::types::{Error, GainMapMetadata, Result};
use crate::xml::XmlReader;

use super::scanner::{XmpAttr, XmpScanner};
use super::{
    ATTR_GAIN_MAP_MAX, ATTR_HDR_CAPACITY_MAX, ATTR_VERSION, XAP_NAMESPACE,
};

/// Parse an embedded XMP metadata packet into a gain map metadata record.
///
/// `data` is the raw APP1 payload: the XMP namespace identifier (including
/// its NUL terminator) followed by the serialized packet, optionally wrapped
/// in `<?xpacket?>` processing instructions and padded with trailing bytes.
///
/// `hdrgm:Version`, `hdrgm:GainMapMax`, and `hdrgm:HDRCapacityMax` are
/// required; the remaining attributes default per the Ultra HDR spec. A
/// present-but-malformed attribute is an error, never a silent default, and
/// `hdrgm:BaseRenditionIsHDR="True"` is rejected as unsupported.
pub fn parse_xmp_packet(data: &[u8]) -> Result<GainMapMetadata> {
    if data.len() < XAP_NAMESPACE.len() + 2 {
        return Err(Error::InvalidPacket(format!(
            "size of xmp block is expected to be at least {} bytes, received only {} bytes",
            XAP_NAMESPACE.len() + 2,
            data.len()
        )));
    }
    if data.len() > limits::MAX_XMP_LENGTH {
        return Err(Error::InvalidPacket(format!(
            "xmp block of {} bytes exceeds the {} byte limit",
            data.len(),
            limits::MAX_XMP_LENGTH
        )));
    }
    if &data[..XAP_NAMESPACE.len()] != XAP_NAMESPACE {
        return Err(Error::InvalidPacket(format!(
            "mismatch in namespace of xmp block, expected {}, got {}",
            String::from_utf8_lossy(&XAP_NAMESPACE[..XAP_NAMESPACE.len() - 1]),
            String::from_utf8_lossy(&data[..XAP_NAMESPACE.len() - 1])
        )));
    }
    let mut xmp = &data[XAP_NAMESPACE.len()..];

    // The tokenizer cannot handle the xpacket header or trailer, so trim
    // them before scanning. With no packet header present both loops leave
    // the range alone.
    let mut offset = 0;
    for i in 0..xmp.len().saturating_sub(1) {
        if xmp[i] == b'<' && xmp[i + 1] != b'?' {
            offset = i;
            break;
        }
    }
    xmp = &xmp[offset..];

    for i in (1..xmp.len()).rev() {
        if xmp[i] == b'>' && xmp[i - 1] != b'?' {
            xmp = &xmp[..i + 1];
            break;
        }
    }

    let mut len = xmp.len();
    while len > 1 && xmp[len - 1] != b'>' {
        len -= 1;
    }
    xmp = &xmp[..len];

    // An all-padding packet never ends in '>' and carries no markup at all.
    if xmp.last() != Some(&b'>') {
        return Err(Error::InvalidPacket(
            "no markup found in xmp block".into(),
        ));
    }

    let text = core::str::from_utf8(xmp)
        .map_err(|_| Error::XmpParse("xmp block is not valid UTF-8".into()))?;

    let mut scanner = XmpScanner::new();
    let mut reader = XmlReader::new(text);
    while let Some(event) = reader.next_event()? {
        scanner.handle(&event);
    }

    // Apply default values to any not-present fields, except for Version,
    // GainMapMax, and HDRCapacityMax, which are required. A field that is
    // present but unparsable indicates corrupt input and fails the decode.
    let mut metadata = GainMapMetadata::new();

    metadata.version = match scanner.raw(XmpAttr::Version) {
        Some(version) => String::from(version),
        None => return Err(Error::MissingAttribute(ATTR_VERSION)),
    };
    metadata.max_content_boost = scanner
        .log2_field(XmpAttr::GainMapMax)?
        .ok_or(Error::MissingAttribute(ATTR_GAIN_MAP_MAX))?;
    metadata.hdr_capacity_max = scanner
        .log2_field(XmpAttr::HdrCapacityMax)?
        .ok_or(Error::MissingAttribute(ATTR_HDR_CAPACITY_MAX))?;
    metadata.min_content_boost = scanner.log2_field(XmpAttr::GainMapMin)?.unwrap_or(1.0);
    metadata.gamma = scanner.f32_field(XmpAttr::Gamma)?.unwrap_or(1.0);
    metadata.offset_sdr = scanner.f32_field(XmpAttr::OffsetSdr)?.unwrap_or(1.0 / 64.0);
    metadata.offset_hdr = scanner.f32_field(XmpAttr::OffsetHdr)?.unwrap_or(1.0 / 64.0);
    metadata.hdr_capacity_min = scanner.log2_field(XmpAttr::HdrCapacityMin)?.unwrap_or(1.0);
    metadata.base_rendition_is_hdr = scanner
        .bool_field(XmpAttr::BaseRenditionIsHdr)?
        .unwrap_or(false);

    if metadata.base_rendition_is_hdr {
        return Err(Error::Unsupported(
            "hdr intent as base rendition is not supported",
        ));
    }

    Ok(metadata)
}
