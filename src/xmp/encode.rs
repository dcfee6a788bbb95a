//! XMP serialization for the primary and gain map images.
//!
//! Both entry points are pure functions of the metadata record; attribute
//! order is fixed so output is reproducible.

use alloc::format;
use alloc::string::String;

use crate::types::GainMapMetadata;
use crate::xml::XmlWriter;

use super::{
    ATTR_BASE_RENDITION_IS_HDR, ATTR_GAIN_MAP_MAX, ATTR_GAIN_MAP_MIN, ATTR_GAMMA,
    ATTR_HDR_CAPACITY_MAX, ATTR_HDR_CAPACITY_MIN, ATTR_OFFSET_HDR, ATTR_OFFSET_SDR, ATTR_VERSION,
    CONTAINER_NAMESPACE, CONTAINER_PREFIX, DESCRIPTION_ELEMENT, HDRGM_NAMESPACE, HDRGM_PREFIX,
    ITEM_NAMESPACE, ITEM_PREFIX,
};

// Container directory element and attribute names.
const DIRECTORY_ELEMENT: &str = "Container:Directory";
const ITEM_ELEMENT: &str = "Container:Item";
const ITEM_SEMANTIC: &str = "Item:Semantic";
const ITEM_MIME: &str = "Item:Mime";
const ITEM_LENGTH: &str = "Item:Length";
const SEMANTIC_PRIMARY: &str = "Primary";
const SEMANTIC_GAIN_MAP: &str = "GainMap";
const MIME_IMAGE_JPEG: &str = "image/jpeg";

const XMPMETA_ELEMENT: &str = "x:xmpmeta";
const RDF_ELEMENT: &str = "rdf:RDF";
const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const XMP_TOOLKIT: &str = "Adobe XMP Core 5.1.2";

fn start_description(writer: &mut XmlWriter) {
    writer.start_element(XMPMETA_ELEMENT);
    writer.write_xmlns("x", "adobe:ns:meta/");
    writer.attribute("x:xmptk", XMP_TOOLKIT);
    writer.start_element(RDF_ELEMENT);
    writer.write_xmlns("rdf", RDF_NAMESPACE);
    writer.start_element(DESCRIPTION_ELEMENT);
}

/// Serialize the container-directory XMP embedded in the primary image.
///
/// Describes an ordered two-item sequence: the primary image and the gain
/// map, whose encoded byte length is `gainmap_length`.
pub fn generate_container_xmp(metadata: &GainMapMetadata, gainmap_length: usize) -> String {
    let mut writer = XmlWriter::new();
    start_description(&mut writer);
    writer.write_xmlns(CONTAINER_PREFIX, CONTAINER_NAMESPACE);
    writer.write_xmlns(ITEM_PREFIX, ITEM_NAMESPACE);
    writer.write_xmlns(HDRGM_PREFIX, HDRGM_NAMESPACE);
    writer.attribute(ATTR_VERSION, &metadata.version);

    writer.start_element(DIRECTORY_ELEMENT);
    writer.start_element("rdf:Seq");

    let item_depth = writer.start_element("rdf:li");
    writer.attribute("rdf:parseType", "Resource");
    writer.start_element(ITEM_ELEMENT);
    writer.attribute(ITEM_SEMANTIC, SEMANTIC_PRIMARY);
    writer.attribute(ITEM_MIME, MIME_IMAGE_JPEG);
    writer.finish_to_depth(item_depth);

    writer.start_element("rdf:li");
    writer.attribute("rdf:parseType", "Resource");
    writer.start_element(ITEM_ELEMENT);
    writer.attribute(ITEM_SEMANTIC, SEMANTIC_GAIN_MAP);
    writer.attribute(ITEM_MIME, MIME_IMAGE_JPEG);
    writer.attribute(ITEM_LENGTH, &format!("{}", gainmap_length));

    writer.finish()
}

/// Serialize the standalone gain map parameters XMP embedded in the gain map
/// image.
///
/// Boost and capacity values are written as base-2 logarithms of the
/// record's linear values. `hdrgm:BaseRenditionIsHDR` is always emitted as
/// `"False"`; the unsupported true state is never written.
pub fn generate_gainmap_xmp(metadata: &GainMapMetadata) -> String {
    let mut writer = XmlWriter::new();
    start_description(&mut writer);
    writer.write_xmlns(HDRGM_PREFIX, HDRGM_NAMESPACE);
    writer.attribute(ATTR_VERSION, &metadata.version);
    writer.attribute(
        ATTR_GAIN_MAP_MIN,
        &format_f32(libm::log2f(metadata.min_content_boost)),
    );
    writer.attribute(
        ATTR_GAIN_MAP_MAX,
        &format_f32(libm::log2f(metadata.max_content_boost)),
    );
    writer.attribute(ATTR_GAMMA, &format_f32(metadata.gamma));
    writer.attribute(ATTR_OFFSET_SDR, &format_f32(metadata.offset_sdr));
    writer.attribute(ATTR_OFFSET_HDR, &format_f32(metadata.offset_hdr));
    writer.attribute(
        ATTR_HDR_CAPACITY_MIN,
        &format_f32(libm::log2f(metadata.hdr_capacity_min)),
    );
    writer.attribute(
        ATTR_HDR_CAPACITY_MAX,
        &format_f32(libm::log2f(metadata.hdr_capacity_max)),
    );
    writer.attribute(ATTR_BASE_RENDITION_IS_HDR, "False");
    writer.finish()
}

// Shortest representation that round-trips the f32 exactly.
fn format_f32(value: f32) -> String {
    format!("{}", value)
}
