//! End-to-end XMP metadata compliance tests: serialization, packet decoding,
//! round-trips, and error reporting.

use ultrahdr_xmp::xmp::XAP_NAMESPACE;
use ultrahdr_xmp::{
    generate_container_xmp, generate_gainmap_xmp, parse_xmp_packet, Error, GainMapMetadata,
};

/// Wrap a serialized XMP document the way an APP1 payload carries it.
fn wrap_packet(xmp: &str) -> Vec<u8> {
    let mut data = XAP_NAMESPACE.to_vec();
    data.extend_from_slice(xmp.as_bytes());
    data
}

/// A description element with the given attribute string, inside a full
/// xmpmeta/RDF shell.
fn description_packet(attrs: &str) -> Vec<u8> {
    let xmp = format!(
        concat!(
            r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">"#,
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">"#,
            r#"<rdf:Description xmlns:hdrgm="http://ns.adobe.com/hdr-gain-map/1.0/" {}/>"#,
            r#"</rdf:RDF></x:xmpmeta>"#
        ),
        attrs
    );
    wrap_packet(&xmp)
}

fn test_metadata() -> GainMapMetadata {
    GainMapMetadata {
        version: "1.0".into(),
        min_content_boost: 0.8,
        max_content_boost: 4.0,
        gamma: 1.2,
        offset_sdr: 0.015625,
        offset_hdr: 0.03125,
        hdr_capacity_min: 1.5,
        hdr_capacity_max: 6.0,
        base_rendition_is_hdr: false,
    }
}

fn assert_close(actual: f32, expected: f32, field: &str) {
    let tolerance = expected.abs().max(1.0) * 1e-4;
    assert!(
        (actual - expected).abs() < tolerance,
        "{}: expected {}, got {}",
        field,
        expected,
        actual
    );
}

// ============================================================================
// Round-trip properties
// ============================================================================

#[test]
fn test_gainmap_xmp_roundtrip() {
    let original = test_metadata();
    let packet = wrap_packet(&generate_gainmap_xmp(&original));
    let parsed = parse_xmp_packet(&packet).unwrap();

    assert_eq!(parsed.version, original.version);
    assert_close(
        parsed.min_content_boost,
        original.min_content_boost,
        "min_content_boost",
    );
    assert_close(
        parsed.max_content_boost,
        original.max_content_boost,
        "max_content_boost",
    );
    assert_close(parsed.gamma, original.gamma, "gamma");
    assert_close(parsed.offset_sdr, original.offset_sdr, "offset_sdr");
    assert_close(parsed.offset_hdr, original.offset_hdr, "offset_hdr");
    assert_close(
        parsed.hdr_capacity_min,
        original.hdr_capacity_min,
        "hdr_capacity_min",
    );
    assert_close(
        parsed.hdr_capacity_max,
        original.hdr_capacity_max,
        "hdr_capacity_max",
    );
    assert!(!parsed.base_rendition_is_hdr);
}

#[test]
fn test_log2_exp2_inverse_law() {
    for &x in &[1.0f32, 2.0, 0.5, 1000.0] {
        let metadata = GainMapMetadata {
            min_content_boost: x,
            max_content_boost: x,
            hdr_capacity_min: x,
            hdr_capacity_max: x,
            ..GainMapMetadata::new()
        };
        let packet = wrap_packet(&generate_gainmap_xmp(&metadata));
        let parsed = parse_xmp_packet(&packet).unwrap();

        assert_close(parsed.min_content_boost, x, "min_content_boost");
        assert_close(parsed.max_content_boost, x, "max_content_boost");
        assert_close(parsed.hdr_capacity_min, x, "hdr_capacity_min");
        assert_close(parsed.hdr_capacity_max, x, "hdr_capacity_max");
    }
}

// ============================================================================
// Required fields and defaults
// ============================================================================

#[test]
fn test_missing_required_fields() {
    let cases = [
        (
            r#"hdrgm:GainMapMax="2" hdrgm:HDRCapacityMax="2""#,
            "hdrgm:Version",
        ),
        (
            r#"hdrgm:Version="1.0" hdrgm:HDRCapacityMax="2""#,
            "hdrgm:GainMapMax",
        ),
        (
            r#"hdrgm:Version="1.0" hdrgm:GainMapMax="2""#,
            "hdrgm:HDRCapacityMax",
        ),
    ];
    for (attrs, missing) in cases {
        match parse_xmp_packet(&description_packet(attrs)) {
            Err(Error::MissingAttribute(name)) => assert_eq!(name, missing),
            other => panic!("expected missing {}, got {:?}", missing, other),
        }
    }
}

#[test]
fn test_optional_fields_default() {
    let metadata = parse_xmp_packet(&description_packet(
        r#"hdrgm:Version="1.0" hdrgm:GainMapMax="2" hdrgm:HDRCapacityMax="2""#,
    ))
    .unwrap();

    assert_eq!(metadata.min_content_boost, 1.0);
    assert_eq!(metadata.gamma, 1.0);
    assert_eq!(metadata.offset_sdr, 1.0 / 64.0);
    assert_eq!(metadata.offset_hdr, 1.0 / 64.0);
    assert_eq!(metadata.hdr_capacity_min, 1.0);
    assert!(!metadata.base_rendition_is_hdr);
    // Required log2 fields were exponentiated.
    assert_eq!(metadata.max_content_boost, 4.0);
    assert_eq!(metadata.hdr_capacity_max, 4.0);
}

#[test]
fn test_malformed_optional_field_is_an_error() {
    let err = parse_xmp_packet(&description_packet(
        r#"hdrgm:Version="1.0" hdrgm:GainMapMax="2" hdrgm:HDRCapacityMax="2" hdrgm:Gamma="bright""#,
    ))
    .unwrap_err();
    assert!(matches!(err, Error::MalformedAttribute("hdrgm:Gamma")));
}

// ============================================================================
// Base rendition handling
// ============================================================================

#[test]
fn test_base_rendition_literals() {
    let required = r#"hdrgm:Version="1.0" hdrgm:GainMapMax="2" hdrgm:HDRCapacityMax="2""#;

    let attrs = format!(r#"{} hdrgm:BaseRenditionIsHDR="False""#, required);
    assert!(parse_xmp_packet(&description_packet(&attrs)).is_ok());

    let attrs = format!(r#"{} hdrgm:BaseRenditionIsHDR="True""#, required);
    assert!(matches!(
        parse_xmp_packet(&description_packet(&attrs)),
        Err(Error::Unsupported(_))
    ));

    let attrs = format!(r#"{} hdrgm:BaseRenditionIsHDR="true""#, required);
    assert!(matches!(
        parse_xmp_packet(&description_packet(&attrs)),
        Err(Error::MalformedAttribute("hdrgm:BaseRenditionIsHDR"))
    ));
}

#[test]
fn test_encoder_never_emits_true() {
    // Even a record claiming an HDR base serializes as "False".
    let metadata = GainMapMetadata {
        base_rendition_is_hdr: true,
        ..test_metadata()
    };
    let xmp = generate_gainmap_xmp(&metadata);
    assert!(xmp.contains(r#"hdrgm:BaseRenditionIsHDR="False""#));
}

// ============================================================================
// Packet framing
// ============================================================================

#[test]
fn test_namespace_mismatch_rejected() {
    let mut packet = wrap_packet(&generate_gainmap_xmp(&test_metadata()));
    packet[..5].copy_from_slice(b"https");
    assert!(matches!(
        parse_xmp_packet(&packet),
        Err(Error::InvalidPacket(_))
    ));
}

#[test]
fn test_oversized_packet_rejected() {
    let mut packet = vec![0u8; ultrahdr_xmp::limits::MAX_XMP_LENGTH + 1];
    packet[..XAP_NAMESPACE.len()].copy_from_slice(XAP_NAMESPACE);
    assert!(matches!(
        parse_xmp_packet(&packet),
        Err(Error::InvalidPacket(_))
    ));
}

#[test]
fn test_xpacket_wrapper_and_padding_are_trimmed() {
    let body = generate_gainmap_xmp(&test_metadata());
    let wrapped = format!(
        "<?xpacket begin=\"\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n{}\n<?xpacket end=\"w\"?>{}",
        body,
        " ".repeat(64)
    );
    let parsed = parse_xmp_packet(&wrap_packet(&wrapped)).unwrap();
    assert_close(parsed.max_content_boost, 4.0, "max_content_boost");
}

#[test]
fn test_container_xmp_decodes_as_metadata_free() {
    // The container directory form carries Version but no gain map
    // parameters on the description element itself; its child elements stop
    // attribute recording before the description closes, so required
    // attributes are reported missing.
    let packet = wrap_packet(&generate_container_xmp(&test_metadata(), 1000));
    assert!(matches!(
        parse_xmp_packet(&packet),
        Err(Error::MissingAttribute(_))
    ));
}

#[test]
fn test_attributes_outside_description_ignored() {
    let xmp = concat!(
        r#"<x:xmpmeta xmlns:x="adobe:ns:meta/" hdrgm:Version="9.9">"#,
        r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">"#,
        r#"<rdf:Description xmlns:hdrgm="http://ns.adobe.com/hdr-gain-map/1.0/" "#,
        r#"hdrgm:Version="1.0" hdrgm:GainMapMax="1" hdrgm:HDRCapacityMax="1"/>"#,
        r#"</rdf:RDF></x:xmpmeta>"#
    );
    let metadata = parse_xmp_packet(&wrap_packet(xmp)).unwrap();
    assert_eq!(metadata.version, "1.0");
}
