//! Single-pass scanner extracting gain map attributes from XMP markup.
//!
//! Scanning is structural and name-driven; type coercion and field policy
//! live in the decoder. The scanner processes at most one
//! `rdf:Description` element per document and freezes its recorded values
//! once that element closes.

use alloc::string::String;

use crate::types::{Error, Result};
use crate::xml::XmlEvent;

use super::{
    ATTR_BASE_RENDITION_IS_HDR, ATTR_GAIN_MAP_MAX, ATTR_GAIN_MAP_MIN, ATTR_GAMMA,
    ATTR_HDR_CAPACITY_MAX, ATTR_HDR_CAPACITY_MIN, ATTR_OFFSET_HDR, ATTR_OFFSET_SDR, ATTR_VERSION,
    DESCRIPTION_ELEMENT,
};

/// Progress of the scan across the one matched description element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No matching element seen yet.
    #[default]
    NotStarted,
    /// Positioned inside the matched element; attributes are being recorded.
    Started,
    /// The matched element closed; recorded values are frozen.
    Done,
}

/// State transition for one structural event.
///
/// Pure over (state, event) so the element-matching rules can be exercised
/// with synthetic event sequences, independent of the tokenizer. Once `Done`
/// every further event is ignored: only the first matched element is
/// processed.
pub fn advance(state: ScanState, event: &XmlEvent<'_>) -> ScanState {
    if state == ScanState::Done {
        return ScanState::Done;
    }
    match event {
        XmlEvent::ElementStart(name) => {
            if *name == DESCRIPTION_ELEMENT {
                ScanState::Started
            } else {
                ScanState::NotStarted
            }
        }
        XmlEvent::ElementEnd => {
            if state == ScanState::Started {
                ScanState::Done
            } else {
                state
            }
        }
        XmlEvent::AttributeName(_) | XmlEvent::AttributeValue(_) => state,
    }
}

/// The fixed vocabulary of recognized gain map attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmpAttr {
    /// `hdrgm:Version`
    Version,
    /// `hdrgm:GainMapMin`
    GainMapMin,
    /// `hdrgm:GainMapMax`
    GainMapMax,
    /// `hdrgm:Gamma`
    Gamma,
    /// `hdrgm:OffsetSDR`
    OffsetSdr,
    /// `hdrgm:OffsetHDR`
    OffsetHdr,
    /// `hdrgm:HDRCapacityMin`
    HdrCapacityMin,
    /// `hdrgm:HDRCapacityMax`
    HdrCapacityMax,
    /// `hdrgm:BaseRenditionIsHDR`
    BaseRenditionIsHdr,
}

impl XmpAttr {
    /// All recognized attributes, in slot order.
    pub const ALL: [XmpAttr; 9] = [
        XmpAttr::Version,
        XmpAttr::GainMapMin,
        XmpAttr::GainMapMax,
        XmpAttr::Gamma,
        XmpAttr::OffsetSdr,
        XmpAttr::OffsetHdr,
        XmpAttr::HdrCapacityMin,
        XmpAttr::HdrCapacityMax,
        XmpAttr::BaseRenditionIsHdr,
    ];

    /// Qualified name as it appears in the packet.
    pub fn qualified_name(self) -> &'static str {
        match self {
            XmpAttr::Version => ATTR_VERSION,
            XmpAttr::GainMapMin => ATTR_GAIN_MAP_MIN,
            XmpAttr::GainMapMax => ATTR_GAIN_MAP_MAX,
            XmpAttr::Gamma => ATTR_GAMMA,
            XmpAttr::OffsetSdr => ATTR_OFFSET_SDR,
            XmpAttr::OffsetHdr => ATTR_OFFSET_HDR,
            XmpAttr::HdrCapacityMin => ATTR_HDR_CAPACITY_MIN,
            XmpAttr::HdrCapacityMax => ATTR_HDR_CAPACITY_MAX,
            XmpAttr::BaseRenditionIsHdr => ATTR_BASE_RENDITION_IS_HDR,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|attr| attr.qualified_name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default, Clone)]
struct Slot {
    text: String,
    found: bool,
}

/// Accumulates raw attribute text while scanning one XMP document.
///
/// Reset is per-instance: construct a fresh scanner per scan.
#[derive(Debug, Default)]
pub struct XmpScanner {
    state: ScanState,
    last_attr: Option<XmpAttr>,
    slots: [Slot; 9],
}

impl XmpScanner {
    /// Create a scanner in the `NotStarted` state with empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scan state.
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed one structural event.
    pub fn handle(&mut self, event: &XmlEvent<'_>) {
        if self.state == ScanState::Done {
            return;
        }
        match *event {
            XmlEvent::AttributeName(name) if self.state == ScanState::Started => {
                // An unrecognized name clears the marker so its value is
                // not attributed to the previous attribute.
                self.last_attr = XmpAttr::from_name(name);
            }
            XmlEvent::AttributeValue(value) if self.state == ScanState::Started => {
                if let Some(attr) = self.last_attr {
                    let slot = &mut self.slots[attr.index()];
                    slot.text = String::from(value);
                    slot.found = true;
                }
            }
            XmlEvent::ElementEnd if self.state == ScanState::Started => {
                self.last_attr = None;
            }
            _ => {}
        }
        self.state = advance(self.state, event);
    }

    /// Raw recorded text for `attr`.
    ///
    /// Always `None` until the scan is `Done`, and `None` thereafter for
    /// attributes that were absent from the matched element.
    pub fn raw(&self, attr: XmpAttr) -> Option<&str> {
        if self.state != ScanState::Done {
            return None;
        }
        let slot = &self.slots[attr.index()];
        slot.found.then(|| slot.text.as_str())
    }

    /// Linear numeric field. `Ok(None)` when absent; coercion failure is
    /// reported distinctly from not-found.
    pub fn f32_field(&self, attr: XmpAttr) -> Result<Option<f32>> {
        match self.raw(attr) {
            None => Ok(None),
            Some(text) => text
                .trim()
                .parse::<f32>()
                .map(Some)
                .map_err(|_| Error::MalformedAttribute(attr.qualified_name())),
        }
    }

    /// Numeric field whose textual form is a base-2 logarithm; returns the
    /// exponentiated (linear) value.
    pub fn log2_field(&self, attr: XmpAttr) -> Result<Option<f32>> {
        Ok(self.f32_field(attr)?.map(libm::exp2f))
    }

    /// Boolean field; only the literals `"True"` and `"False"` are accepted.
    pub fn bool_field(&self, attr: XmpAttr) -> Result<Option<bool>> {
        match self.raw(attr) {
            None => Ok(None),
            Some("True") => Ok(Some(true)),
            Some("False") => Ok(Some(false)),
            Some(_) => Err(Error::MalformedAttribute(attr.qualified_name())),
        }
    }
}
