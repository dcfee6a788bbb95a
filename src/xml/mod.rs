//! Minimal XML engines for XMP packets.
//!
//! The XMP blocks handled by this crate use a fixed, known vocabulary of
//! element and attribute names, so these engines support exactly the subset
//! XMP needs: elements, attributes, namespace declarations, and self-closing
//! tags. No DTDs, comments, CDATA sections, or entity expansion.

pub mod reader;
pub mod writer;

pub use reader::{XmlEvent, XmlReader};
pub use writer::XmlWriter;
