//! Markup emission with depth-tracked element nesting.

use alloc::string::String;
use alloc::vec::Vec;

/// Streaming XML writer producing well-formed, self-closing nested markup.
///
/// Elements close in strict nesting order. [`XmlWriter::start_element`]
/// returns the depth of the new element so a subtree can be unwound later
/// with [`XmlWriter::finish_to_depth`], regardless of how many children were
/// opened in between.
#[derive(Debug, Default)]
pub struct XmlWriter {
    out: String,
    open: Vec<String>,
    tag_open: bool,
}

impl XmlWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new element and return its depth.
    pub fn start_element(&mut self, name: &str) -> usize {
        self.close_start_tag();
        let depth = self.open.len();
        self.out.push('<');
        self.out.push_str(name);
        self.open.push(String::from(name));
        self.tag_open = true;
        depth
    }

    /// Declare an XML namespace on the currently open start tag.
    pub fn write_xmlns(&mut self, prefix: &str, uri: &str) {
        debug_assert!(self.tag_open, "xmlns written outside a start tag");
        if !self.tag_open {
            return;
        }
        self.out.push_str(" xmlns:");
        self.out.push_str(prefix);
        self.out.push_str("=\"");
        self.push_escaped(uri);
        self.out.push('"');
    }

    /// Write one attribute on the currently open start tag.
    pub fn attribute(&mut self, name: &str, value: &str) {
        debug_assert!(self.tag_open, "attribute written outside a start tag");
        if !self.tag_open {
            return;
        }
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.push_escaped(value);
        self.out.push('"');
    }

    /// Close elements until only `depth` remain open.
    pub fn finish_to_depth(&mut self, depth: usize) {
        while self.open.len() > depth {
            self.close_innermost();
        }
    }

    /// Close all open elements and return the document.
    pub fn finish(mut self) -> String {
        self.finish_to_depth(0);
        self.out
    }

    fn close_start_tag(&mut self) {
        if self.tag_open {
            self.out.push('>');
            self.tag_open = false;
        }
    }

    fn close_innermost(&mut self) {
        let name = match self.open.pop() {
            Some(name) => name,
            None => return,
        };
        if self.tag_open {
            self.out.push_str("/>");
            self.tag_open = false;
        } else {
            self.out.push_str("</");
            self.out.push_str(&name);
            self.out.push('>');
        }
    }

    fn push_escaped(&mut self, value: &str) {
        for c in value.chars() {
            match c {
                '&' => self.out.push_str("&amp;"),
                '<' => self.out.push_str("&lt;"),
                '>' => self.out.push_str("&gt;"),
                '"' => self.out.push_str("&quot;"),
                _ => self.out.push(c),
            }
        }
    }
}
