//! Pull tokenizer delivering element and attribute events.

use alloc::format;
use alloc::vec::Vec;

use crate::types::{Error, Result};

/// A structural event delivered by [`XmlReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEvent<'a> {
    /// A start tag was opened; carries the qualified element name.
    ElementStart(&'a str),
    /// The innermost open element finished, via `/>` or a close tag.
    ElementEnd,
    /// An attribute name inside the currently open start tag.
    AttributeName(&'a str),
    /// The value belonging to the immediately preceding attribute name.
    AttributeValue(&'a str),
}

/// Single-pass pull tokenizer over one XMP document.
///
/// Text content between elements is skipped; only structure is reported.
/// The document must be balanced: a mismatched or missing close tag is a
/// structural error.
#[derive(Debug)]
pub struct XmlReader<'a> {
    input: &'a str,
    pos: usize,
    open: Vec<&'a str>,
    in_tag: bool,
    pending_value: Option<&'a str>,
}

impl<'a> XmlReader<'a> {
    /// Create a reader over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            open: Vec::new(),
            in_tag: false,
            pending_value: None,
        }
    }

    /// Next structural event, or `None` at the end of a balanced document.
    pub fn next_event(&mut self) -> Result<Option<XmlEvent<'a>>> {
        if let Some(value) = self.pending_value.take() {
            return Ok(Some(XmlEvent::AttributeValue(value)));
        }
        loop {
            if self.in_tag {
                self.skip_whitespace();
                let rest = self.rest().as_bytes();
                match rest {
                    [] => return Err(self.error("unexpected end of input inside tag")),
                    [b'/', b'>', ..] => {
                        self.pos += 2;
                        self.in_tag = false;
                        self.open.pop();
                        return Ok(Some(XmlEvent::ElementEnd));
                    }
                    [b'>', ..] => {
                        self.pos += 1;
                        self.in_tag = false;
                        continue;
                    }
                    _ => return self.attribute().map(Some),
                }
            }

            // Skip character data until the next tag.
            match self.rest().find('<') {
                Some(i) => self.pos += i + 1,
                None => {
                    if !self.open.is_empty() {
                        return Err(self.error("unclosed element"));
                    }
                    self.pos = self.input.len();
                    return Ok(None);
                }
            }

            if self.rest().as_bytes().first() == Some(&b'/') {
                self.pos += 1;
                let name = self.name()?;
                self.skip_whitespace();
                if !self.eat(b'>') {
                    return Err(self.error("expected '>' after close tag name"));
                }
                match self.open.pop() {
                    Some(top) if top == name => return Ok(Some(XmlEvent::ElementEnd)),
                    _ => return Err(self.error("mismatched close tag")),
                }
            }

            let name = self.name()?;
            self.open.push(name);
            self.in_tag = true;
            return Ok(Some(XmlEvent::ElementStart(name)));
        }
    }

    fn attribute(&mut self) -> Result<XmlEvent<'a>> {
        let name = self.name()?;
        self.skip_whitespace();
        if !self.eat(b'=') {
            return Err(self.error("expected '=' after attribute name"));
        }
        self.skip_whitespace();
        let quote = match self.rest().as_bytes().first() {
            Some(&b'"') => b'"',
            Some(&b'\'') => b'\'',
            _ => return Err(self.error("expected quoted attribute value")),
        };
        self.pos += 1;
        let rest = self.rest();
        let end = match rest.find(quote as char) {
            Some(end) => end,
            None => return Err(self.error("unterminated attribute value")),
        };
        self.pos += end + 1;
        self.pending_value = Some(&rest[..end]);
        Ok(XmlEvent::AttributeName(name))
    }

    fn name(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest
            .bytes()
            .position(|b| !is_name_byte(b))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(self.error("expected a name"));
        }
        self.pos += end;
        Ok(&rest[..end])
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.rest().as_bytes().first() == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(
            self.rest().as_bytes().first(),
            Some(b' ' | b'\t' | b'\r' | b'\n')
        ) {
            self.pos += 1;
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::XmpParse(format!("{} at byte {}", message, self.pos))
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-' | b'.')
}
