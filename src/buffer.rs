//! Bounded append buffers for compressed image assembly.
//!
//! Two flavors: [`DataBuffer`] owns its region and is used as a scratch
//! buffer while building segments; [`write_to`] appends into a destination
//! slice owned and sized by the image-assembly layer, so its bounds check and
//! cursor live outside the buffer.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{Error, Result};

/// Fixed-capacity append buffer with an advancing write cursor.
///
/// The region is zero-initialized and never grows or resets; one instance is
/// single-use for one buffer's lifetime. Every write is all-or-nothing: on a
/// capacity violation nothing is written and the cursor stays put.
#[derive(Debug)]
pub struct DataBuffer {
    data: Vec<u8>,
    write_pos: usize,
}

impl DataBuffer {
    /// Create a buffer with `capacity` bytes, zero-initialized.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity],
            write_pos: 0,
        }
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.write_pos
    }

    /// The full underlying region, including bytes not yet written.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.data[..self.write_pos]
    }

    /// Append a single byte.
    pub fn write8(&mut self, value: u8) -> bool {
        self.write(&[value])
    }

    /// Append a 2-byte value in native byte order.
    pub fn write16(&mut self, value: u16) -> bool {
        self.write(&value.to_ne_bytes())
    }

    /// Append a 4-byte value in native byte order.
    pub fn write32(&mut self, value: u32) -> bool {
        self.write(&value.to_ne_bytes())
    }

    /// Append an arbitrary byte range.
    ///
    /// Returns `false` without touching the buffer if the write would exceed
    /// capacity.
    pub fn write(&mut self, source: &[u8]) -> bool {
        let end = match self.write_pos.checked_add(source.len()) {
            Some(end) if end <= self.data.len() => end,
            _ => {
                log::error!(
                    "writing out of boundary: write position: {}, size: {}, capacity: {}",
                    self.write_pos,
                    source.len(),
                    self.data.len()
                );
                return false;
            }
        };
        self.data[self.write_pos..end].copy_from_slice(source);
        self.write_pos = end;
        true
    }
}

/// Append `source` into a caller-owned `destination` starting at `position`.
///
/// Returns the advanced cursor on success. On overflow the destination is
/// untouched and the error carries the attempted position, size, and
/// capacity.
pub fn write_to(destination: &mut [u8], source: &[u8], position: usize) -> Result<usize> {
    let end = match position.checked_add(source.len()) {
        Some(end) if end <= destination.len() => end,
        _ => {
            return Err(Error::BufferOverflow {
                position,
                size: source.len(),
                capacity: destination.len(),
            })
        }
    };
    destination[position..end].copy_from_slice(source);
    Ok(end)
}
