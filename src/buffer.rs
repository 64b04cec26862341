//! Sequential byte cursor over the GIF stream.
//!
//! The read side tracks a forward-only position and refuses to read past the
//! end of the buffer; the write side is append-only.

use crate::{Error, Result};

/// Forward-only reader over a borrowed byte slice.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn want(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(Error::TruncatedStream {
                offset: self.pos,
                needed,
                remaining,
            });
        }
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.want(n)?;
        self.pos += n;
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.want(1)?;
        let b = self.data[self.pos];
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.want(2)?;
        let v = self.data[self.pos] as u16 | (self.data[self.pos + 1] as u16) << 8;
        self.pos += 2;
        Ok(v)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.want(n)?;
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads `n` bytes as single-byte characters. No multi-byte encoding
    /// support; GIF identifiers are plain ASCII.
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

/// Append-only output buffer.
#[derive(Default)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_byte(&mut self, b: u8) {
        self.data.push(b);
    }

    pub fn write_u16_le(&mut self, v: u16) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Appends one byte per character, no encoding validation.
    pub fn write_fixed_string(&mut self, s: &str) {
        self.data.extend(s.chars().map(|c| c as u8));
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}
