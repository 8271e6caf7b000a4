//! MSB-first bit cursors over byte buffers.

use bitvec::prelude::*;

/// Packs code words into a byte buffer starting at a byte offset.
///
/// Bytes past the starting offset are cleared when the writer is created, so
/// every code is OR-ed into zeroed storage and never disturbs bits written
/// before it.
pub struct BitWriter<'a> {
    buf: &'a mut Vec<u8>,
    position: usize,
}

impl<'a> BitWriter<'a> {
    pub fn new(buf: &'a mut Vec<u8>, byte_offset: usize) -> Self {
        buf.truncate(byte_offset);
        buf.resize(byte_offset, 0);

        Self {
            buf,
            position: byte_offset * 8,
        }
    }

    /// Current bit position from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Writes the leading `length` bits of the left-justified `code`.
    pub fn write_code(&mut self, code: u32, length: usize) {
        debug_assert!(length <= 32);

        let end = self.position + length;
        let bytes_needed = end.div_ceil(8);
        if self.buf.len() < bytes_needed {
            self.buf.resize(bytes_needed, 0);
        }

        let dst = self.buf.view_bits_mut::<Msb0>();
        for offset in code.view_bits::<Msb0>()[..length].iter_ones() {
            dst.set(self.position + offset, true);
        }

        self.position = end;
    }

    /// Byte length of the buffer once the last partial byte is included.
    pub fn finish(self) -> usize {
        let len = self.position.div_ceil(8);
        self.buf.truncate(len);
        len
    }
}

/// Reads single bits from a byte slice, most significant bit first.
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            bits: data.view_bits::<Msb0>(),
            position: 0,
        }
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }
}
