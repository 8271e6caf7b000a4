//! Byte buffers for outgoing and incoming packet payloads.

use std::io::Cursor;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use thiserror::Error;

/// Largest value a smart integer can carry.
pub const MAX_SMART: usize = 0x7fff;

const SMART_MARKER: u16 = 0x8000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("unexpected end of packet at byte {position}")]
    Eof { position: usize },

    #[error("smart value {0} is out of range (max 32767)")]
    SmartOutOfRange(usize),

    #[error("byte index {index} is beyond the write position {position}")]
    OutOfBounds { index: usize, position: usize },
}

/// Outgoing payload. The write position is the end of the written bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PacketBuilder {
    buffer: Vec<u8>,
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn position(&self) -> usize {
        self.buffer.len()
    }

    /// Moves the write position, dropping bytes past it or zero filling up
    /// to it.
    pub fn set_position(&mut self, position: usize) {
        self.buffer.resize(position, 0);
    }

    pub fn get_byte(&self, index: usize) -> Option<u8> {
        self.buffer.get(index).copied()
    }

    pub fn set_byte(&mut self, index: usize, value: u8) -> Result<(), PacketError> {
        let position = self.position();
        let byte = self
            .buffer
            .get_mut(index)
            .ok_or(PacketError::OutOfBounds { index, position })?;
        *byte = value;
        Ok(())
    }

    pub fn write_byte(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_short(&mut self, value: u16) {
        let mut bytes = [0u8; 2];
        BigEndian::write_u16(&mut bytes, value);
        self.buffer.extend_from_slice(&bytes);
    }

    /// Writes `value` as one byte below 128, otherwise as a big-endian short
    /// with the top bit set.
    pub fn write_smart(&mut self, value: usize) -> Result<(), PacketError> {
        match value {
            0..=0x7f => self.write_byte(value as u8),
            0x80..=MAX_SMART => self.write_short(value as u16 | SMART_MARKER),
            _ => return Err(PacketError::SmartOutOfRange(value)),
        }
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buffer
    }
}

/// Incoming payload with a read cursor.
#[derive(Debug, Clone)]
pub struct Packet<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> Packet<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    pub fn readable_bytes(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    pub fn read_byte(&mut self) -> Result<u8, PacketError> {
        let position = self.position();
        self.cursor
            .read_u8()
            .map_err(|_| PacketError::Eof { position })
    }

    pub fn read_short(&mut self) -> Result<u16, PacketError> {
        let position = self.position();
        self.cursor
            .read_u16::<BigEndian>()
            .map_err(|_| PacketError::Eof { position })
    }

    pub fn read_smart(&mut self) -> Result<usize, PacketError> {
        let position = self.position();
        let peek = *self
            .cursor
            .get_ref()
            .get(position)
            .ok_or(PacketError::Eof { position })?;

        if peek < 0x80 {
            Ok(self.read_byte()? as usize)
        } else {
            Ok((self.read_short()? - SMART_MARKER) as usize)
        }
    }

    /// Consumes and returns every unread byte.
    pub fn remaining(&mut self) -> &'a [u8] {
        let data: &'a [u8] = *self.cursor.get_ref();
        let rest = &data[self.position().min(data.len())..];
        self.cursor.set_position(data.len() as u64);
        rest
    }
}
