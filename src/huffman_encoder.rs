use crate::bits::BitWriter;
use crate::huffman::HuffmanTable;
use crate::packet::{PacketBuilder, PacketError};

use thiserror::Error;
use tracing::trace;

/// Stand-in for characters outside the single byte message alphabet.
pub const PLACEHOLDER: u8 = b'?';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanEncodingError {
    #[error("symbol {0:#04x} has no code in the huffman table")]
    UnencodableSymbol(u8),

    #[error(transparent)]
    Packet(#[from] PacketError),
}

/// Maps a character onto the message alphabet: NUL, the C1 control range
/// and anything above Latin-1 become `?`.
pub fn sanitize(c: char) -> u8 {
    match c as u32 {
        0 | 128..=159 | 256.. => PLACEHOLDER,
        value => value as u8,
    }
}

/// Replaces unknown symbols with question marks, one byte per character.
pub fn format_message(message: &str) -> Vec<u8> {
    message.chars().map(sanitize).collect()
}

pub struct HuffmanEncoder<'a> {
    table: &'a HuffmanTable,
}

impl<'a> HuffmanEncoder<'a> {
    pub fn new(table: &'a HuffmanTable) -> Self {
        Self { table }
    }

    /// Writes the character count of `message` as a smart integer followed by
    /// the compressed characters. Returns the number of payload bits.
    ///
    /// The builder is left untouched if any part of the message can't be
    /// encoded.
    pub fn pack(
        &self,
        message: &str,
        builder: &mut PacketBuilder,
    ) -> Result<usize, HuffmanEncodingError> {
        let data = format_message(message);
        self.check_symbols(&data)?;

        builder.write_smart(data.len())?;
        self.pack_bytes(&data, builder)
    }

    /// Compresses already sanitized symbols at the builder's write position
    /// and moves the position past the last partially written byte.
    pub fn pack_bytes(
        &self,
        data: &[u8],
        builder: &mut PacketBuilder,
    ) -> Result<usize, HuffmanEncodingError> {
        self.check_symbols(data)?;

        let start = builder.position();
        let mut writer = BitWriter::new(builder.buffer_mut(), start);

        for &symbol in data {
            let length = self.table.length(symbol);
            let code = self.table.codes()[symbol as usize];
            writer.write_code(code, length as usize);
        }

        let bits = writer.position() - start * 8;
        let end = writer.finish();
        builder.set_position(end);

        trace!(symbols = data.len(), bits, bytes = end - start, "packed message");
        Ok(bits)
    }

    fn check_symbols(&self, data: &[u8]) -> Result<(), HuffmanEncodingError> {
        match data.iter().find(|&&symbol| self.table.length(symbol) == 0) {
            Some(&symbol) => Err(HuffmanEncodingError::UnencodableSymbol(symbol)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::tests::{abcd_table, mixed_table};
    use crate::packet::MAX_SMART;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize('a'), b'a');
        assert_eq!(sanitize(' '), b' ');
        assert_eq!(sanitize('\u{7f}'), 0x7f);
        assert_eq!(sanitize('\u{a0}'), 0xa0);
        assert_eq!(sanitize('\u{ff}'), 0xff);

        assert_eq!(sanitize('\0'), PLACEHOLDER);
        assert_eq!(sanitize('\u{80}'), PLACEHOLDER);
        assert_eq!(sanitize('\u{9f}'), PLACEHOLDER);
        assert_eq!(sanitize('\u{100}'), PLACEHOLDER);
        assert_eq!(sanitize('€'), PLACEHOLDER);
    }

    #[test]
    fn test_format_message() {
        assert_eq!(format_message("héllo €"), b"h\xe9llo ?".to_vec());
        assert!(format_message("").is_empty());
    }

    #[test]
    fn test_pack_abcd() {
        let table = abcd_table();
        let mut builder = PacketBuilder::new();

        let bits = HuffmanEncoder::new(&table)
            .pack("ABCD", &mut builder)
            .unwrap();

        assert_eq!(bits, 9);
        assert_eq!(builder.as_bytes(), &[4, 0b0101_1011, 0b1000_0000]);
    }

    #[test]
    fn test_pack_empty() {
        let table = abcd_table();
        let mut builder = PacketBuilder::new();

        let bits = HuffmanEncoder::new(&table).pack("", &mut builder).unwrap();

        assert_eq!(bits, 0);
        assert_eq!(builder.as_bytes(), &[0]);
    }

    #[test]
    fn test_pack_after_existing_bytes() {
        let table = abcd_table();
        let mut builder = PacketBuilder::new();
        builder.write_byte(0xee);

        HuffmanEncoder::new(&table)
            .pack_bytes(b"DDD", &mut builder)
            .unwrap();

        assert_eq!(builder.as_bytes(), &[0xee, 0xff, 0x80]);
    }

    #[test]
    fn test_consecutive_packs_share_no_bits() {
        let table = abcd_table();
        let encoder = HuffmanEncoder::new(&table);
        let mut builder = PacketBuilder::new();

        encoder.pack_bytes(b"D", &mut builder).unwrap();
        encoder.pack_bytes(b"D", &mut builder).unwrap();

        assert_eq!(builder.as_bytes(), &[0xe0, 0xe0]);
    }

    #[test]
    fn test_unencodable_symbol_leaves_builder() {
        let table = abcd_table();
        let mut builder = PacketBuilder::new();
        builder.write_byte(1);

        assert_eq!(
            HuffmanEncoder::new(&table).pack("ABE", &mut builder),
            Err(HuffmanEncodingError::UnencodableSymbol(b'E'))
        );
        assert_eq!(builder.as_bytes(), &[1]);
    }

    #[test]
    fn test_long_message_prefix() {
        let table = mixed_table();
        let mut builder = PacketBuilder::new();
        let message = "a".repeat(200);

        HuffmanEncoder::new(&table)
            .pack(&message, &mut builder)
            .unwrap();

        assert_eq!(&builder.as_bytes()[..2], &[0x80, 200]);
        // 'a' is in the 9 bit range
        assert_eq!(builder.position(), 2 + (200 * 9usize).div_ceil(8));
    }

    #[test]
    fn test_message_too_long() {
        let table = mixed_table();
        let mut builder = PacketBuilder::new();
        let message = "a".repeat(MAX_SMART + 1);

        assert_eq!(
            HuffmanEncoder::new(&table).pack(&message, &mut builder),
            Err(HuffmanEncodingError::Packet(PacketError::SmartOutOfRange(
                MAX_SMART + 1
            )))
        );
        assert_eq!(builder.position(), 0);
    }
}
