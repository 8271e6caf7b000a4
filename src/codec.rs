//! Shared entry point for compressing outgoing and decompressing incoming
//! chat messages.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::HuffmanConfig;
use crate::error::{HuffmanError, Result};
use crate::huffman::HuffmanTable;
use crate::huffman_decoder::HuffmanDecoder;
use crate::huffman_encoder::HuffmanEncoder;
use crate::packet::{Packet, PacketBuilder};
use crate::source::TableSource;

/// A compiled huffman table, or nothing if the table was never available.
///
/// Clones share the same table. Every operation on an uninitialized codec
/// fails with [`HuffmanError::Uninitialized`] without touching its inputs.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    table: Option<Arc<HuffmanTable>>,
}

impl HuffmanCodec {
    pub fn new(table: HuffmanTable) -> Self {
        Self {
            table: Some(Arc::new(table)),
        }
    }

    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn from_lengths(lengths: &[u8]) -> Result<Self> {
        Ok(Self::new(HuffmanTable::from_lengths(lengths)?))
    }

    /// Builds the codec from the code lengths stored at the configured
    /// location. A missing file leaves the codec uninitialized; a file that
    /// doesn't describe a valid code is an error.
    pub fn load<S>(source: &S, config: &HuffmanConfig) -> Result<Self>
    where
        S: TableSource + ?Sized,
    {
        let Some(lengths) = source.fetch(config.index, config.file) else {
            warn!(
                index = config.index,
                file = config.file,
                "huffman table not found, chat compression disabled"
            );
            return Ok(Self::uninitialized());
        };

        let codec = Self::from_lengths(&lengths)?;
        debug!(
            index = config.index,
            file = config.file,
            bytes = lengths.len(),
            "loaded huffman table"
        );
        Ok(codec)
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_some()
    }

    pub fn table(&self) -> Option<&HuffmanTable> {
        self.table.as_deref()
    }

    fn compiled(&self) -> Result<&HuffmanTable> {
        self.table().ok_or(HuffmanError::Uninitialized)
    }

    /// Formats, compresses and writes `message` to `builder`, prefixed by its
    /// character count.
    pub fn compress(&self, message: &str, builder: &mut PacketBuilder) -> Result<()> {
        let table = self.compiled()?;
        HuffmanEncoder::new(table).pack(message, builder)?;
        Ok(())
    }

    /// Decompresses `characters` characters from `data`.
    pub fn decompress(&self, data: &[u8], characters: usize) -> Result<String> {
        let table = self.compiled()?;
        Ok(HuffmanDecoder::new(table).unpack(data, characters)?)
    }

    /// Decompresses the rest of `packet`. The character count is read from
    /// the packet as a smart integer unless `characters` is given.
    pub fn decompress_packet(
        &self,
        packet: &mut Packet<'_>,
        characters: Option<usize>,
    ) -> Result<String> {
        let table = self.compiled()?;
        let characters = match characters {
            Some(characters) => characters,
            None => packet.read_smart()?,
        };
        Ok(HuffmanDecoder::new(table).unpack(packet.remaining(), characters)?)
    }
}
