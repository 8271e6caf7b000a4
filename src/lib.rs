//! Canonical Huffman compression for chat messages.
//!
//! A [`HuffmanTable`] is built once from a 256-entry code length table and
//! shared by every [`HuffmanCodec`] clone. Outgoing messages are sanitized to
//! a single byte alphabet, prefixed with their character count and packed
//! MSB-first into a [`PacketBuilder`]; incoming payloads are decoded back to
//! exactly the advertised number of characters.

pub mod bits;
pub mod codec;
pub mod config;
pub mod huffman;
pub mod huffman_decoder;
pub mod huffman_encoder;
pub mod packet;
pub mod source;

mod error;

pub use codec::HuffmanCodec;
pub use config::HuffmanConfig;
pub use error::{HuffmanError, Result};
pub use huffman::{HuffmanTable, HuffmanTableError, TrieNode};
pub use huffman_decoder::{HuffmanDecoder, HuffmanDecodingError};
pub use huffman_encoder::{format_message, sanitize, HuffmanEncoder, HuffmanEncodingError};
pub use packet::{Packet, PacketBuilder, PacketError};
pub use source::{MemoryTableSource, TableSource};
