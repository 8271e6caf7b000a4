use thiserror::Error;

use crate::huffman::HuffmanTableError;
use crate::huffman_decoder::HuffmanDecodingError;
use crate::huffman_encoder::HuffmanEncodingError;
use crate::packet::PacketError;

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    #[error("huffman table has not been loaded")]
    Uninitialized,

    #[error("malformed huffman table: {0}")]
    Table(#[from] HuffmanTableError),

    #[error("failed to decode message: {0}")]
    Decoding(#[from] HuffmanDecodingError),

    #[error("failed to encode message: {0}")]
    Encoding(#[from] HuffmanEncodingError),

    #[error(transparent)]
    Packet(#[from] PacketError),
}
