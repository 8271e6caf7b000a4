use crate::bits::BitReader;
use crate::huffman::{HuffmanTable, TrieNode, ROOT};

use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanDecodingError {
    #[error("bit {bit} does not follow any code in the huffman table")]
    MalformedStream { bit: usize },

    #[error("input ended after {decoded} of {expected} characters")]
    Truncated { decoded: usize, expected: usize },
}

pub struct HuffmanDecoder<'a> {
    pub table: &'a HuffmanTable,
}

impl<'a> HuffmanDecoder<'a> {
    pub fn new(table: &'a HuffmanTable) -> Self {
        Self { table }
    }

    /// Decodes exactly `count` characters from `data`. Bits after the last
    /// character are ignored.
    pub fn unpack(&self, data: &[u8], count: usize) -> Result<String, HuffmanDecodingError> {
        if count == 0 {
            return Ok(String::new());
        }
        // Every character takes at least one bit.
        let mut message = String::with_capacity(count.min(data.len() * 8));

        let mut reader = BitReader::new(data);
        let mut decoded = 0;
        let mut node = ROOT;

        while let Some(bit) = reader.read_bit() {
            let malformed = || HuffmanDecodingError::MalformedStream {
                bit: reader.position() - 1,
            };
            let child = self
                .table
                .node(node)
                .and_then(|node| node.child(bit))
                .ok_or_else(malformed)?;

            match self.table.node(child) {
                Some(TrieNode::Leaf(symbol)) => {
                    message.push(char::from(*symbol));
                    decoded += 1;
                    if decoded == count {
                        trace!(characters = count, bits = reader.position(), "unpacked message");
                        return Ok(message);
                    }
                    node = ROOT;
                }
                Some(TrieNode::Branch { .. }) => node = child,
                None => return Err(malformed()),
            }
        }

        Err(HuffmanDecodingError::Truncated {
            decoded,
            expected: count,
        })
    }
}
