//! Canonical Huffman code table built from a per-symbol code length vector.
//!
//! The table holds three views of the same code: the raw lengths, the
//! left-justified canonical code word of every symbol, and a decode trie
//! stored as a flat arena of tagged nodes.

use bitvec::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Longest code word the table can hold.
pub const MAX_CODE_LENGTH: usize = 32;

/// One entry per possible byte value.
pub const SYMBOL_COUNT: usize = 256;

/// Node id of the trie root.
pub const ROOT: u32 = 0;

type CodeLengths = [u8; SYMBOL_COUNT];
type CanonicalCodes = [u32; SYMBOL_COUNT];
type FreeSlots = [u32; MAX_CODE_LENGTH + 1];

/// Sum of `2^(32 - len)` over the lengths of a complete code.
const KRAFT_TOTAL: u64 = 1 << 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanTableError {
    #[error("code length table has {0} entries, at most 256 are allowed")]
    TooManySymbols(usize),

    #[error("symbol {symbol} has code length {length}, at most 32 is allowed")]
    CodeTooLong { symbol: u8, length: u8 },

    #[error("code lengths do not form a complete prefix code (kraft sum {sum:#x}, expected 0x100000000)")]
    KraftViolation { sum: u64 },

    #[error("code for symbol {0} collides with another code")]
    PrefixCollision(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieNode {
    Branch { zero: Option<u32>, one: Option<u32> },
    Leaf(u8),
}

impl TrieNode {
    const EMPTY: Self = TrieNode::Branch {
        zero: None,
        one: None,
    };

    /// Child reached by `bit`, or `None` for leaves and unpopulated edges.
    pub fn child(&self, bit: bool) -> Option<u32> {
        match *self {
            TrieNode::Branch { zero, one } => {
                if bit {
                    one
                } else {
                    zero
                }
            }
            TrieNode::Leaf(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    lengths: CodeLengths,
    codes: CanonicalCodes,
    trie: Vec<TrieNode>,
}

impl HuffmanTable {
    /// Builds the canonical code for `lengths`, where `lengths[b]` is the
    /// number of bits in the code of byte `b` and zero marks an unused byte.
    ///
    /// Tables shorter than 256 entries are padded with zero lengths. The
    /// lengths must describe a complete prefix code.
    pub fn from_lengths(lengths: &[u8]) -> Result<Self, HuffmanTableError> {
        if lengths.len() > SYMBOL_COUNT {
            return Err(HuffmanTableError::TooManySymbols(lengths.len()));
        }

        let mut table_lengths = [0u8; SYMBOL_COUNT];
        table_lengths[..lengths.len()].copy_from_slice(lengths);
        validate(&table_lengths)?;

        let mut codes = [0u32; SYMBOL_COUNT];
        let mut free_slots: FreeSlots = [0; MAX_CODE_LENGTH + 1];
        let mut trie = vec![TrieNode::EMPTY];

        for (symbol, &length) in table_lengths.iter().enumerate() {
            if length == 0 {
                continue;
            }
            let code = claim_code(&mut free_slots, length as usize);
            codes[symbol] = code;
            insert(&mut trie, symbol as u8, code, length as usize)?;
        }

        debug!(
            symbols = table_lengths.iter().filter(|&&len| len != 0).count(),
            nodes = trie.len(),
            "built huffman table"
        );

        Ok(Self {
            lengths: table_lengths,
            codes,
            trie,
        })
    }

    /// Left-justified code word and its length in bits, if `symbol` is coded.
    pub fn code(&self, symbol: u8) -> Option<(u32, u8)> {
        match self.lengths[symbol as usize] {
            0 => None,
            length => Some((self.codes[symbol as usize], length)),
        }
    }

    pub fn length(&self, symbol: u8) -> u8 {
        self.lengths[symbol as usize]
    }

    pub fn lengths(&self) -> &[u8; SYMBOL_COUNT] {
        &self.lengths
    }

    pub fn codes(&self) -> &[u32; SYMBOL_COUNT] {
        &self.codes
    }

    pub fn node(&self, id: u32) -> Option<&TrieNode> {
        self.trie.get(id as usize)
    }

    pub fn trie(&self) -> &[TrieNode] {
        &self.trie
    }

    /// Number of symbols with a code.
    pub fn symbol_count(&self) -> usize {
        self.lengths.iter().filter(|&&len| len != 0).count()
    }
}

fn validate(lengths: &CodeLengths) -> Result<(), HuffmanTableError> {
    let mut sum = 0u64;
    for (symbol, &length) in lengths.iter().enumerate() {
        if length as usize > MAX_CODE_LENGTH {
            return Err(HuffmanTableError::CodeTooLong {
                symbol: symbol as u8,
                length,
            });
        }
        if length != 0 {
            sum += 1u64 << (MAX_CODE_LENGTH - length as usize);
        }
    }

    if sum != KRAFT_TOTAL {
        return Err(HuffmanTableError::KraftViolation { sum });
    }
    Ok(())
}

/// Takes the next free code of `length` bits and advances the free slots.
///
/// `free_slots[len]` is the next unused left-justified code of `len` bits;
/// slot 0 stays zero and acts as the exhausted marker for length 1.
fn claim_code(free_slots: &mut FreeSlots, length: usize) -> u32 {
    let unit = 1u32 << (MAX_CODE_LENGTH - length);
    let current = free_slots[length];

    let next = if current & unit == 0 {
        // Shorter lengths that shared this slot are now half used.
        for shorter in (1..length).rev() {
            let slot = free_slots[shorter];
            if slot != current {
                break;
            }
            let shorter_unit = 1u32 << (MAX_CODE_LENGTH - shorter);
            if slot & shorter_unit != 0 {
                free_slots[shorter] = free_slots[shorter - 1];
                break;
            }
            free_slots[shorter] = slot | shorter_unit;
        }
        current | unit
    } else {
        free_slots[length - 1]
    };

    free_slots[length] = next;
    for slot in free_slots[length + 1..].iter_mut() {
        if *slot == current {
            *slot = next;
        }
    }

    current
}

fn insert(
    trie: &mut Vec<TrieNode>,
    symbol: u8,
    code: u32,
    length: usize,
) -> Result<(), HuffmanTableError> {
    let mut node = ROOT as usize;

    for (depth, bit) in code.view_bits::<Msb0>()[..length].iter().by_vals().enumerate() {
        let last = depth + 1 == length;
        let next_id = trie.len() as u32;

        let slot = match &mut trie[node] {
            TrieNode::Branch { zero, one } => {
                if bit {
                    one
                } else {
                    zero
                }
            }
            TrieNode::Leaf(_) => return Err(HuffmanTableError::PrefixCollision(symbol)),
        };

        let existing = *slot;
        let child = match existing {
            Some(_) if last => return Err(HuffmanTableError::PrefixCollision(symbol)),
            Some(child) => child,
            None => {
                *slot = Some(next_id);
                next_id
            }
        };

        if child == next_id {
            trie.push(if last {
                TrieNode::Leaf(symbol)
            } else {
                TrieNode::EMPTY
            });
        }
        node = child as usize;
    }

    Ok(())
}
