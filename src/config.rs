//! Where the codec finds its code length table.

/// Index holding the huffman code lengths in the resource store.
pub const DEFAULT_INDEX: u32 = 10;

/// File within [`DEFAULT_INDEX`] holding the code lengths.
pub const DEFAULT_FILE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    pub index: u32,
    pub file: u32,
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX,
            file: DEFAULT_FILE,
        }
    }
}

impl HuffmanConfig {
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn with_file(mut self, file: u32) -> Self {
        self.file = file;
        self
    }
}
