//! Resource lookup for the raw code length table.

use std::collections::HashMap;

/// Supplies raw files by `(index, file)` id.
pub trait TableSource {
    fn fetch(&self, index: u32, file: u32) -> Option<Vec<u8>>;
}

impl<F> TableSource for F
where
    F: Fn(u32, u32) -> Option<Vec<u8>>,
{
    fn fetch(&self, index: u32, file: u32) -> Option<Vec<u8>> {
        self(index, file)
    }
}

/// Files held in memory, keyed by `(index, file)`.
#[derive(Debug, Default, Clone)]
pub struct MemoryTableSource {
    files: HashMap<(u32, u32), Vec<u8>>,
}

impl MemoryTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u32, file: u32, data: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        self.files.insert((index, file), data.into())
    }

    pub fn with_file(mut self, index: u32, file: u32, data: impl Into<Vec<u8>>) -> Self {
        self.insert(index, file, data);
        self
    }
}

impl TableSource for MemoryTableSource {
    fn fetch(&self, index: u32, file: u32) -> Option<Vec<u8>> {
        self.files.get(&(index, file)).cloned()
    }
}
