//! Board catalog
//!
//! The catalog is built once from the site generator's board data and is
//! immutable afterwards. Lookups are by exact board name.

mod load;
mod model;

pub use load::{load_catalog, load_catalog_file, load_catalog_str, CatalogLoad};
pub use model::{
    BoardRecord, DefaultEntry, FirmwareInfo, FirmwareVersion, InstructionsSource,
    PerOsInstructions, SingleFirmware, DEFAULT_KEY,
};

use std::collections::{BTreeMap, HashMap};

/// Validated, order-preserving list of boards plus the defaults table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    boards: Vec<BoardRecord>,
    defaults: BTreeMap<String, DefaultEntry>,
    /// Board name -> index into `boards`.
    index: HashMap<String, usize>,
}

impl Catalog {
    /// All boards in catalog order.
    #[must_use]
    pub fn boards(&self) -> &[BoardRecord] {
        &self.boards
    }

    /// Number of boards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Check if the catalog has no boards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Find a board by exact, case-sensitive name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&BoardRecord> {
        self.index.get(name).and_then(|&i| self.boards.get(i))
    }

    /// Look up a default entry by key.
    #[must_use]
    pub fn default_entry(&self, key: &str) -> Option<&DefaultEntry> {
        self.defaults.get(key)
    }

    /// The default entry a board falls back to.
    #[must_use]
    pub fn defaults_for(&self, board: &BoardRecord) -> Option<&DefaultEntry> {
        self.default_entry(&board.defaults)
    }

    /// Keys of the defaults table, sorted.
    pub fn default_keys(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }
}
