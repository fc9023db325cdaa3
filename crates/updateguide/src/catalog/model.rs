//! Catalog data model
//!
//! Types representing boards, their firmware, and the shared default entries
//! that fill in whatever a board leaves out.

use serde::{Deserialize, Serialize};

use crate::platform::Os;

/// Key of the default entry used by records without an `instructions_ref`.
pub const DEFAULT_KEY: &str = "default";

/// Instruction bodies (pre-rendered HTML) per operating system.
///
/// A missing field means "use the default entry's body".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerOsInstructions {
    /// Windows instructions.
    pub windows: Option<String>,
    /// Linux instructions.
    pub linux: Option<String>,
    /// macOS instructions.
    pub osx: Option<String>,
}

impl PerOsInstructions {
    /// Body for one system, if present.
    #[must_use]
    pub fn get(&self, os: Os) -> Option<&str> {
        match os {
            Os::Windows => self.windows.as_deref(),
            Os::Linux => self.linux.as_deref(),
            Os::Osx => self.osx.as_deref(),
        }
    }
}

/// Shared fallback data for boards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultEntry {
    /// Version prefix of assembled firmware file names.
    pub fw_version: Option<String>,
    /// Image suffix of assembled firmware file names (e.g. `.bin`).
    pub image_format: Option<String>,
    /// Fallback instruction bodies.
    pub instructions: PerOsInstructions,
}

/// Where a board's instructions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionsSource {
    /// The record carries its own bodies; gaps fall back to its default entry.
    Inline(PerOsInstructions),
    /// The record uses a shared default entry wholesale.
    DefaultRef(String),
}

/// A firmware built under a single name stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleFirmware {
    /// Version prefix; falls back to the default entry when absent.
    pub version: Option<String>,
    /// Base name of the firmware file.
    pub stem: String,
    /// Image suffix; falls back to the default entry when absent.
    pub image_format: Option<String>,
}

/// One selectable firmware version of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareVersion {
    /// Label shown in the chooser.
    pub label: String,
    /// Firmware file offered for this version.
    pub file_name: String,
}

impl FirmwareVersion {
    /// Create a version entry.
    #[must_use]
    pub fn new(label: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            file_name: file_name.into(),
        }
    }
}

/// Firmware published for a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirmwareInfo {
    /// No firmware file is published.
    None,
    /// One firmware, named from a stem plus defaults.
    Single(SingleFirmware),
    /// Explicit versions; the first one is shown initially. Never empty.
    Versioned(Vec<FirmwareVersion>),
}

/// A validated board of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    /// Position of the record in the raw catalog.
    pub position: usize,
    /// Unique display name, also the lookup key.
    pub name: String,
    /// Opaque product code.
    pub product_code: String,
    /// Logo image URL.
    pub logo_url: String,
    /// Instruction source.
    pub instructions: InstructionsSource,
    /// Key of the default entry this record falls back to.
    pub defaults: String,
    /// Published firmware.
    pub firmware: FirmwareInfo,
}

impl BoardRecord {
    /// The record's own instruction bodies (empty when it only references defaults).
    #[must_use]
    pub fn own_instructions(&self) -> Option<&PerOsInstructions> {
        match &self.instructions {
            InstructionsSource::Inline(own) => Some(own),
            InstructionsSource::DefaultRef(_) => None,
        }
    }
}
