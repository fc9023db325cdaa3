//! Board selection to instructions resolution.
//!
//! Turns a selected board name into everything the update page shows: one
//! instruction body per operating system, the firmware file name, and the
//! versions to choose from. Missing instruction bodies are filled from the
//! board's default entry; a missing board is the only failure a caller sees.

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{
    BoardRecord, Catalog, DefaultEntry, FirmwareInfo, FirmwareVersion, PerOsInstructions,
};
use crate::error::{Error, Result};
use crate::platform::Os;
use crate::query::query_parameter;

/// Display value when a board publishes no firmware.
pub const NO_FIRMWARE: &str = "None";

/// Instruction bodies with every system filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInstructions {
    /// Windows instructions.
    pub windows: String,
    /// Linux instructions.
    pub linux: String,
    /// macOS instructions.
    pub osx: String,
}

impl ResolvedInstructions {
    /// Body for one system.
    #[must_use]
    pub fn get(&self, os: Os) -> &str {
        match os {
            Os::Windows => &self.windows,
            Os::Linux => &self.linux,
            Os::Osx => &self.osx,
        }
    }
}

/// Display model of one selected board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelection {
    /// The matched record.
    pub board: BoardRecord,
    /// Fully populated instructions.
    pub instructions: ResolvedInstructions,
    /// Firmware file name currently displayed.
    pub display_firmware_name: String,
    /// Selectable versions; empty unless the board lists versions.
    pub version_choices: Vec<FirmwareVersion>,
    /// Index into `version_choices` of the version shown.
    pub selected_version: usize,
}

impl ResolvedSelection {
    /// Show the firmware of another version.
    ///
    /// Only the displayed file name changes; instructions stay as they are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFirmwareVersion`] if the board has no version
    /// with this label.
    pub fn select_version(&mut self, label: &str) -> Result<()> {
        let index = self
            .version_choices
            .iter()
            .position(|v| v.label == label)
            .ok_or_else(|| Error::UnknownFirmwareVersion {
                board: self.board.name.clone(),
                label: label.to_string(),
            })?;
        self.display_firmware_name
            .clone_from(&self.version_choices[index].file_name);
        self.selected_version = index;
        Ok(())
    }

    /// Check whether the board publishes any firmware.
    #[must_use]
    pub fn has_firmware(&self) -> bool {
        !matches!(self.board.firmware, FirmwareInfo::None)
    }
}

/// Resolves board names against an immutable catalog.
///
/// Construct once at page initialization and hand a reference to whatever
/// handles selection events.
#[derive(Debug, Clone)]
pub struct BoardInstructionResolver {
    catalog: Catalog,
    query_param: String,
}

impl BoardInstructionResolver {
    /// Create a resolver reading the board from the `board` query parameter.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::with_query_param(catalog, crate::config::DEFAULT_QUERY_PARAM)
    }

    /// Create a resolver with a custom query parameter name.
    #[must_use]
    pub fn with_query_param(catalog: Catalog, query_param: impl Into<String>) -> Self {
        Self {
            catalog,
            query_param: query_param.into(),
        }
    }

    /// The catalog being resolved against.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Name of the query parameter carrying a preselected board.
    #[must_use]
    pub fn query_param(&self) -> &str {
        &self.query_param
    }

    /// Resolve a board by exact, case-sensitive name.
    ///
    /// Every call builds a fresh selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoardNotFound`] when no board has this name.
    pub fn resolve_by_name(&self, name: &str) -> Result<ResolvedSelection> {
        let Some(board) = self.catalog.find(name) else {
            warn!(name, "Selected board not in catalog");
            return Err(Error::not_found(name));
        };

        let entry = self.catalog.defaults_for(board);
        let instructions = fill_instructions(board.own_instructions(), entry).map_err(|os| {
            Error::malformed(
                board.position,
                Some(board.name.as_str()),
                format!("no {os} instructions and no default to fall back to"),
            )
        })?;
        let (display_firmware_name, version_choices) = firmware_display(&board.firmware, entry)
            .map_err(|reason| Error::malformed(board.position, Some(board.name.as_str()), reason))?;

        debug!(
            name,
            firmware = %display_firmware_name,
            versions = version_choices.len(),
            "Resolved board"
        );

        Ok(ResolvedSelection {
            board: board.clone(),
            instructions,
            display_firmware_name,
            version_choices,
            selected_version: 0,
        })
    }

    /// Resolve the board named by the URL's query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingQueryParameter`] when the URL does not carry
    /// the parameter, or [`Error::BoardNotFound`] when it names no board.
    pub fn resolve_by_query(&self, url: &str) -> Result<ResolvedSelection> {
        let name = self.resolve_by_query_parameter(url).ok_or_else(|| {
            debug!(url, param = %self.query_param, "No board in URL");
            Error::MissingQueryParameter {
                param: self.query_param.clone(),
            }
        })?;
        self.resolve_by_name(name)
    }

    /// Raw board name from the URL's query parameter, if present.
    #[must_use]
    pub fn resolve_by_query_parameter<'a>(&self, url: &'a str) -> Option<&'a str> {
        query_parameter(url, &self.query_param)
    }
}

/// Fill each system's body from the record, then from its default entry.
///
/// Fails with the first system that has neither.
pub(crate) fn fill_instructions(
    own: Option<&PerOsInstructions>,
    entry: Option<&DefaultEntry>,
) -> std::result::Result<ResolvedInstructions, Os> {
    let body = |os: Os| {
        own.and_then(|o| o.get(os))
            .or_else(|| entry.and_then(|e| e.instructions.get(os)))
            .map(str::to_string)
            .ok_or(os)
    };

    Ok(ResolvedInstructions {
        windows: body(Os::Windows)?,
        linux: body(Os::Linux)?,
        osx: body(Os::Osx)?,
    })
}

/// Displayed firmware name and version list for a board.
///
/// A single firmware is named `{version}_{stem}{format}`, where the version
/// and format come from the record if it has them and from its default
/// entry otherwise. Versioned firmware shows its first entry.
pub(crate) fn firmware_display(
    firmware: &FirmwareInfo,
    entry: Option<&DefaultEntry>,
) -> std::result::Result<(String, Vec<FirmwareVersion>), &'static str> {
    match firmware {
        FirmwareInfo::None => Ok((NO_FIRMWARE.to_string(), Vec::new())),
        FirmwareInfo::Single(single) => {
            let version = single
                .version
                .as_deref()
                .or_else(|| entry.and_then(|e| e.fw_version.as_deref()))
                .ok_or("no firmware version and no default fw_version")?;
            let format = single
                .image_format
                .as_deref()
                .or_else(|| entry.and_then(|e| e.image_format.as_deref()))
                .ok_or("no image format and no default image_format")?;
            Ok((format!("{version}_{}{format}", single.stem), Vec::new()))
        }
        FirmwareInfo::Versioned(versions) => {
            let first = versions.first().ok_or("fw_versions is empty")?;
            Ok((first.file_name.clone(), versions.clone()))
        }
    }
}
