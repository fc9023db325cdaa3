//! Catalog loading and validation
//!
//! Turns the site generator's board data into a [`Catalog`]. Two document
//! shapes are accepted:
//!
//! - keyed: `{"defaults": {"<key>": {...}}, "boards": [...]}`
//! - legacy: a bare array whose first element carries a `default` object
//!
//! Every record is checked once, here, so that resolution never meets a
//! record it cannot fill in.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{CatalogConfig, DuplicatePolicy};
use crate::error::{Error, Result};
use crate::resolver::{fill_instructions, firmware_display};

use super::model::{
    BoardRecord, DefaultEntry, FirmwareInfo, FirmwareVersion, InstructionsSource,
    PerOsInstructions, SingleFirmware, DEFAULT_KEY,
};
use super::Catalog;

/// A board record as written in the site data files.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    name: Option<String>,
    #[serde(alias = "code")]
    product_code: Option<String>,
    #[serde(alias = "logoURL")]
    logo_url: Option<String>,
    fw_name: Option<String>,
    fw_version: Option<String>,
    image_format: Option<String>,
    fw_versions: Option<Vec<(String, String)>>,
    instructions: Option<PerOsInstructions>,
    instructions_ref: Option<String>,
    default: Option<DefaultEntry>,
}

/// Outcome of loading a catalog.
#[derive(Debug)]
pub struct CatalogLoad {
    /// The usable catalog.
    pub catalog: Catalog,
    /// One error per record that was left out.
    pub rejected: Vec<Error>,
}

impl CatalogLoad {
    /// Check whether every record made it into the catalog.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Load a catalog from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a catalog document,
/// or (depending on `options`) contains malformed or duplicate records.
pub fn load_catalog_file(path: impl AsRef<Path>, options: &CatalogConfig) -> Result<CatalogLoad> {
    let path = path.as_ref();
    debug!("Reading catalog from {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|source| Error::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog_str(&text, options)
}

/// Load a catalog from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or not a catalog document,
/// or (depending on `options`) contains malformed or duplicate records.
pub fn load_catalog_str(json: &str, options: &CatalogConfig) -> Result<CatalogLoad> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    load_catalog(&value, options)
}

/// Build a catalog from an already-parsed document.
///
/// Malformed records are logged and collected in [`CatalogLoad::rejected`];
/// with `options.strict` the first one is returned as the error instead.
///
/// # Errors
///
/// Returns an error if the document shape is unknown, the defaults table is
/// unreadable, a duplicate name is found under [`DuplicatePolicy::Error`], or
/// a record is malformed in strict mode.
pub fn load_catalog(document: &serde_json::Value, options: &CatalogConfig) -> Result<CatalogLoad> {
    let (mut defaults, records, legacy) = match document {
        serde_json::Value::Array(records) => (BTreeMap::new(), records.as_slice(), true),
        serde_json::Value::Object(map) => {
            let records = map
                .get("boards")
                .and_then(serde_json::Value::as_array)
                .ok_or_else(|| Error::invalid_catalog("object catalog needs a 'boards' array"))?;
            let defaults = match map.get("defaults") {
                Some(table) => serde_json::from_value::<BTreeMap<String, DefaultEntry>>(
                    table.clone(),
                )
                .map_err(|e| Error::invalid_catalog(format!("unreadable defaults table: {e}")))?,
                None => BTreeMap::new(),
            };
            (defaults, records.as_slice(), false)
        }
        _ => {
            return Err(Error::invalid_catalog(
                "expected an array of boards or an object with 'boards'",
            ))
        }
    };

    let mut parsed = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, value) in records.iter().enumerate() {
        match serde_json::from_value::<RawRecord>(value.clone()) {
            Ok(raw) => parsed.push((index, raw)),
            Err(e) => {
                let name = value.get("name").and_then(serde_json::Value::as_str);
                reject(
                    Error::malformed(index, name, format!("unreadable record: {e}")),
                    options,
                    &mut rejected,
                )?;
            }
        }
    }

    // The first element of a legacy array holds the site-wide defaults
    let mut legacy_holder = false;
    if legacy {
        if let Some((0, raw)) = parsed.first_mut() {
            if let Some(entry) = raw.default.take() {
                debug!("Using legacy defaults from record #0");
                defaults.entry(DEFAULT_KEY.to_string()).or_insert(entry);
                legacy_holder = true;
            }
        }
    }

    let mut boards = Vec::with_capacity(parsed.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for (position, raw) in parsed {
        if raw.default.is_some() {
            warn!(position, "Ignoring 'default' block outside the first legacy record");
        }
        if legacy_holder && position == 0 && is_defaults_holder(&raw) {
            debug!(position, "Record only carries defaults, not a board");
            continue;
        }

        let board = match validate(position, raw, &defaults) {
            Ok(board) => board,
            Err(err) => {
                reject(err, options, &mut rejected)?;
                continue;
            }
        };

        if let Some(&first) = index.get(&board.name) {
            let first_position = boards
                .get(first)
                .map_or(first, |b: &BoardRecord| b.position);
            match options.duplicates {
                DuplicatePolicy::First => {
                    warn!(
                        name = %board.name,
                        first = first_position,
                        repeated = position,
                        "Duplicate board name, keeping the first record"
                    );
                    continue;
                }
                DuplicatePolicy::Error => {
                    return Err(Error::DuplicateBoard {
                        name: board.name,
                        first: first_position,
                        second: position,
                    });
                }
            }
        }

        index.insert(board.name.clone(), boards.len());
        boards.push(board);
    }

    info!(
        boards = boards.len(),
        defaults = defaults.len(),
        rejected = rejected.len(),
        "Catalog loaded"
    );

    Ok(CatalogLoad {
        catalog: Catalog {
            boards,
            defaults,
            index,
        },
        rejected,
    })
}

/// Record a malformed record, or fail right away in strict mode.
fn reject(err: Error, options: &CatalogConfig, rejected: &mut Vec<Error>) -> Result<()> {
    if options.strict {
        return Err(err);
    }
    warn!("{err}");
    rejected.push(err);
    Ok(())
}

/// The legacy defaults element has no board data of its own.
fn is_defaults_holder(raw: &RawRecord) -> bool {
    raw.name.as_deref().map_or(true, str::is_empty)
        && raw.product_code.is_none()
        && raw.fw_name.is_none()
        && raw.fw_versions.is_none()
        && raw.instructions.is_none()
}

/// Check one raw record against the defaults table and build the board.
fn validate(
    position: usize,
    raw: RawRecord,
    defaults: &BTreeMap<String, DefaultEntry>,
) -> Result<BoardRecord> {
    let name = match raw.name.as_deref() {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => return Err(Error::malformed(position, None, "missing name")),
    };
    let malformed = |reason: String| Error::malformed(position, Some(name.as_str()), reason);

    let product_code = raw
        .product_code
        .clone()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| malformed("missing product_code".to_string()))?;
    let logo_url = raw
        .logo_url
        .clone()
        .ok_or_else(|| malformed("missing logoURL".to_string()))?;

    let defaults_key = raw
        .instructions_ref
        .clone()
        .unwrap_or_else(|| DEFAULT_KEY.to_string());
    let entry = defaults.get(&defaults_key);
    if entry.is_none() && raw.instructions_ref.is_some() {
        return Err(malformed(format!("unknown instructions_ref '{defaults_key}'")));
    }

    let instructions = match (raw.instructions, &raw.instructions_ref) {
        (Some(own), _) => InstructionsSource::Inline(own),
        (None, Some(key)) => InstructionsSource::DefaultRef(key.clone()),
        (None, None) => InstructionsSource::Inline(PerOsInstructions::default()),
    };

    let own = match &instructions {
        InstructionsSource::Inline(own) => Some(own),
        InstructionsSource::DefaultRef(_) => None,
    };
    if let Err(os) = fill_instructions(own, entry) {
        return Err(malformed(format!(
            "no {os} instructions and no default to fall back to"
        )));
    }

    let firmware = match (raw.fw_versions, raw.fw_name) {
        (Some(versions), _) => {
            if versions.is_empty() {
                return Err(malformed("fw_versions is empty".to_string()));
            }
            FirmwareInfo::Versioned(
                versions
                    .into_iter()
                    .map(|(label, file_name)| FirmwareVersion::new(label, file_name))
                    .collect(),
            )
        }
        (None, Some(stem)) if !stem.is_empty() => FirmwareInfo::Single(SingleFirmware {
            version: raw.fw_version,
            stem,
            image_format: raw.image_format,
        }),
        (None, Some(_)) => return Err(malformed("empty fw_name".to_string())),
        (None, None) => FirmwareInfo::None,
    };

    firmware_display(&firmware, entry).map_err(|reason| malformed(reason.to_string()))?;

    Ok(BoardRecord {
        position,
        name,
        product_code,
        logo_url,
        instructions,
        defaults: defaults_key,
        firmware,
    })
}
