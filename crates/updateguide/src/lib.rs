//! `updateguide` - Firmware update instructions for a catalog of boards
//!
//! This library backs the board picker of a firmware update page: it loads the
//! board catalog, resolves a selected board (by name or from the page URL) to
//! per-OS instructions and a firmware file, and renders the page regions.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod chooser;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod query;
pub mod render;
pub mod resolver;
pub mod search;

pub use catalog::{
    load_catalog, load_catalog_file, load_catalog_str, BoardRecord, Catalog, CatalogLoad,
    FirmwareInfo, FirmwareVersion,
};
pub use chooser::{build_version_chooser, ChooserModel};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use platform::Os;
pub use query::query_parameter;
pub use render::{render, RenderedRegions};
pub use resolver::{BoardInstructionResolver, ResolvedSelection};
pub use search::suggest;
