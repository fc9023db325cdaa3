//! Firmware version chooser.
//!
//! Boards that publish several firmware versions get a secondary dropdown.
//! Picking an entry only swaps the displayed file name.

use serde::Serialize;

use crate::catalog::FirmwareVersion;
use crate::resolver::ResolvedSelection;

/// Options of the version dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChooserModel {
    /// Entries in catalog order.
    pub options: Vec<FirmwareVersion>,
    /// Index of the entry currently shown.
    pub selected: usize,
}

impl ChooserModel {
    /// Select an entry by label and return its file name.
    ///
    /// An unknown label leaves the selection unchanged.
    pub fn select(&mut self, label: &str) -> Option<&str> {
        let index = self.options.iter().position(|v| v.label == label)?;
        self.selected = index;
        Some(self.options[index].file_name.as_str())
    }

    /// The entry currently shown.
    #[must_use]
    pub fn current(&self) -> Option<&FirmwareVersion> {
        self.options.get(self.selected)
    }

    /// `(label, file name)` pairs in display order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options
            .iter()
            .map(|v| (v.label.as_str(), v.file_name.as_str()))
    }
}

/// Build the dropdown for a selection, if it has more than one version.
///
/// The version last picked on the selection starts selected.
#[must_use]
pub fn build_version_chooser(selection: &ResolvedSelection) -> Option<ChooserModel> {
    if selection.version_choices.len() <= 1 {
        return None;
    }
    Some(ChooserModel {
        options: selection.version_choices.clone(),
        selected: selection.selected_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{load_catalog_str, FirmwareVersion};
    use crate::config::CatalogConfig;
    use crate::resolver::BoardInstructionResolver;

    fn resolver() -> BoardInstructionResolver {
        let json = r#"{
            "defaults": {"default": {"fw_version": "v1", "image_format": ".bin",
                "instructions": {"windows": "w", "linux": "l", "osx": "o"}}},
            "boards": [
                {"name": "multi", "product_code": "1", "logoURL": "",
                 "fw_versions": [["1.0", "fileA"], ["1.1", "fileB"]]},
                {"name": "one", "product_code": "2", "logoURL": "",
                 "fw_versions": [["1.0", "only"]]},
                {"name": "single", "product_code": "3", "logoURL": "", "fw_name": "app"},
                {"name": "twin", "product_code": "4", "logoURL": "",
                 "fw_versions": [["1.0", "same.hex"], ["1.0-hotfix", "same.hex"]]}
            ]
        }"#;
        BoardInstructionResolver::new(
            load_catalog_str(json, &CatalogConfig::default())
                .unwrap()
                .catalog,
        )
    }

    #[test]
    fn test_chooser_for_multiple_versions() {
        let selection = resolver().resolve_by_name("multi").unwrap();
        let chooser = build_version_chooser(&selection).unwrap();

        let pairs: Vec<_> = chooser.pairs().collect();
        assert_eq!(pairs, vec![("1.0", "fileA"), ("1.1", "fileB")]);
        assert_eq!(chooser.selected, 0);
        assert_eq!(chooser.current(), Some(&FirmwareVersion::new("1.0", "fileA")));
    }

    #[test]
    fn test_no_chooser_for_one_version() {
        let selection = resolver().resolve_by_name("one").unwrap();
        assert!(build_version_chooser(&selection).is_none());
    }

    #[test]
    fn test_no_chooser_for_single_firmware() {
        let selection = resolver().resolve_by_name("single").unwrap();
        assert!(build_version_chooser(&selection).is_none());
    }

    #[test]
    fn test_select() {
        let selection = resolver().resolve_by_name("multi").unwrap();
        let mut chooser = build_version_chooser(&selection).unwrap();

        assert_eq!(chooser.select("1.1"), Some("fileB"));
        assert_eq!(chooser.selected, 1);
        assert_eq!(chooser.select("3.0"), None);
        assert_eq!(chooser.selected, 1);
    }

    #[test]
    fn test_chooser_follows_selected_version() {
        let mut selection = resolver().resolve_by_name("multi").unwrap();
        selection.select_version("1.1").unwrap();

        let chooser = build_version_chooser(&selection).unwrap();
        assert_eq!(chooser.selected, 1);
    }

    #[test]
    fn test_chooser_keeps_label_when_files_match() {
        let mut selection = resolver().resolve_by_name("twin").unwrap();
        selection.select_version("1.0-hotfix").unwrap();

        let chooser = build_version_chooser(&selection).unwrap();
        assert_eq!(chooser.selected, 1);
        assert_eq!(chooser.current().map(|v| v.label.as_str()), Some("1.0-hotfix"));
    }
}
