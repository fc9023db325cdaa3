//! Page region payloads.
//!
//! The update page has one pane per operating system, a firmware line, and
//! an optional version dropdown. This module produces the HTML strings that
//! go into those regions; presentation stays with the page.

use serde::Serialize;

use crate::chooser::build_version_chooser;
use crate::config::Config;
use crate::platform::Os;
use crate::resolver::{ResolvedSelection, NO_FIRMWARE};

/// Element id of the firmware line.
pub const FIRMWARE_REGION: &str = "file-name";

/// Element id of the version dropdown.
pub const CHOOSER_REGION: &str = "firmware-version";

/// HTML for every region of the update page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRegions {
    /// Windows pane.
    pub windows: String,
    /// Linux pane.
    pub linux: String,
    /// macOS pane.
    pub osx: String,
    /// Firmware line.
    pub firmware: String,
    /// Version dropdown, for boards with several versions.
    pub chooser: Option<String>,
    /// Tab to open first.
    pub default_tab: Os,
}

impl RenderedRegions {
    /// Pane content for one system.
    #[must_use]
    pub fn pane(&self, os: Os) -> &str {
        match os {
            Os::Windows => &self.windows,
            Os::Linux => &self.linux,
            Os::Osx => &self.osx,
        }
    }

    /// `(element id, html)` for every region that has content.
    #[must_use]
    pub fn regions(&self) -> Vec<(&'static str, &str)> {
        let mut regions: Vec<(&'static str, &str)> = Os::ALL
            .iter()
            .map(|os| (os.region_id(), self.pane(*os)))
            .collect();
        regions.push((FIRMWARE_REGION, self.firmware.as_str()));
        if let Some(chooser) = &self.chooser {
            regions.push((CHOOSER_REGION, chooser.as_str()));
        }
        regions
    }
}

/// Render a resolved selection.
///
/// `default_tab` falls back to Windows when the visitor's system is unknown.
#[must_use]
pub fn render(
    selection: &ResolvedSelection,
    config: &Config,
    default_tab: Option<Os>,
) -> RenderedRegions {
    RenderedRegions {
        windows: selection.instructions.windows.clone(),
        linux: selection.instructions.linux.clone(),
        osx: selection.instructions.osx.clone(),
        firmware: firmware_line(selection, config),
        chooser: build_version_chooser(selection).map(|chooser| {
            let mut html = format!("<select id=\"{CHOOSER_REGION}\">");
            for (i, option) in chooser.options.iter().enumerate() {
                let selected = if i == chooser.selected { " selected" } else { "" };
                html.push_str(&format!(
                    "<option value=\"{}\"{selected}>{}</option>",
                    escape_html(&option.file_name),
                    escape_html(&option.label)
                ));
            }
            html.push_str("</select>");
            html
        }),
        default_tab: default_tab.unwrap_or(Os::Windows),
    }
}

/// The firmware line: a download link, or plain text when the board has no
/// firmware.
#[must_use]
pub fn firmware_line(selection: &ResolvedSelection, config: &Config) -> String {
    if !selection.has_firmware() {
        return format!("Firmware File: {NO_FIRMWARE}");
    }
    let file_name = selection.display_firmware_name.as_str();
    let name = escape_html(file_name);
    format!(
        "Firmware File: <a href=\"{}\">{name}</a>",
        escape_html(&config.firmware_url(file_name))
    )
}

/// Escape text for use in HTML content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_catalog_str;
    use crate::config::CatalogConfig;
    use crate::resolver::BoardInstructionResolver;

    fn resolver() -> BoardInstructionResolver {
        let json = r#"{
            "defaults": {"default": {"fw_version": "0253", "image_format": ".bin",
                "instructions": {"windows": "<p>w</p>", "linux": "<p>l</p>", "osx": "<p>o</p>"}}},
            "boards": [
                {"name": "K64F", "product_code": "0240", "logoURL": "", "fw_name": "k64f_if"},
                {"name": "Bare", "product_code": "0001", "logoURL": ""},
                {"name": "Multi", "product_code": "0002", "logoURL": "",
                 "fw_versions": [["1.0", "a.hex"], ["1.1 <beta>", "b.hex"]]},
                {"name": "Odd", "product_code": "0003", "logoURL": "",
                 "fw_versions": [["0.1", "None"]]}
            ]
        }"#;
        BoardInstructionResolver::new(
            load_catalog_str(json, &CatalogConfig::default())
                .unwrap()
                .catalog,
        )
    }

    #[test]
    fn test_render_panes() {
        let selection = resolver().resolve_by_name("K64F").unwrap();
        let regions = render(&selection, &Config::default(), Some(Os::Linux));

        assert_eq!(regions.windows, "<p>w</p>");
        assert_eq!(regions.pane(Os::Linux), "<p>l</p>");
        assert_eq!(regions.osx, "<p>o</p>");
        assert_eq!(regions.default_tab, Os::Linux);
        assert!(regions.chooser.is_none());
    }

    #[test]
    fn test_firmware_link() {
        let selection = resolver().resolve_by_name("K64F").unwrap();
        let mut config = Config::default();
        config.page.base_url = "/DAPLink".to_string();
        let regions = render(&selection, &config, None);

        assert_eq!(
            regions.firmware,
            "Firmware File: <a href=\"/DAPLink/firmware/0253_k64f_if.bin\">0253_k64f_if.bin</a>"
        );
        assert_eq!(regions.default_tab, Os::Windows);
    }

    #[test]
    fn test_no_firmware_line() {
        let selection = resolver().resolve_by_name("Bare").unwrap();
        let regions = render(&selection, &Config::default(), None);
        assert_eq!(regions.firmware, "Firmware File: None");
    }

    #[test]
    fn test_file_named_none_keeps_link() {
        let selection = resolver().resolve_by_name("Odd").unwrap();
        let regions = render(&selection, &Config::default(), None);
        assert_eq!(
            regions.firmware,
            "Firmware File: <a href=\"/firmware/None\">None</a>"
        );
    }

    #[test]
    fn test_chooser_fragment() {
        let mut selection = resolver().resolve_by_name("Multi").unwrap();
        selection.select_version("1.1 <beta>").unwrap();
        let regions = render(&selection, &Config::default(), None);

        let chooser = regions.chooser.as_deref().unwrap();
        assert!(chooser.starts_with("<select id=\"firmware-version\">"));
        assert!(chooser.contains("<option value=\"a.hex\">1.0</option>"));
        assert!(chooser.contains("<option value=\"b.hex\" selected>1.1 &lt;beta&gt;</option>"));
        assert!(regions.firmware.contains("b.hex"));
    }

    #[test]
    fn test_regions_list() {
        let selection = resolver().resolve_by_name("Multi").unwrap();
        let regions = render(&selection, &Config::default(), None);
        let ids: Vec<_> = regions.regions().iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec![
                "update-instructions-windows",
                "update-instructions-linux",
                "update-instructions-osx",
                "file-name",
                "firmware-version",
            ]
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
