//! Operating systems that update instructions are written for.
//!
//! Every board carries one instruction body per [`Os`]. The page opens the
//! tab matching the visitor's system, detected from the browser's
//! `navigator.appVersion` string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A host operating system with its own instructions pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Os {
    /// Microsoft Windows.
    Windows,
    /// Linux and other X11 desktops.
    Linux,
    /// macOS.
    Osx,
}

impl Os {
    /// All systems, in pane order.
    pub const ALL: [Os; 3] = [Os::Windows, Os::Linux, Os::Osx];

    /// Pick the default tab from a browser `appVersion`/user agent string.
    ///
    /// Checks run in a fixed order and a later hit overrides an earlier one,
    /// so a string naming both `Win` and `Linux` selects Linux.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let mut detected = None;
        if user_agent.contains("Win") {
            detected = Some(Self::Windows);
        }
        if user_agent.contains("Mac") {
            detected = Some(Self::Osx);
        }
        if user_agent.contains("X11") || user_agent.contains("Linux") {
            detected = Some(Self::Linux);
        }
        detected
    }

    /// The system this binary was built for, if it has a pane.
    #[must_use]
    pub fn current() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::Osx),
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Identifier of the page region holding this system's instructions.
    #[must_use]
    pub fn region_id(self) -> &'static str {
        match self {
            Self::Windows => "update-instructions-windows",
            Self::Linux => "update-instructions-linux",
            Self::Osx => "update-instructions-osx",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::Linux => write!(f, "linux"),
            Self::Osx => write!(f, "osx"),
        }
    }
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "linux" => Ok(Self::Linux),
            "osx" | "macos" | "mac" => Ok(Self::Osx),
            other => Err(format!("unknown operating system: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_user_agent() {
        let ua = "5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
        assert_eq!(Os::from_user_agent(ua), Some(Os::Windows));
    }

    #[test]
    fn test_mac_user_agent() {
        let ua = "5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
        assert_eq!(Os::from_user_agent(ua), Some(Os::Osx));
    }

    #[test]
    fn test_linux_user_agents() {
        assert_eq!(
            Os::from_user_agent("5.0 (X11; Ubuntu; rv:109.0)"),
            Some(Os::Linux)
        );
        assert_eq!(
            Os::from_user_agent("5.0 (Linux; Android 13)"),
            Some(Os::Linux)
        );
    }

    #[test]
    fn test_later_match_overrides() {
        // X11 on a string that also mentions Mac
        assert_eq!(Os::from_user_agent("Mac X11"), Some(Os::Linux));
        assert_eq!(Os::from_user_agent("Win Mac"), Some(Os::Osx));
    }

    #[test]
    fn test_unknown_user_agent() {
        assert_eq!(Os::from_user_agent("curl/8.4.0"), None);
        assert_eq!(Os::from_user_agent(""), None);
    }

    #[test]
    fn test_display_and_parse() {
        for os in Os::ALL {
            assert_eq!(os.to_string().parse::<Os>(), Ok(os));
        }
        assert_eq!("macOS".parse::<Os>(), Ok(Os::Osx));
        assert!("beos".parse::<Os>().is_err());
    }

    #[test]
    fn test_region_ids_distinct() {
        assert_eq!(Os::Windows.region_id(), "update-instructions-windows");
        assert_ne!(Os::Linux.region_id(), Os::Osx.region_id());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Os::Osx).unwrap(), "\"osx\"");
        let os: Os = serde_json::from_str("\"windows\"").unwrap();
        assert_eq!(os, Os::Windows);
    }
}
