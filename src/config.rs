use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DESKTOP_LINK;
use crate::error::Result;

/// Context provided by the hosting shell and used while rendering the panel
/// and naming downloaded files
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    // Symbol shown in keyboard shortcut hints (e.g "Ctrl" or "⌘")
    pub action_shortcut_symbol: String,
    // Set when the shell can save files directly (desktop launcher)
    pub support_files: bool,
    pub desktop_link: String,
    pub database_file_extension: String,
    pub xml_file_extension: String,
    pub key_file_extension: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            action_shortcut_symbol: "Ctrl".into(),
            support_files: false,
            desktop_link: DEFAULT_DESKTOP_LINK.into(),
            database_file_extension: "kdbx".into(),
            xml_file_extension: "xml".into(),
            key_file_extension: "key".into(),
        }
    }
}

impl PanelConfig {
    // Missing fields take their default values
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }
}
