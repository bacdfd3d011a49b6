use serde::{Deserialize, Serialize};

use crate::key_file_selector::KeyFileOptions;
use crate::password_edit::InputPresentation;

/// Everything the shell needs to draw the file settings panel
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct FileSettingsView {
    // Shell context
    pub cmd: String,
    pub support_files: bool,
    pub desktop_link: String,

    pub name: String,
    pub path: Option<String>,
    // Masked placeholder, never the password itself
    pub password: String,
    pub password_presentation: InputPresentation,
    pub password_warning_visible: bool,
    pub default_user: String,
    pub recycle_bin_enabled: bool,
    pub history_max_items: i32,
    // In megabytes
    pub history_max_size: i64,
    pub key_encryption_rounds: i64,
    pub key_file_select: KeyFileOptions,
}
