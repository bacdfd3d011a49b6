use serde::{Deserialize, Serialize};

/// Key file part of the database settings
///
/// `old_key_file_name` is the key file the database had when it was opened and
/// `key_file_name` is the one to be used on the next save.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct KeyFileState {
    pub key_file_name: Option<String>,
    pub old_key_file_name: Option<String>,
    // Set when the user made an explicit key file choice since opening
    pub key_file_changed: bool,
    // Set when the current key file was generated in this session
    pub is_generated: bool,
}

impl KeyFileState {
    /// State of a database that was just opened with the given key file (if any)
    pub fn opened_with(key_file_name: Option<&str>) -> Self {
        let name = key_file_name
            .filter(|n| !n.trim().is_empty())
            .map(|n| n.to_string());
        Self {
            key_file_name: name.clone(),
            old_key_file_name: name,
            key_file_changed: false,
            is_generated: false,
        }
    }

    // An empty name is treated the same as no name
    pub fn current_name(&self) -> Option<&str> {
        self.key_file_name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn old_name(&self) -> Option<&str> {
        self.old_key_file_name.as_deref().filter(|n| !n.is_empty())
    }

    /// A pending new key file exists (selected from disk or generated)
    pub fn has_new_key_file(&self) -> bool {
        self.key_file_changed && self.current_name().is_some()
    }
}

/// The settings of an opened database shown and edited in the file settings panel
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct DatabaseSettings {
    pub name: String,
    // Full path or uri of the database file, if it was loaded from one
    pub path: Option<String>,
    pub default_user: String,
    pub recycle_bin_enabled: bool,
    pub history_max_items: i32,
    // In bytes
    pub history_max_size: i64,
    pub key_encryption_rounds: i64,
    // Only used to render a masked placeholder
    pub password_length: usize,
    pub password_changed: bool,
    // Set for a newly created database that was never saved
    pub created: bool,
    pub modified: bool,
    pub key_file: KeyFileState,
}

impl DatabaseSettings {
    pub fn set_database_name(&mut self, name: &str) -> &mut Self {
        self.name = name.into();
        self
    }
}
