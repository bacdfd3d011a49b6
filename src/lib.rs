mod constants;
mod crypto;
mod util;

pub mod config;
pub mod db;
pub mod error;
pub mod field_commit;
pub mod form_data;
pub mod key_file_selector;
pub mod password_edit;
pub mod settings_service;

extern crate log;

pub use crate::config::PanelConfig;
pub use crate::db::{DatabaseModel, FileKey, KeyFileBackup, MemoryDatabase};
pub use crate::error::{Error, Result};
pub use crate::field_commit::{FieldCommit, NumericField, SettingField, TextField};
pub use crate::form_data::{DatabaseSettings, FileSettingsView, KeyFileState};
pub use crate::key_file_selector::{derive_options, KeyFileChoice, KeyFileOption, KeyFileOptions};
pub use crate::password_edit::{
    InputPresentation, PasswordEdit, PasswordEditState, PasswordFieldUpdate,
};
pub use crate::settings_service::FileSettingsPanel;

// Reexported so that callers can form protected password values
pub use secstr::SecStr;
