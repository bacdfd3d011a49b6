mod file_key;
mod memory_db;

use secstr::SecStr;

use crate::error::Result;
use crate::form_data::{DatabaseSettings, KeyFileState};

pub use self::file_key::FileKey;
pub use self::memory_db::MemoryDatabase;

/// The key file in use together with its state, kept to undo a key file change
#[derive(Clone)]
pub struct KeyFileBackup {
    pub state: KeyFileState,
    pub file_key: Option<FileKey>,
    pub modified: bool,
}

/// The capabilities of an opened database used by the file settings panel
///
/// The panel never persists anything itself. It reads the current settings
/// snapshot and forwards validated changes through these calls.
pub trait DatabaseModel {
    fn settings(&self) -> &DatabaseSettings;

    fn set_name(&mut self, name: &str);
    fn set_default_user(&mut self, default_user: &str);
    fn set_recycle_bin_enabled(&mut self, enabled: bool);
    fn set_history_max_items(&mut self, max_items: i32);
    // In bytes
    fn set_history_max_size(&mut self, max_size: i64);
    fn set_key_encryption_rounds(&mut self, rounds: i64);

    /// Restores the password the database had when it was opened
    fn reset_password(&mut self);
    fn set_password(&mut self, password: SecStr);

    /// Restores the key file the database had when it was opened
    fn reset_key_file(&mut self);
    fn remove_key_file(&mut self);
    /// Uses the given content as the new key file. Nothing is changed when
    /// this returns an error
    fn set_key_file(&mut self, data: Vec<u8>, file_name: &str) -> Result<()>;
    /// Generates new key file content, uses it as the new key file and returns
    /// the content so that the user can keep a copy
    fn generate_and_set_key_file(&mut self) -> Result<Vec<u8>>;

    fn backup_key_file(&self) -> KeyFileBackup;
    /// Puts back the key file and its state exactly as they were at backup time
    fn restore_key_file(&mut self, backup: KeyFileBackup);

    fn serialize_to_binary(&self) -> Result<Vec<u8>>;
    fn serialize_to_xml(&self) -> Result<Vec<u8>>;
}
