use std::io::Cursor;

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer as QuickXmlWriter;
use secstr::SecStr;

use super::{DatabaseModel, FileKey, KeyFileBackup};
use crate::constants::{meta_xml_element::*, new_db_defaults, GENERATED_KEY_FILE_NAME, GENERATOR_NAME};
use crate::crypto;
use crate::error::Result;
use crate::form_data::{DatabaseSettings, KeyFileState};

/// An in memory database model
///
/// Keeps the credentials the database was opened with so that password and
/// key file changes can be reverted. The binary serialization is a snapshot of
/// the non secret settings and not a kdbx file.
pub struct MemoryDatabase {
    settings: DatabaseSettings,
    password: SecStr,
    old_password: SecStr,
    old_password_length: usize,
    file_key: Option<FileKey>,
    old_file_key: Option<FileKey>,
}

fn password_length(password: &SecStr) -> usize {
    std::str::from_utf8(password.unsecure())
        .map(|s| s.chars().count())
        .unwrap_or_else(|_| password.unsecure().len())
}

impl MemoryDatabase {
    /// A database that was opened with the given credentials
    pub fn open(mut settings: DatabaseSettings, password: SecStr, file_key: Option<FileKey>) -> Self {
        let length = password_length(&password);
        settings.password_length = length;
        settings.password_changed = false;
        settings.created = false;
        settings.modified = false;
        settings.key_file = KeyFileState::opened_with(file_key.as_ref().map(|k| k.file_name()));

        debug!(
            "MemoryDatabase opened: name {}, key file used {}",
            &settings.name,
            file_key.is_some()
        );

        Self {
            settings,
            old_password: password.clone(),
            password,
            old_password_length: length,
            old_file_key: file_key.clone(),
            file_key,
        }
    }

    /// A newly created database that is not yet saved
    pub fn create(name: Option<&str>, password: SecStr) -> Self {
        let settings = DatabaseSettings {
            name: name.unwrap_or(new_db_defaults::DATABASE_NAME).into(),
            recycle_bin_enabled: true,
            history_max_items: new_db_defaults::HISTORY_MAX_ITEMS,
            history_max_size: new_db_defaults::HISTORY_MAX_SIZE,
            key_encryption_rounds: new_db_defaults::KEY_ENCRYPTION_ROUNDS,
            ..Default::default()
        };
        let mut db = Self::open(settings, password, None);
        db.settings.created = true;
        db
    }

    pub fn file_key(&self) -> Option<&FileKey> {
        self.file_key.as_ref()
    }

    // Final hash is sha256(sha256(password) + key file hash) or sha256(sha256(password))
    pub fn composite_key(&self) -> Vec<u8> {
        let phash = crypto::do_slice_sha256_hash(self.password.unsecure());
        let mut data = phash;
        if let Some(fk) = &self.file_key {
            data.extend_from_slice(&fk.content_hash());
        }
        crypto::do_slice_sha256_hash(&data)
    }

    fn write_meta_element(
        writer: &mut QuickXmlWriter<Cursor<Vec<u8>>>,
        tag: &str,
        text: &str,
    ) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new(tag)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }
}

impl DatabaseModel for MemoryDatabase {
    fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    fn set_name(&mut self, name: &str) {
        self.settings.set_database_name(name).modified = true;
    }

    fn set_default_user(&mut self, default_user: &str) {
        self.settings.default_user = default_user.into();
        self.settings.modified = true;
    }

    fn set_recycle_bin_enabled(&mut self, enabled: bool) {
        self.settings.recycle_bin_enabled = enabled;
        self.settings.modified = true;
    }

    fn set_history_max_items(&mut self, max_items: i32) {
        self.settings.history_max_items = max_items;
        self.settings.modified = true;
    }

    fn set_history_max_size(&mut self, max_size: i64) {
        self.settings.history_max_size = max_size;
        self.settings.modified = true;
    }

    fn set_key_encryption_rounds(&mut self, rounds: i64) {
        self.settings.key_encryption_rounds = rounds;
        self.settings.modified = true;
    }

    fn reset_password(&mut self) {
        self.password = self.old_password.clone();
        self.settings.password_length = self.old_password_length;
        self.settings.password_changed = false;
        debug!("Password is reset to the one used at opening");
    }

    fn set_password(&mut self, password: SecStr) {
        self.settings.password_length = password_length(&password);
        self.password = password;
        self.settings.password_changed = true;
        self.settings.modified = true;
        debug!(
            "Password is changed and its length is {}",
            self.settings.password_length
        );
    }

    fn reset_key_file(&mut self) {
        self.file_key = self.old_file_key.clone();
        let ks = &mut self.settings.key_file;
        ks.key_file_name = ks.old_key_file_name.clone();
        ks.key_file_changed = false;
        ks.is_generated = false;
        debug!("Key file is reset to {:?}", &ks.key_file_name);
    }

    fn remove_key_file(&mut self) {
        self.file_key = None;
        let ks = &mut self.settings.key_file;
        ks.key_file_name = None;
        // Removing a key file from a database opened without one changes nothing
        ks.key_file_changed = ks.old_name().is_some();
        ks.is_generated = false;
        self.settings.modified = true;
        debug!("Key file is removed and changed is {}", ks.key_file_changed);
    }

    fn set_key_file(&mut self, data: Vec<u8>, file_name: &str) -> Result<()> {
        let file_key = FileKey::from_bytes(file_name, data)?;
        self.file_key = Some(file_key);
        let ks = &mut self.settings.key_file;
        ks.key_file_name = Some(file_name.into());
        ks.key_file_changed = true;
        ks.is_generated = false;
        self.settings.modified = true;
        debug!("Key file is set to {}", file_name);
        Ok(())
    }

    fn generate_and_set_key_file(&mut self) -> Result<Vec<u8>> {
        let content = FileKey::generate_xml()?;
        let file_key = FileKey::from_bytes(GENERATED_KEY_FILE_NAME, content.clone())?;
        self.file_key = Some(file_key);
        let ks = &mut self.settings.key_file;
        ks.key_file_name = Some(GENERATED_KEY_FILE_NAME.into());
        ks.key_file_changed = true;
        ks.is_generated = true;
        self.settings.modified = true;
        debug!("A new key file is generated with {} bytes", content.len());
        Ok(content)
    }

    fn backup_key_file(&self) -> KeyFileBackup {
        KeyFileBackup {
            state: self.settings.key_file.clone(),
            file_key: self.file_key.clone(),
            modified: self.settings.modified,
        }
    }

    fn restore_key_file(&mut self, backup: KeyFileBackup) {
        self.file_key = backup.file_key;
        self.settings.key_file = backup.state;
        self.settings.modified = backup.modified;
        debug!("Key file is restored to {:?}", &self.settings.key_file.key_file_name);
    }

    fn serialize_to_binary(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(&self.settings)?)
    }

    fn serialize_to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = QuickXmlWriter::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), Some("yes"))))?;
        writer.write_event(Event::Start(BytesStart::new(META)))?;

        let s = &self.settings;
        let recycle_bin = if s.recycle_bin_enabled { "True" } else { "False" };
        Self::write_meta_element(&mut writer, GENERATOR, GENERATOR_NAME)?;
        Self::write_meta_element(&mut writer, DATABASE_NAME, &s.name)?;
        Self::write_meta_element(&mut writer, DEFAULT_USER_NAME, &s.default_user)?;
        Self::write_meta_element(&mut writer, RECYCLE_BIN_ENABLED, recycle_bin)?;
        Self::write_meta_element(&mut writer, HISTORY_MAX_ITEMS, &s.history_max_items.to_string())?;
        Self::write_meta_element(&mut writer, HISTORY_MAX_SIZE, &s.history_max_size.to_string())?;

        writer.write_event(Event::End(BytesEnd::new(META)))?;
        Ok(writer.into_inner().into_inner())
    }
}
