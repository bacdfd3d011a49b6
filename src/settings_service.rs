// These are sub modules from dir settings_service
// settings_service.rs is used instead of mod.rs in dir settings_service

mod callback_service;
mod key_file_read;

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, error, info};

use crate::config::PanelConfig;
use crate::constants::{label, mime_type};
use crate::db::DatabaseModel;
use crate::field_commit::{self, FieldCommit, NumericField, SettingField, TextField};
use crate::form_data::FileSettingsView;
use crate::key_file_selector::{self, KeyFileChoice, KeyFileOptions};
use crate::password_edit::{PasswordEdit, PasswordFieldUpdate};
use crate::util;

use self::key_file_read::KeyFileReadTracker;

//    ========  Re-exports to use in all api users ============

pub use self::callback_service::{Alert, AlertKind, PanelCallbackService};
pub use self::key_file_read::{
    KeyFileReadOutcome, KeyFileReadResult, LoadedKeyFile, PendingKeyFileRead,
};

pub use crate::error::{Error, Result};

/// The file settings panel of one opened database
///
/// All handlers run on the UI event loop one at a time. Only the key file read
/// is asynchronous and it is split into a begin call, the read future and a
/// complete call so that other fields can be edited while it is pending.
pub struct FileSettingsPanel<M: DatabaseModel> {
    model: M,
    config: PanelConfig,
    callback_service: Arc<dyn PanelCallbackService>,
    password_edit: PasswordEdit,
    key_file_reads: KeyFileReadTracker,
}

impl<M: DatabaseModel> FileSettingsPanel<M> {
    pub fn new(model: M, config: PanelConfig, callback_service: Arc<dyn PanelCallbackService>) -> Self {
        let password_edit = PasswordEdit::new(model.settings());
        Self {
            model,
            config,
            callback_service,
            password_edit,
            key_file_reads: KeyFileReadTracker::default(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn password_edit(&self) -> &PasswordEdit {
        &self.password_edit
    }

    pub fn render(&self) -> FileSettingsView {
        let s = self.model.settings();
        FileSettingsView {
            cmd: self.config.action_shortcut_symbol.clone(),
            support_files: self.config.support_files,
            desktop_link: self.config.desktop_link.clone(),
            name: s.name.clone(),
            path: s.path.clone(),
            password: util::password_placeholder(s.password_length),
            password_presentation: self.password_edit.presentation(),
            password_warning_visible: self.password_edit.warning_visible(),
            default_user: s.default_user.clone(),
            recycle_bin_enabled: s.recycle_bin_enabled,
            history_max_items: s.history_max_items,
            history_max_size: util::bytes_to_mib(s.history_max_size),
            key_encryption_rounds: s.key_encryption_rounds,
            key_file_select: self.render_key_file_select(),
        }
    }

    // The key file dropdown is always rebuilt from the current state
    pub fn render_key_file_select(&self) -> KeyFileOptions {
        key_file_selector::derive_options(&self.model.settings().key_file)
    }

    fn alert_error(&self, header: &str, err: &Error) {
        self.callback_service
            .show_alert(Alert::error(header, &err.to_string()));
    }

    // A database can not be saved without a password
    pub fn validate(&self) -> Result<()> {
        if self.model.settings().password_length == 0 {
            self.callback_service.show_alert(Alert::error(
                label::EMPTY_PASSWORD_HEADER,
                label::EMPTY_PASSWORD_BODY,
            ));
            self.callback_service
                .focus_field(SettingField::MasterPassword);
            return Err(Error::EmptyPassword);
        }
        Ok(())
    }

    fn offer_download(&self, data: Vec<u8>, extension: &str, mime_type: &str) -> Result<()> {
        let file_name = util::download_file_name(&self.model.settings().name, extension);
        debug!("Offering {} bytes as {}", data.len(), &file_name);
        self.callback_service.save_as(data, &file_name, mime_type)
    }

    pub fn save_to_file(&self) -> Result<()> {
        self.validate()?;
        let data = self.model.serialize_to_binary()?;
        self.offer_download(
            data,
            &self.config.database_file_extension,
            mime_type::OCTET_STREAM,
        )
    }

    pub fn export_as_xml(&self) -> Result<()> {
        self.validate()?;
        let data = self.model.serialize_to_xml()?;
        self.offer_download(data, &self.config.xml_file_extension, mime_type::TEXT_XML)
    }

    pub fn save_to_cloud(&self) -> Result<()> {
        self.validate()?;
        self.callback_service.show_alert(Alert::not_implemented(
            label::NOT_IMPLEMENTED_HEADER,
            label::NOT_IMPLEMENTED_BODY,
        ));
        Err(Error::NotImplemented("Saving to cloud storage".into()))
    }

    // Called with the value of the selected dropdown option
    pub fn key_file_change_value(&mut self, option_value: &str) -> Result<KeyFileOptions> {
        match KeyFileChoice::from_value(option_value) {
            Some(choice) => self.key_file_change(choice),
            None => {
                error!("Unknown key file option value {}", option_value);
                Ok(self.render_key_file_select())
            }
        }
    }

    pub fn key_file_change(&mut self, choice: KeyFileChoice) -> Result<KeyFileOptions> {
        debug!("Key file choice {:?} is selected", choice);
        match choice {
            KeyFileChoice::UseOld => self.select_old_key_file(),
            KeyFileChoice::Generate => self.generate_key_file(),
            KeyFileChoice::NoKeyFile => self.clear_key_file(),
            // The new key file is already in use
            KeyFileChoice::UseNew => Ok(self.render_key_file_select()),
        }
    }

    pub fn select_old_key_file(&mut self) -> Result<KeyFileOptions> {
        self.model.reset_key_file();
        Ok(self.render_key_file_select())
    }

    pub fn generate_key_file(&mut self) -> Result<KeyFileOptions> {
        let backup = self.model.backup_key_file();
        let key_file = self.model.generate_and_set_key_file().map_err(|e| {
            error!("Key file generation failed: {}", e);
            self.alert_error(label::KEY_FILE_ERROR_HEADER, &e);
            e
        })?;

        let extension = self.config.key_file_extension.clone();
        if let Err(e) = self.offer_download(key_file, &extension, mime_type::OCTET_STREAM) {
            // Nobody has a copy of the generated key file, so it must not be used
            error!("Offering the generated key file failed: {}", e);
            self.model.restore_key_file(backup);
            self.alert_error(label::KEY_FILE_ERROR_HEADER, &e);
            return Err(e);
        }
        Ok(self.render_key_file_select())
    }

    pub fn clear_key_file(&mut self) -> Result<KeyFileOptions> {
        self.model.remove_key_file();
        Ok(self.render_key_file_select())
    }

    /// Starts a new key file selection. Any read started before this one
    /// becomes stale
    pub fn begin_key_file_selection(&mut self, path: Option<PathBuf>) -> PendingKeyFileRead {
        let token = self.key_file_reads.next_token();
        debug!("Key file selection {} is started", token);
        PendingKeyFileRead::new(token, path)
    }

    pub fn complete_key_file_selection(
        &mut self,
        read_result: KeyFileReadResult,
    ) -> Result<KeyFileReadOutcome> {
        if !self.key_file_reads.is_current(read_result.token) {
            info!(
                "Key file read {} completed after a newer selection and is discarded",
                read_result.token
            );
            return Ok(KeyFileReadOutcome::Discarded);
        }

        let applied = read_result.result.and_then(|loaded| {
            self.model
                .set_key_file(loaded.data, &loaded.file_name)
        });
        if let Err(e) = applied {
            error!("Key file selection failed: {}", e);
            self.alert_error(label::KEY_FILE_ERROR_HEADER, &e);
            return Err(e);
        }
        Ok(KeyFileReadOutcome::Applied(self.render_key_file_select()))
    }

    /// Selects and reads a key file in one call
    pub async fn select_key_file(&mut self, path: Option<PathBuf>) -> Result<KeyFileReadOutcome> {
        let pending = self.begin_key_file_selection(path);
        let read_result = pending.read().await;
        self.complete_key_file_selection(read_result)
    }

    pub fn focus_master_pass(&mut self) -> PasswordFieldUpdate {
        self.password_edit.focus()
    }

    pub fn blur_master_pass(&mut self, typed: &str) -> PasswordFieldUpdate {
        self.password_edit.blur(&mut self.model, typed)
    }

    pub fn blur_name(&mut self, raw: &str) -> FieldCommit {
        field_commit::commit_text(&mut self.model, TextField::Name, raw)
    }

    pub fn blur_def_user(&mut self, raw: &str) -> FieldCommit {
        field_commit::commit_text(&mut self.model, TextField::DefaultUser, raw)
    }

    pub fn change_trash(&mut self, checked: bool) -> FieldCommit {
        field_commit::commit_recycle_bin(&mut self.model, checked)
    }

    pub fn blur_history_length(&mut self, raw: &str) -> FieldCommit {
        field_commit::commit_numeric(&mut self.model, NumericField::HistoryMaxItems, raw)
    }

    pub fn blur_history_size(&mut self, raw: &str) -> FieldCommit {
        field_commit::commit_numeric(&mut self.model, NumericField::HistoryMaxSize, raw)
    }

    pub fn blur_key_rounds(&mut self, raw: &str) -> FieldCommit {
        field_commit::commit_numeric(&mut self.model, NumericField::KeyEncryptionRounds, raw)
    }
}
