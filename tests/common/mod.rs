use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use kdbx_file_settings::settings_service::{Alert, PanelCallbackService};
use kdbx_file_settings::{
    DatabaseSettings, FileKey, FileSettingsPanel, MemoryDatabase, PanelConfig, Result, SecStr,
    SettingField,
};

pub fn init_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::max())
        .is_test(true)
        .try_init();
}

/// Keeps every call made by the panel so that tests can inspect them
#[derive(Default)]
pub struct RecordingCallbackService {
    pub saved: Mutex<Vec<(String, String, Vec<u8>)>>,
    pub alerts: Mutex<Vec<Alert>>,
    pub focused: Mutex<Vec<SettingField>>,
}

impl PanelCallbackService for RecordingCallbackService {
    fn save_as(&self, data: Vec<u8>, file_name: &str, mime_type: &str) -> Result<()> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.into(), mime_type.into(), data));
        Ok(())
    }

    fn show_alert(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }

    fn focus_field(&self, field: SettingField) {
        self.focused.lock().unwrap().push(field);
    }
}

pub fn opened_db(password: &str, key_file: Option<(&str, &[u8])>) -> MemoryDatabase {
    let settings = DatabaseSettings {
        name: "Passwords".into(),
        path: Some("/home/user/Passwords.kdbx".into()),
        default_user: "admin".into(),
        history_max_items: 10,
        history_max_size: 6 * 1_048_576,
        key_encryption_rounds: 6000,
        ..Default::default()
    };
    let file_key = key_file.map(|(n, d)| FileKey::from_bytes(n, d.to_vec()).unwrap());
    MemoryDatabase::open(settings, SecStr::from(password), file_key)
}

pub fn new_panel(
    db: MemoryDatabase,
) -> (FileSettingsPanel<MemoryDatabase>, Arc<RecordingCallbackService>) {
    init_logging();
    let callbacks = Arc::new(RecordingCallbackService::default());
    let panel = FileSettingsPanel::new(db, PanelConfig::default(), callbacks.clone());
    (panel, callbacks)
}

/// Writes the content to a file in a fresh temp dir and returns its path
pub fn write_temp_key_file(test_name: &str, file_name: &str, content: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("kdbx-file-settings-tests")
        .join(test_name);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}
