use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field_commit::SettingField;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    NotImplemented,
}

/// A modal message shown to the user. None of these are fatal to the panel
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub header: String,
    pub body: String,
}

impl Alert {
    pub fn error(header: &str, body: &str) -> Self {
        Self {
            kind: AlertKind::Error,
            header: header.into(),
            body: body.into(),
        }
    }

    pub fn not_implemented(header: &str, body: &str) -> Self {
        Self {
            kind: AlertKind::NotImplemented,
            header: header.into(),
            body: body.into(),
        }
    }
}

// Implemented by the UI facing layer (tauri, web or ffi) that hosts the panel
#[cfg_attr(test, mockall::automock)]
pub trait PanelCallbackService: Send + Sync {
    // Offers the data as a download with the given file name
    fn save_as(&self, data: Vec<u8>, file_name: &str, mime_type: &str) -> Result<()>;

    fn show_alert(&self, alert: Alert);

    fn focus_field(&self, field: SettingField);
}
