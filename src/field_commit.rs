use log::debug;
use serde::{Deserialize, Serialize};

use crate::db::DatabaseModel;
use crate::util;

/// Fields of the file settings panel the host may be asked to focus
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum SettingField {
    MasterPassword,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum TextField {
    Name,
    DefaultUser,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum NumericField {
    HistoryMaxItems,
    // Edited in megabytes and stored in bytes
    HistoryMaxSize,
    KeyEncryptionRounds,
}

/// Result of validating a field input when it loses focus
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum FieldCommit {
    Committed,
    // The input was rejected and the control should show this text again
    Reverted(String),
}

impl NumericField {
    /// The current model value as shown in the panel
    pub fn display_value<M: DatabaseModel + ?Sized>(&self, model: &M) -> String {
        let s = model.settings();
        match self {
            NumericField::HistoryMaxItems => s.history_max_items.to_string(),
            NumericField::HistoryMaxSize => util::bytes_to_mib(s.history_max_size).to_string(),
            NumericField::KeyEncryptionRounds => s.key_encryption_rounds.to_string(),
        }
    }

    fn commit<M: DatabaseModel + ?Sized>(&self, model: &mut M, value: f64) {
        match self {
            NumericField::HistoryMaxItems => model.set_history_max_items(util::round_to_i32(value)),
            NumericField::HistoryMaxSize => {
                model.set_history_max_size(util::mib_to_bytes(util::round_to_i64(value)))
            }
            NumericField::KeyEncryptionRounds => {
                model.set_key_encryption_rounds(util::round_to_i64(value))
            }
        }
    }
}

/// Trims the text and commits it. An empty name is rejected
pub fn commit_text<M: DatabaseModel + ?Sized>(model: &mut M, field: TextField, raw: &str) -> FieldCommit {
    let value = raw.trim();
    match field {
        TextField::Name => {
            if value.is_empty() {
                debug!("Empty database name is not accepted");
                return FieldCommit::Reverted(model.settings().name.clone());
            }
            model.set_name(value);
        }
        TextField::DefaultUser => model.set_default_user(value),
    }
    FieldCommit::Committed
}

/// Commits any numeric input without range checks
pub fn commit_numeric<M: DatabaseModel + ?Sized>(
    model: &mut M,
    field: NumericField,
    raw: &str,
) -> FieldCommit {
    match util::parse_number(raw) {
        Some(value) => {
            field.commit(model, value);
            FieldCommit::Committed
        }
        None => {
            debug!("Input for {:?} is not a number and reverted", field);
            FieldCommit::Reverted(field.display_value(model))
        }
    }
}

pub fn commit_recycle_bin<M: DatabaseModel + ?Sized>(model: &mut M, enabled: bool) -> FieldCommit {
    model.set_recycle_bin_enabled(enabled);
    FieldCommit::Committed
}
