//! Decides which key file choices are offered for the current key file state
//! and which one is preselected.
//!
//! Everything here is a pure function of [`KeyFileState`]. The options are
//! derived again on every render and never cached.

use serde::{Deserialize, Serialize};

use crate::constants::{key_file_option_value as value, label};
use crate::form_data::KeyFileState;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum KeyFileChoice {
    // Keep the newly selected or generated key file
    UseNew,
    // Go back to the key file used when the database was opened
    UseOld,
    Generate,
    NoKeyFile,
}

impl KeyFileChoice {
    /// The option value used by the dropdown control
    pub fn as_value(&self) -> &'static str {
        match self {
            KeyFileChoice::UseNew => value::USE_NEW,
            KeyFileChoice::UseOld => value::USE_OLD,
            KeyFileChoice::Generate => value::GENERATE,
            KeyFileChoice::NoKeyFile => value::NO_KEY_FILE,
        }
    }

    pub fn from_value(option_value: &str) -> Option<Self> {
        match option_value {
            value::USE_NEW => Some(KeyFileChoice::UseNew),
            value::USE_OLD => Some(KeyFileChoice::UseOld),
            value::GENERATE => Some(KeyFileChoice::Generate),
            value::NO_KEY_FILE => Some(KeyFileChoice::NoKeyFile),
            _ => None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct KeyFileOption {
    pub choice: KeyFileChoice,
    pub label: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct KeyFileOptions {
    // In display order
    pub options: Vec<KeyFileOption>,
    // None when the state is ambiguous and the control keeps its own default
    pub selected: Option<KeyFileChoice>,
}

impl KeyFileOptions {
    pub fn choices(&self) -> Vec<KeyFileChoice> {
        self.options.iter().map(|o| o.choice).collect()
    }

    pub fn label_of(&self, choice: KeyFileChoice) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.choice == choice)
            .map(|o| o.label.as_str())
    }
}

pub fn derive_options(state: &KeyFileState) -> KeyFileOptions {
    let mut options = Vec::with_capacity(4);

    if let (true, Some(name)) = (state.key_file_changed, state.current_name()) {
        let label = if state.is_generated {
            label::USE_GENERATED_KEY_FILE.to_string()
        } else {
            format!("Use key file {}", name)
        };
        options.push(KeyFileOption {
            choice: KeyFileChoice::UseNew,
            label,
        });
    }

    if let Some(old_name) = state.old_name() {
        let qualifier = if state.key_file_changed { "old " } else { "" };
        options.push(KeyFileOption {
            choice: KeyFileChoice::UseOld,
            label: format!("Use {}key file {}", qualifier, old_name),
        });
    }

    options.push(KeyFileOption {
        choice: KeyFileChoice::Generate,
        label: label::GENERATE_NEW_KEY_FILE.to_string(),
    });
    options.push(KeyFileOption {
        choice: KeyFileChoice::NoKeyFile,
        label: label::DONT_USE_KEY_FILE.to_string(),
    });

    KeyFileOptions {
        options,
        selected: default_selection(state),
    }
}

// First matching rule wins
fn default_selection(state: &KeyFileState) -> Option<KeyFileChoice> {
    if state.has_new_key_file() {
        Some(KeyFileChoice::UseNew)
    } else if state.current_name().is_none() {
        Some(KeyFileChoice::NoKeyFile)
    } else if state.old_name().is_some()
        && state.old_name() == state.current_name()
        && !state.key_file_changed
    {
        Some(KeyFileChoice::UseOld)
    } else {
        None
    }
}
