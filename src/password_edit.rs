//! Editing of the master password field.
//!
//! The field starts `Masked` and shows a placeholder of the password length.
//! Focusing it starts `Editing` in plain text; leaving it either commits the
//! typed password or, when nothing was typed, restores the previous one.

use log::debug;
use secstr::SecStr;
use serde::{Deserialize, Serialize};

use crate::db::DatabaseModel;
use crate::form_data::DatabaseSettings;
use crate::util;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum PasswordEditState {
    Masked,
    Editing,
}

/// How the input control renders its text
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum InputPresentation {
    Obscured,
    PlainText,
}

/// Changes the password input control should apply after a focus or blur
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PasswordFieldUpdate {
    // None keeps the text the control currently holds
    pub value: Option<String>,
    pub presentation: InputPresentation,
    pub warning_visible: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PasswordEdit {
    state: PasswordEditState,
    presentation: InputPresentation,
    // Set once a typed password was committed and kept across refocus
    edit_in_progress: bool,
    warning_visible: bool,
}

impl PasswordEdit {
    pub fn new(settings: &DatabaseSettings) -> Self {
        Self {
            state: PasswordEditState::Masked,
            presentation: InputPresentation::Obscured,
            edit_in_progress: false,
            warning_visible: !settings.created && settings.password_changed,
        }
    }

    pub fn state(&self) -> PasswordEditState {
        self.state
    }

    pub fn presentation(&self) -> InputPresentation {
        self.presentation
    }

    pub fn edit_in_progress(&self) -> bool {
        self.edit_in_progress
    }

    pub fn warning_visible(&self) -> bool {
        self.warning_visible
    }

    pub fn focus(&mut self) -> PasswordFieldUpdate {
        // Refocusing must not wipe what was typed before
        let value = if self.edit_in_progress {
            None
        } else {
            Some(String::new())
        };
        self.state = PasswordEditState::Editing;
        self.presentation = InputPresentation::PlainText;
        PasswordFieldUpdate {
            value,
            presentation: self.presentation,
            warning_visible: self.warning_visible,
        }
    }

    pub fn blur<M: DatabaseModel + ?Sized>(&mut self, model: &mut M, typed: &str) -> PasswordFieldUpdate {
        let value = if typed.is_empty() {
            self.edit_in_progress = false;
            model.reset_password();
            self.warning_visible = false;
            debug!("Password field left empty and the password is reset");
            Some(util::password_placeholder(model.settings().password_length))
        } else {
            self.edit_in_progress = true;
            model.set_password(SecStr::new(typed.as_bytes().to_vec()));
            if !model.settings().created {
                self.warning_visible = true;
            }
            None
        };
        self.state = PasswordEditState::Masked;
        self.presentation = InputPresentation::Obscured;
        PasswordFieldUpdate {
            value,
            presentation: self.presentation,
            warning_visible: self.warning_visible,
        }
    }
}
