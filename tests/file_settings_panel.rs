mod common;

use kdbx_file_settings::settings_service::{AlertKind, KeyFileReadOutcome};
use kdbx_file_settings::{
    DatabaseModel, Error, FieldCommit, FileKey, KeyFileChoice, KeyFileState, SettingField,
};

use KeyFileChoice::*;

#[test]
fn verify_opened_with_key_file_scenario() {
    let (panel, _) = common::new_panel(common::opened_db("secret", Some(("old.key", &b"old"[..]))));
    let opts = panel.render_key_file_select();
    assert_eq!(opts.choices(), vec![UseOld, Generate, NoKeyFile]);
    assert_eq!(opts.selected, Some(UseOld));
}

#[tokio::test]
async fn verify_select_new_key_file_from_disk() {
    let path = common::write_temp_key_file("select_new", "new.key", b"new key file content");
    let (mut panel, callbacks) =
        common::new_panel(common::opened_db("secret", Some(("old.key", &b"old"[..]))));

    let outcome = panel.select_key_file(Some(path)).await.unwrap();
    let opts = match outcome {
        KeyFileReadOutcome::Applied(opts) => opts,
        KeyFileReadOutcome::Discarded => panic!("The only read must be applied"),
    };

    let ks = &panel.model().settings().key_file;
    assert_eq!(ks.key_file_name.as_deref(), Some("new.key"));
    assert!(ks.key_file_changed);
    assert!(!ks.is_generated);
    assert_eq!(opts.choices(), vec![UseNew, UseOld, Generate, NoKeyFile]);
    assert_eq!(opts.label_of(UseNew), Some("Use key file new.key"));
    assert_eq!(opts.label_of(UseOld), Some("Use old key file old.key"));
    assert_eq!(opts.selected, Some(UseNew));

    let expected = FileKey::from_bytes("new.key", b"new key file content".to_vec()).unwrap();
    assert_eq!(
        panel.model().file_key().map(|k| k.content_hash()),
        Some(expected.content_hash())
    );
    assert!(callbacks.alerts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_older_read_completing_last_is_discarded() {
    let first_path = common::write_temp_key_file("stale", "first.key", b"first");
    let second_path = common::write_temp_key_file("stale", "second.key", b"second");
    let (mut panel, _) = common::new_panel(common::opened_db("secret", None));

    let first = panel.begin_key_file_selection(Some(first_path));
    let second = panel.begin_key_file_selection(Some(second_path));

    // Other fields stay editable while reads are pending
    assert_eq!(panel.blur_name("Renamed"), FieldCommit::Committed);

    let second_result = second.read().await;
    let first_result = first.read().await;

    let applied = panel.complete_key_file_selection(second_result).unwrap();
    assert!(matches!(applied, KeyFileReadOutcome::Applied(_)));
    let discarded = panel.complete_key_file_selection(first_result).unwrap();
    assert_eq!(discarded, KeyFileReadOutcome::Discarded);

    assert_eq!(
        panel.model().settings().key_file.key_file_name.as_deref(),
        Some("second.key")
    );
    assert_eq!(panel.model().settings().name, "Renamed");
}

#[tokio::test]
async fn verify_missing_key_file_is_reported() {
    let (mut panel, callbacks) =
        common::new_panel(common::opened_db("secret", Some(("old.key", &b"old"[..]))));
    let missing = std::env::temp_dir().join("kdbx-file-settings-tests/does-not-exist.key");

    let r = panel.select_key_file(Some(missing)).await;
    assert!(matches!(r, Err(Error::KeyFileReadFailed(_, _))));
    assert_eq!(
        panel.model().settings().key_file,
        KeyFileState::opened_with(Some("old.key"))
    );

    let alerts = callbacks.alerts.lock().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Error);
}

#[tokio::test]
async fn verify_empty_selection_changes_nothing() {
    let (mut panel, _) = common::new_panel(common::opened_db("secret", None));
    let before = panel.render_key_file_select();
    assert!(matches!(
        panel.select_key_file(None).await,
        Err(Error::NoFileSelected)
    ));
    assert_eq!(panel.render_key_file_select(), before);
}

#[test]
fn verify_generated_key_file_download() {
    let (mut panel, callbacks) = common::new_panel(common::opened_db("secret", None));
    let opts = panel.key_file_change(Generate).unwrap();
    assert_eq!(opts.label_of(UseNew), Some("Use generated key file"));

    let saved = callbacks.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let (file_name, mime, data) = &saved[0];
    assert_eq!(file_name, "Passwords.key");
    assert_eq!(mime, "application/octet-stream");

    // The offered download is the key file now in use
    let fk = FileKey::from_bytes("copy.key", data.clone()).unwrap();
    assert_eq!(
        panel.model().file_key().map(|k| k.content_hash()),
        Some(fk.content_hash())
    );
}

#[test]
fn verify_generate_then_use_old_round_trip() {
    let (mut panel, _) = common::new_panel(common::opened_db("secret", Some(("old.key", &b"old"[..]))));
    let before = panel.model().settings().key_file.clone();

    panel.key_file_change(Generate).unwrap();
    panel.key_file_change(UseOld).unwrap();

    let after = &panel.model().settings().key_file;
    assert_eq!(after, &before);
    assert!(!after.key_file_changed);
    assert_eq!(after.key_file_name, after.old_key_file_name);
}

#[test]
fn verify_save_requires_password() {
    let (panel, callbacks) = common::new_panel(common::opened_db("", None));

    assert!(matches!(panel.export_as_xml(), Err(Error::EmptyPassword)));
    assert!(callbacks.saved.lock().unwrap().is_empty());
    assert_eq!(
        callbacks.focused.lock().unwrap().as_slice(),
        &[SettingField::MasterPassword]
    );
    assert_eq!(callbacks.alerts.lock().unwrap()[0].header, "Empty password");
}

#[test]
fn verify_password_entered_then_saved() {
    let (mut panel, callbacks) = common::new_panel(common::opened_db("", None));
    panel.focus_master_pass();
    panel.blur_master_pass("now-set");
    assert!(panel.save_to_file().is_ok());

    let saved = callbacks.saved.lock().unwrap();
    assert_eq!(saved[0].0, "Passwords.kdbx");
    assert_eq!(panel.model().settings().password_length, 7);
}

#[test]
fn verify_untouched_password_focus_blur() {
    let (mut panel, _) = common::new_panel(common::opened_db("secret", None));
    let u = panel.focus_master_pass();
    assert_eq!(u.value.as_deref(), Some(""));
    let u = panel.blur_master_pass("");
    assert_eq!(u.value.map(|v| v.chars().count()), Some(6));
    assert!(!u.warning_visible);
    assert_eq!(panel.model().settings().password_length, 6);
    assert!(!panel.render().password_warning_visible);
}

#[test]
fn verify_history_size_in_megabytes() {
    let (mut panel, _) = common::new_panel(common::opened_db("secret", None));
    assert_eq!(panel.blur_history_size("10"), FieldCommit::Committed);
    assert_eq!(panel.model().settings().history_max_size, 10 * 1_048_576);
    assert_eq!(panel.render().history_max_size, 10);

    assert_eq!(panel.blur_history_size("x"), FieldCommit::Reverted("10".into()));
    assert_eq!(panel.model().settings().history_max_size, 10 * 1_048_576);
}
