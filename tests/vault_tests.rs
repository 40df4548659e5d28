//! Integration tests for the PassVault vault module.

use std::fs;

use passvault::crypto::KdfParams;
use passvault::errors::PassVaultError;
use passvault::vault::{SecretValue, VaultStore, DECRYPTION_FAILED_SENTINEL};
use tempfile::TempDir;

/// Helper: create a temporary vault file path inside a fresh temp dir.
fn vault_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("passwords.json");
    (dir, path)
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read file")).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// Put and get round-trip
// ---------------------------------------------------------------------------

#[test]
fn put_and_get_roundtrip_encrypted() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("correct-horse")).unwrap();

    store
        .put("github", "alice", "s3cr3t!", "work account")
        .unwrap();

    // A fresh store with the same passphrase reads it back.
    let store2 = VaultStore::new(&path, Some("correct-horse")).unwrap();
    let entry = store2.get("github").unwrap().expect("entry exists");
    assert_eq!(entry.service, "github");
    assert_eq!(entry.username, "alice");
    assert_eq!(entry.secret.expose(), Some("s3cr3t!"));
    assert_eq!(entry.notes, "work account");
    assert_eq!(entry.created_at, entry.updated_at);
}

#[test]
fn put_and_get_roundtrip_plaintext() {
    let (_dir, path) = vault_path();
    let store = VaultStore::plaintext(&path);

    store.put("email", "", "hunter2", "").unwrap();

    let entry = store.get("email").unwrap().unwrap();
    assert_eq!(entry.username, "");
    assert_eq!(entry.secret, SecretValue::Plain("hunter2".into()));

    let json = read_json(&path);
    assert_eq!(json["email"]["password"], "hunter2");
}

#[test]
fn get_missing_service_is_none() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("pw")).unwrap();
    store.put("github", "alice", "x", "").unwrap();

    assert!(store.get("gitlab").unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Overwrite keeps created_at
// ---------------------------------------------------------------------------

#[test]
fn overwrite_preserves_created_at_and_refreshes_updated_at() {
    let (_dir, path) = vault_path();
    let store = VaultStore::plaintext(&path);

    store.put("github", "alice", "v1", "").unwrap();
    let before = store.get("github").unwrap().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    store.put("github", "alice2", "v2", "new notes").unwrap();
    let after = store.get("github").unwrap().unwrap();

    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.username, "alice2");
    assert_eq!(after.secret.expose(), Some("v2"));
    assert_eq!(store.list_services().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// List and delete
// ---------------------------------------------------------------------------

#[test]
fn list_services_is_sorted() {
    let (_dir, path) = vault_path();
    let store = VaultStore::plaintext(&path);
    for s in ["zebra", "alpha", "middle"] {
        store.put(s, "", "x", "").unwrap();
    }

    assert_eq!(
        store.list_services().unwrap(),
        vec!["alpha", "middle", "zebra"]
    );
    assert_eq!(store.entry_count().unwrap(), 3);
}

#[test]
fn list_on_missing_file_is_empty() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("pw")).unwrap();
    assert!(store.list_services().unwrap().is_empty());
    assert!(!path.exists(), "reading must not create the file");
}

#[test]
fn delete_existing_then_get_is_none() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("pw")).unwrap();
    store.put("to-delete", "", "bye", "").unwrap();
    store.put("to-keep", "", "stay", "").unwrap();

    assert!(store.delete("to-delete").unwrap());
    assert!(store.get("to-delete").unwrap().is_none());
    assert_eq!(
        store.get("to-keep").unwrap().unwrap().secret.expose(),
        Some("stay")
    );
}

#[test]
fn delete_missing_returns_false_and_leaves_file_unchanged() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("pw")).unwrap();
    store.put("github", "alice", "x", "").unwrap();

    let before = fs::read(&path).unwrap();
    assert!(!store.delete("nope").unwrap());
    assert_eq!(fs::read(&path).unwrap(), before);
}

// ---------------------------------------------------------------------------
// Wrong passphrase yields the sentinel, not an error
// ---------------------------------------------------------------------------

#[test]
fn wrong_passphrase_returns_sentinel() {
    let (_dir, path) = vault_path();

    let store = VaultStore::new(&path, Some("correct-horse")).unwrap();
    store.put("github", "alice", "s3cr3t!", "").unwrap();

    let wrong = VaultStore::new(&path, Some("wrong-horse")).unwrap();
    let entry = wrong.get("github").unwrap().expect("entry is still found");

    assert_eq!(entry.secret, SecretValue::Undecryptable);
    assert_eq!(entry.secret.as_display(), DECRYPTION_FAILED_SENTINEL);
    assert_ne!(entry.secret.as_display(), "s3cr3t!");
    // Non-secret fields are still readable.
    assert_eq!(entry.username, "alice");
}

#[test]
fn same_secret_saved_twice_gives_different_tokens() {
    let (_dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("pw")).unwrap();

    store.put("a", "", "same", "").unwrap();
    let first = read_json(&path)["a"]["password"].clone();
    store.put("a", "", "same", "").unwrap();
    let second = read_json(&path)["a"]["password"].clone();

    assert_ne!(first, second);
}

// ---------------------------------------------------------------------------
// Malformed backing file
// ---------------------------------------------------------------------------

#[test]
fn malformed_file_is_a_storage_error_and_is_not_overwritten() {
    let (_dir, path) = vault_path();
    fs::write(&path, "{ this is not json").unwrap();

    let store = VaultStore::new(&path, Some("pw")).unwrap();
    assert!(matches!(
        store.get("github"),
        Err(PassVaultError::Storage { .. })
    ));
    assert!(matches!(
        store.put("github", "alice", "x", ""),
        Err(PassVaultError::Storage { .. })
    ));

    assert_eq!(fs::read_to_string(&path).unwrap(), "{ this is not json");
}

#[test]
fn loads_file_written_with_naive_timestamps() {
    let (_dir, path) = vault_path();
    fs::write(
        &path,
        r#"{
  "github": {
    "username": "alice",
    "password": "hunter2",
    "notes": "",
    "created_at": "2024-01-31T10:20:30.123456",
    "updated_at": "2024-02-01T08:00:00.000001"
  }
}"#,
    )
    .unwrap();

    let store = VaultStore::plaintext(&path);
    let entry = store.get("github").unwrap().unwrap();
    assert_eq!(entry.secret.expose(), Some("hunter2"));
    assert_eq!(entry.created_at.to_rfc3339(), "2024-01-31T10:20:30.123456+00:00");
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn export_survives_a_corrupted_entry() {
    let (dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("correct-horse")).unwrap();
    store.put("good", "alice", "s3cr3t!", "").unwrap();
    store.put("bad", "bob", "other", "note").unwrap();

    // Corrupt the second entry's token in place.
    let mut json = read_json(&path);
    json["bad"]["password"] = serde_json::Value::String("AAAAgarbage".into());
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    let target = dir.path().join("export.json");
    let report = store.export_all(&target).expect("export must not fail");
    assert_eq!(report.exported, 2);
    assert_eq!(report.undecryptable, 1);

    let exported = read_json(&target);
    assert_eq!(exported["good"]["password"], "s3cr3t!");
    assert_eq!(exported["good"]["username"], "alice");
    assert_eq!(exported["bad"]["password"], DECRYPTION_FAILED_SENTINEL);
    assert_eq!(exported["bad"]["notes"], "note");

    // The vault itself stays encrypted.
    assert!(!fs::read_to_string(&path).unwrap().contains("s3cr3t!"));
}

#[test]
fn export_overwrites_existing_target() {
    let (dir, path) = vault_path();
    let store = VaultStore::plaintext(&path);
    store.put("github", "alice", "x", "").unwrap();

    let target = dir.path().join("export.json");
    fs::write(&target, "old contents").unwrap();

    store.export_all(&target).unwrap();
    assert_eq!(read_json(&target)["github"]["password"], "x");
}

#[test]
fn export_onto_the_vault_through_a_dotdot_path_is_refused() {
    let (dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("correct-horse")).unwrap();
    store.put("github", "alice", "s3cr3t!", "").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    let before = fs::read(&path).unwrap();

    let wrong = VaultStore::new(&path, Some("wrong-horse")).unwrap();
    let target = dir.path().join("sub").join("..").join("passwords.json");
    assert!(matches!(
        wrong.export_all(&target),
        Err(PassVaultError::InvalidRequest(_))
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn export_onto_the_vault_through_a_relative_path_is_refused() {
    let (dir, path) = vault_path();
    let store = VaultStore::new(&path, Some("correct-horse")).unwrap();
    store.put("github", "alice", "s3cr3t!", "").unwrap();
    let before = fs::read(&path).unwrap();

    // Only this test changes the working directory; every other test
    // in this file uses absolute temp paths.
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let wrong = VaultStore::new(&path, Some("wrong-horse")).unwrap();
    let result = wrong.export_all(std::path::Path::new("passwords.json"));
    std::env::set_current_dir(previous).unwrap();

    assert!(matches!(result, Err(PassVaultError::InvalidRequest(_))));
    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(
        store.get("github").unwrap().unwrap().secret.expose(),
        Some("s3cr3t!")
    );
}

// ---------------------------------------------------------------------------
// Re-keying
// ---------------------------------------------------------------------------

#[test]
fn rekey_moves_every_entry_to_the_new_passphrase() {
    let (_dir, path) = vault_path();
    let params = KdfParams::default();
    let old = VaultStore::new(&path, Some("old-pass")).unwrap();
    old.put("github", "alice", "gh-secret", "").unwrap();
    old.put("email", "alice@example.com", "mail-secret", "").unwrap();
    let created = old.get("github").unwrap().unwrap().created_at;

    let new = old.rekey(Some("new-pass"), &params).unwrap();
    assert!(new.is_encrypted());

    let reopened = VaultStore::new(&path, Some("new-pass")).unwrap();
    let gh = reopened.get("github").unwrap().unwrap();
    assert_eq!(gh.secret.expose(), Some("gh-secret"));
    assert_eq!(gh.created_at, created);
    assert_eq!(
        reopened.get("email").unwrap().unwrap().secret.expose(),
        Some("mail-secret")
    );

    // The old passphrase no longer works.
    assert!(old.get("github").unwrap().unwrap().secret.is_undecryptable());
}

#[test]
fn rekey_to_plaintext_and_back() {
    let (_dir, path) = vault_path();
    let params = KdfParams::default();
    let plain = VaultStore::plaintext(&path);
    plain.put("github", "alice", "hunter2", "").unwrap();

    let enc = plain.rekey(Some("master"), &params).unwrap();
    assert!(!fs::read_to_string(&path).unwrap().contains("hunter2"));
    assert_eq!(
        enc.get("github").unwrap().unwrap().secret.expose(),
        Some("hunter2")
    );

    enc.rekey(None, &params).unwrap();
    assert_eq!(read_json(&path)["github"]["password"], "hunter2");
}

#[test]
fn rekey_is_blocked_by_undecryptable_entry() {
    let (_dir, path) = vault_path();
    let a = VaultStore::new(&path, Some("pass-a")).unwrap();
    a.put("one", "", "x", "").unwrap();

    let b = VaultStore::new(&path, Some("pass-b")).unwrap();
    b.put("two", "", "y", "").unwrap();

    let before = fs::read(&path).unwrap();
    let err = b.rekey(Some("pass-c"), &KdfParams::default()).unwrap_err();
    match err {
        PassVaultError::RekeyBlocked(services) => assert_eq!(services, vec!["one"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read(&path).unwrap(), before, "nothing may be written");
}
