use std::fs;

use flystate::state::{FlyState, LoadError, StateStore, StoreFile};

#[test]
fn test_unknown_ids_read_as_disabled() {
    let store = StateStore::new();
    for id in ["alice", "", "Steve", "名前"] {
        assert_eq!(store.get(id), FlyState::Disabled);
    }
}

#[test]
fn test_get_returns_last_set() {
    let mut store = StateStore::new();
    for state in [FlyState::Enabled, FlyState::Disabled, FlyState::Enabled] {
        store.set("alice", state);
        assert_eq!(store.get("alice"), state);
    }
}

#[test]
fn test_load_nonexistent_is_empty_store() {
    let temp = tempfile::tempdir().unwrap();
    let store = StateStore::load(&temp.path().join("playerFlyState.bin")).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.get("anyone"), FlyState::Disabled);
}

#[test]
fn test_save_then_load_scenario() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("playerFlyState.bin");

    let mut store = StateStore::new();
    store.set("alice", FlyState::Enabled);
    store.set("bob", FlyState::Disabled);
    store.save(&path).unwrap();

    let reloaded = StateStore::load(&path).unwrap();
    assert_eq!(reloaded.get("alice"), FlyState::Enabled);
    assert_eq!(reloaded.get("bob"), FlyState::Disabled);
    assert_eq!(reloaded.get("carol"), FlyState::Disabled);
    assert!(reloaded.contains("bob"));
    assert!(!reloaded.contains("carol"));
    assert_eq!(reloaded, store);
}

#[test]
fn test_save_replaces_previous_contents() {
    let temp = tempfile::tempdir().unwrap();
    let file = StoreFile::in_dir(temp.path(), "playerFlyState");

    let mut first = StateStore::new();
    first.set("alice", FlyState::Enabled);
    file.save(&first).unwrap();

    let mut second = StateStore::new();
    second.set("bob", FlyState::Enabled);
    file.save(&second).unwrap();

    let reloaded = file.load().unwrap();
    assert!(!reloaded.contains("alice"));
    assert_eq!(reloaded.get("bob"), FlyState::Enabled);
}

#[test]
fn test_double_save_is_byte_identical() {
    let temp = tempfile::tempdir().unwrap();
    let first = temp.path().join("first.bin");
    let second = temp.path().join("second.bin");

    let mut store = StateStore::new();
    store.set("zed", FlyState::Enabled);
    store.set("amy", FlyState::Disabled);
    store.set("Bob", FlyState::Enabled);

    store.save(&first).unwrap();
    store.save(&second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    assert_eq!(
        StateStore::load(&first).unwrap(),
        StateStore::load(&second).unwrap()
    );
}

#[test]
fn test_garbage_file_is_corrupt() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("playerFlyState.bin");
    fs::write(&path, b"definitely not a fly state store").unwrap();

    let err = StateStore::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt { .. }));
}

#[test]
fn test_truncated_file_is_corrupt() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("playerFlyState.bin");

    let mut store = StateStore::new();
    store.set("alice", FlyState::Enabled);
    store.set("bob", FlyState::Enabled);
    store.save(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 3]).unwrap();

    let err = StateStore::load(&path).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt { .. }));
}

#[test]
fn test_empty_file_is_corrupt() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("playerFlyState.bin");
    fs::write(&path, b"").unwrap();

    assert!(matches!(
        StateStore::load(&path),
        Err(LoadError::Corrupt { .. })
    ));
}

#[test]
fn test_corrupt_file_is_left_in_place() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("playerFlyState.bin");
    fs::write(&path, b"\x01\x02\x03").unwrap();

    assert!(StateStore::load(&path).is_err());
    assert_eq!(fs::read(&path).unwrap(), b"\x01\x02\x03");
}
