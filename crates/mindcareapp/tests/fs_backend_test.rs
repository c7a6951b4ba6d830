use mindcareapp::model::StorageKey;
use mindcareapp::store::backend::StorageBackend;
use mindcareapp::store::fs_backend::FsBackend;
use mindcareapp::store::Store;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_slot_io() {
    let (_dir, backend) = setup();

    backend.set_item("posts", "[]").unwrap();
    assert_eq!(backend.get_item("posts").unwrap(), Some("[]".to_string()));

    backend.remove_item("posts").unwrap();
    assert_eq!(backend.get_item("posts").unwrap(), None);
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();

    backend.set_item("habits", "[\"Walk\"]").unwrap();
    backend.set_item("habits", "[\"Run\"]").unwrap();

    let expected_path = dir.path().join("habits.json");
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "[\"Run\"]");

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_missing_directory_reads_absent() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("not-yet"));

    assert_eq!(backend.get_item("moods").unwrap(), None);
    backend.remove_item("moods").unwrap();

    backend.set_item("moods", "[]").unwrap();
    assert!(dir.path().join("not-yet/moods.json").exists());
}

#[test]
fn test_store_over_fs_falls_back_on_corrupt_file() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("points.json"), "not json at all").unwrap();

    let store = Store::new(backend);
    assert_eq!(store.read(StorageKey::Points, 0u64), 0);

    store.write(StorageKey::Points, &12u64).unwrap();
    assert_eq!(store.read(StorageKey::Points, 0u64), 12);
}

#[test]
fn test_fs_backend_persists_across_instances() {
    let (dir, backend) = setup();
    Store::new(backend)
        .write(StorageKey::Habits, &vec!["Exercise"])
        .unwrap();

    let reopened = Store::new(FsBackend::new(dir.path().to_path_buf()));
    let habits: Vec<String> = reopened.read(StorageKey::Habits, Vec::new());
    assert_eq!(habits, vec!["Exercise"]);
}
