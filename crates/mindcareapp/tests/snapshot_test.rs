use mindcareapp::api::{ApiSettings, MindcareApi};
use mindcareapp::error::MindcareError;
use mindcareapp::model::{Post, SosAlert, SosRecord, StorageKey};
use mindcareapp::store::fs_backend::FsBackend;
use mindcareapp::store::Store;
use mindcareapp::transport::ApiClient;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, MindcareApi<FsBackend>) {
    let dir = TempDir::new().unwrap();
    let api = MindcareApi::offline(FsBackend::new(dir.path().join("data")));
    (dir, api)
}

fn read_snapshot(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_export_clear_import_restores_everything() {
    let (dir, api) = setup();
    api.seed_demo(Some(11)).unwrap();
    api.create_post("Exam week", "Anyone else stressed?").unwrap();

    let exported = api.export(dir.path()).unwrap();
    let path = exported.snapshot_path.unwrap();
    assert_eq!(path, dir.path().join("mindcare-data.json"));
    let before = read_snapshot(&path);

    api.clear_all().unwrap();
    assert_eq!(api.list_posts().posts.len(), 0);

    api.import(&path).unwrap();
    let again = api.export(&dir.path().join("again")).unwrap();
    assert_eq!(read_snapshot(&again.snapshot_path.unwrap()), before);
    assert_eq!(api.list_posts().posts[0].title, "Exam week");
}

#[test]
fn test_import_merges_while_seed_overwrites() {
    let (dir, api) = setup();
    api.add_habit("Journaling").unwrap();

    let file = dir.path().join("partial.json");
    fs::write(&file, r#"{"points": 99, "extra": true}"#).unwrap();
    let result = api.import(&file).unwrap();
    assert_eq!(result.keys, vec![StorageKey::Points]);
    assert_eq!(api.lifestyle().habits, vec!["Journaling"]);
    assert_eq!(api.gamification().points, Some(99));

    api.seed_demo(Some(5)).unwrap();
    assert_eq!(api.lifestyle().habits, vec!["Exercise", "Meditation"]);
    assert_eq!(api.gamification().points, Some(20));
}

#[test]
fn test_seed_shape_is_independent_of_prior_state() {
    let (_dir, api) = setup();
    api.send_sos(SosAlert {
        phone: Some("+911234567890".into()),
        ..Default::default()
    })
    .unwrap();

    api.seed_demo(None).unwrap();
    assert_eq!(api.list_moods().moods.len(), 14);
    assert_eq!(api.list_assessments().assessments.len(), 2);
    assert_eq!(api.lifestyle().sleep_logs.len(), 7);
    assert!(api.list_sos().sos_records.is_empty());
}

#[test]
fn test_import_rejects_bad_documents_without_writing() {
    let (dir, api) = setup();
    api.add_points(5).unwrap();

    let not_json = dir.path().join("broken.json");
    fs::write(&not_json, "{").unwrap();
    assert!(matches!(
        api.import(&not_json).unwrap_err(),
        MindcareError::Serialization(_)
    ));

    let array = dir.path().join("array.json");
    fs::write(&array, "[{\"points\": 1}]").unwrap();
    assert!(matches!(
        api.import(&array).unwrap_err(),
        MindcareError::Validation(_)
    ));

    assert_eq!(api.gamification().points, Some(5));
}

#[test]
fn test_offline_fallback_matches_intercepted_shape() {
    let dir = TempDir::new().unwrap();
    let store = Store::new(FsBackend::new(dir.path().to_path_buf()));
    let api = MindcareApi::new(store, ApiClient::offline(), ApiSettings::default());

    let post = api.create_post("Offline", "still saved").unwrap();
    assert!(post.delivery.unwrap().is_local());

    let sos = api
        .send_sos(SosAlert {
            name: Some("Anon".into()),
            phone: Some("1234567890".into()),
            relation: Some("Friend".into()),
            details: None,
        })
        .unwrap();
    assert!(sos.delivery.unwrap().is_local());

    let posts: Vec<Post> = api.store().read_list(StorageKey::Posts);
    assert_eq!(posts.len(), 1);
    let records: Vec<SosRecord> = api.store().read_list(StorageKey::Sos);
    assert_eq!(records[0].alert.relation.as_deref(), Some("Friend"));

    let on_disk = read_snapshot(&dir.path().join("sos.json"));
    assert_eq!(on_disk[0]["phone"], json!("1234567890"));
    assert!(on_disk[0]["date"].is_string());
}
