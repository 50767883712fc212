//! On-disk round-trip behaviour of the JSON file store.

use works_store::{JsonFileStore, RecordStore};

/// A file as the studio site writes it: 2-space indent, absent optionals omitted.
const SITE_FILE: &str = r#"[
  {
    "id": 1,
    "title": "Nike Air Max Campaign",
    "client": "Nike",
    "description": "High-energy commercial showcasing the new Air Max collection.",
    "category": "Commercial",
    "status": "Completed",
    "budget": "$75,000",
    "startDate": "2024-01-15",
    "endDate": "2024-02-28",
    "location": "Los Angeles, CA",
    "awards": "Best Commercial 2024",
    "images": [
      "/nike-commercial-bts.png",
      "/nike-commercial-cinematic.png"
    ]
  },
  {
    "id": 4,
    "title": "Café Documentary",
    "client": "Café Società",
    "description": "Short documentary.",
    "category": "Documentary",
    "status": "In Production",
    "awards": "",
    "images": []
  }
]"#;

#[tokio::test]
async fn save_of_unmodified_load_keeps_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("works.json");
    std::fs::write(&path, SITE_FILE).unwrap();

    let store = JsonFileStore::open(&path);
    let works = store.load_all().await.unwrap();
    assert_eq!(works.len(), 2);

    store.save_all(&works).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SITE_FILE);
}

#[tokio::test]
async fn round_trip_of_store_written_file_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("works.json");
    std::fs::write(&path, SITE_FILE).unwrap();
    let store = JsonFileStore::open(&path);

    for _ in 0..3 {
        let works = store.load_all().await.unwrap();
        store.save_all(&works).await.unwrap();
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SITE_FILE);
}

#[tokio::test]
async fn empty_collection_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("works.json");
    let store = JsonFileStore::open(&path);

    let works = store.load_all().await.unwrap();
    store.save_all(&works).await.unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[tokio::test]
async fn concurrent_readers_never_see_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("works.json");
    std::fs::write(&path, SITE_FILE).unwrap();
    let store = JsonFileStore::open(&path);
    let works = store.load_all().await.unwrap();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            for i in 0..50 {
                let slice = if i % 2 == 0 { &works[..1] } else { &works[..] };
                store.save_all(slice).await.unwrap();
            }
        })
    };

    let reader = {
        let store = store.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                let loaded = store.load_all().await.unwrap();
                assert!(loaded.len() == 1 || loaded.len() == 2);
            }
        })
    };

    writer.await.unwrap();
    reader.await.unwrap();
}
