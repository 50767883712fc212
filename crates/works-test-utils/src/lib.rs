//! Testing utilities for the works workspace
//!
//! Shared fixtures and on-disk stores.

#![allow(missing_docs)]

use std::path::PathBuf;
use tempfile::TempDir;
use works_repository::{NewWork, WorkRepository};
use works_store::{JsonFileStore, Work, WorkId};

/// The admin screen's seed portfolio, plus one undated entry
pub fn sample_works() -> Vec<Work> {
    let mut nike = Work::new(
        WorkId(1),
        "Nike Air Max Campaign",
        "Nike",
        "High-energy commercial showcasing the new Air Max collection with dynamic cinematography and motion graphics.",
        "Commercial",
        "Completed",
    )
    .with_dates(Some("2024-01-15"), Some("2024-02-28"))
    .with_images(["/nike-commercial-bts.png", "/nike-commercial-cinematic.png"]);
    nike.budget = Some("$75,000".to_string());
    nike.location = Some("Los Angeles, CA".to_string());
    nike.awards = Some("Best Commercial 2024".to_string());

    let mut tesla = Work::new(
        WorkId(2),
        "Tesla Model S Animation",
        "Tesla",
        "3D animation showcasing the Tesla Model S features with photorealistic rendering and smooth transitions.",
        "Animation",
        "In Production",
    )
    .with_dates(Some("2024-02-01"), Some("2024-04-15"))
    .with_images(["/tesla-commercial-cinematic.png"]);
    tesla.budget = Some("$120,000".to_string());
    tesla.location = Some("Remote".to_string());

    let mut spotify = Work::new(
        WorkId(3),
        "Spotify Wrapped Graphics",
        "Spotify",
        "Motion graphics package for Spotify Wrapped featuring vibrant colors and dynamic typography animations.",
        "Animation",
        "Completed",
    )
    .with_dates(Some("2023-10-01"), Some("2023-11-30"))
    .with_images(["/spotify-wrapped-graphics.png"]);
    spotify.budget = Some("$45,000".to_string());
    spotify.location = Some("New York, NY".to_string());
    spotify.awards = Some("Motion Graphics Excellence Award".to_string());

    let documentary = Work::new(
        WorkId(4),
        "Ocean Conservation Documentary",
        "Blue Planet Foundation",
        "Documentary following marine biologists in the Pacific.",
        "Documentary",
        "Pre-Production",
    )
    .with_dates(Some("2022-06-01"), None);

    let undated = Work::new(
        WorkId(5),
        "Studio Reel",
        "In-house",
        "Yearly showreel.",
        "Corporate",
        "Draft",
    );

    vec![nike, tesla, spotify, documentary, undated]
}

/// Create payload with every required field set
pub fn new_work(title: &str) -> NewWork {
    NewWork::new(title, "Client", "Description", "Commercial", "Completed")
}

/// JSON file store living in a temporary directory
pub struct TempStore {
    pub dir: TempDir,
    pub store: JsonFileStore,
}

impl TempStore {
    /// Empty store; the file does not exist yet
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("data").join("works.json"));
        Self { dir, store }
    }

    /// Store whose file already holds `works`
    pub fn with_works(works: &[Work]) -> Self {
        let temp = Self::new();
        std::fs::create_dir_all(temp.path().parent().unwrap()).unwrap();
        std::fs::write(temp.path(), serde_json::to_vec_pretty(works).unwrap()).unwrap();
        temp
    }

    pub fn path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    pub fn repository(&self) -> WorkRepository<JsonFileStore> {
        WorkRepository::new(self.store.clone())
    }

    pub fn read_file(&self) -> String {
        std::fs::read_to_string(self.path()).unwrap()
    }
}

impl Default for TempStore {
    fn default() -> Self {
        Self::new()
    }
}
