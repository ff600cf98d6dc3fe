//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use airnet_lib::{load_dataset, Dataset};

/// Path to the fixtures directory shared by library and CLI tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the minimal fixture dataset directory.
pub fn fixture_dataset_dir() -> PathBuf {
    fixtures_dir().join("minimal")
}

/// Load the minimal fixture dataset.
#[allow(dead_code)]
pub fn fixture_dataset() -> Dataset {
    load_dataset(&fixture_dataset_dir()).expect("fixture dataset loads")
}
