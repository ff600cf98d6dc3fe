//! Subcommand handlers dispatched from `main.rs`.

pub mod airport;
pub mod network;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};

use airnet_lib::{load_dataset, resolve_dataset_dir, Dataset};

/// Resolve the dataset directory and load it.
pub fn load(data_dir: Option<&Path>) -> Result<Dataset> {
    let dir = resolve_dataset_dir(data_dir).context("failed to resolve the dataset directory")?;
    load_dataset(&dir).with_context(|| format!("failed to load dataset from {}", dir.display()))
}
