//! Data file handling
//!
//! The command-line tool keeps every table in one JSON snapshot. A missing
//! file starts a fresh deployment seeded with the standard schedule, or with
//! a catalog file when one is given.

use anyhow::{Context, Result};
use kidcare_model::{InMemoryStore, ScheduleCatalog, Snapshot, standard_catalog};
use log::{debug, info, warn};
use std::path::Path;

/// Load the store from `path`, or seed a new one if the file does not exist
pub fn load(path: &Path, catalog: Option<&Path>) -> Result<InMemoryStore> {
    if !path.exists() {
        let catalog = match catalog {
            Some(file) => {
                info!("{} not found, seeding from {}", path.display(), file.display());
                ScheduleCatalog::from_file(file)
                    .with_context(|| format!("Failed to load catalog: {}", file.display()))?
            }
            None => {
                info!("{} not found, starting from the standard schedule", path.display());
                standard_catalog().context("Failed to load the standard schedule")?
            }
        };
        return Ok(InMemoryStore::with_catalog(catalog));
    }
    if let Some(file) = catalog {
        warn!("{} exists, ignoring catalog {}", path.display(), file.display());
    }

    let snapshot = Snapshot::from_file(path)
        .with_context(|| format!("Failed to load data file: {}", path.display()))?;
    debug!(
        "loaded {} children, {} records, {} slots from {}",
        snapshot.children.len(),
        snapshot.vaccination_records.len(),
        snapshot.availability.len(),
        path.display()
    );
    Ok(InMemoryStore::from_snapshot(snapshot))
}

/// Write the store back to `path`
pub fn save(store: &InMemoryStore, path: &Path) -> Result<()> {
    store
        .snapshot()
        .write_file(path)
        .with_context(|| format!("Failed to save data file: {}", path.display()))?;
    debug!("saved {}", path.display());
    Ok(())
}
