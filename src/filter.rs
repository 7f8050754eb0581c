//! Fatal and bicycle collision subsets, written back out as GeoJSON.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::dataset::CollisionDataset;
use crate::error::CollisionError;

pub const FATAL_OUTPUT: &str = "fatal_collisions.geojson";
pub const BICYCLE_OUTPUT: &str = "bicycle_collisions.geojson";

/// Collision-type category marking a bicycle collision. Exact,
/// case-sensitive match against `DIRECTIO_1`.
pub const BICYCLE_COLLISION: &str = "COLLISION WITH BICYCLE";

/// Features with at least one death, original order, envelope kept.
pub fn fatal_subset(dataset: &CollisionDataset) -> CollisionDataset {
    dataset.subset(|c| c.properties.killed > 0)
}

/// Features whose collision type is exactly [`BICYCLE_COLLISION`].
pub fn bicycle_subset(dataset: &CollisionDataset) -> CollisionDataset {
    dataset.subset(|c| c.properties.collision_type == BICYCLE_COLLISION)
}

/// Writes the fatal and bicycle subsets to [`FATAL_OUTPUT`] and
/// [`BICYCLE_OUTPUT`] in the current working directory, overwriting any
/// existing files. The two writes are independent: if the second fails the
/// first remains on disk.
pub fn write_subsets(dataset: &CollisionDataset) -> Result<(), CollisionError> {
    let fatal = fatal_subset(dataset);
    write_geojson(&fatal, Path::new(FATAL_OUTPUT))?;

    let bicycle = bicycle_subset(dataset);
    write_geojson(&bicycle, Path::new(BICYCLE_OUTPUT))?;

    info!(
        fatal = fatal.len(),
        bicycle = bicycle.len(),
        "Filtered subsets written"
    );
    Ok(())
}

/// Serializes a dataset to a GeoJSON file, overwriting `path`.
pub fn write_geojson(dataset: &CollisionDataset, path: &Path) -> Result<(), CollisionError> {
    let text = serde_json::to_string(dataset)?;
    fs::write(path, text).map_err(|source| CollisionError::Write {
        path: path.to_path_buf(),
        source,
    })
}
