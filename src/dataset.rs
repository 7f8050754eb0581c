//! Typed model and loader for the mapshop collision GeoJSON export.
//!
//! The document is a GeoJSON `FeatureCollection`; only a handful of
//! properties drive the pipeline, so those are typed and everything else
//! (envelope members, geometry, unrecognized properties) passes through a
//! flattened map untouched so filtered subsets round-trip completely.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::CollisionError;

/// A decoded collision document: the ordered feature sequence plus every
/// other top-level member of the source file, preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionDataset {
    pub features: Vec<Collision>,
    #[serde(flatten)]
    pub envelope: Map<String, Value>,
}

impl CollisionDataset {
    /// Derived collection keeping the envelope but only the features that
    /// satisfy the predicate, in their original relative order.
    pub fn subset<F>(&self, predicate: F) -> CollisionDataset
    where
        F: Fn(&Collision) -> bool,
    {
        CollisionDataset {
            features: self
                .features
                .iter()
                .filter(|c| predicate(c))
                .cloned()
                .collect(),
            envelope: self.envelope.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// One collision feature. Geometry, feature id and any other members ride
/// along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collision {
    pub properties: CollisionProperties,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The property fields the pipeline reads, under their upstream mapshop
/// names. The three intersection locators may be absent or empty; the
/// remaining fields are required and validated at decode time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionProperties {
    /// Death count for the collision.
    #[serde(rename = "KILLED")]
    pub killed: u32,

    /// Collision-type category, e.g. "COLLISION WITH BICYCLE".
    #[serde(rename = "DIRECTIO_1")]
    pub collision_type: String,

    /// Collision date as `YYYY/MM/DD`.
    #[serde(rename = "COLLISIO_1")]
    pub date: String,

    #[serde(rename = "INTERSEC_1", default)]
    pub intersection_primary: String,

    #[serde(rename = "INTERSEC_2", default)]
    pub intersection_secondary: String,

    #[serde(rename = "INTERSECTI", default)]
    pub intersection_alternate: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shape check only; per-feature validation happens in [`parse_dataset`].
#[derive(Deserialize)]
struct RawDataset {
    features: Vec<Value>,
    #[serde(flatten)]
    envelope: Map<String, Value>,
}

/// Loads and validates a collision dataset from a GeoJSON file.
///
/// # Errors
///
/// * [`CollisionError::NotFound`] if the path does not exist.
/// * [`CollisionError::Decode`] if the content is not well-formed JSON or
///   lacks a top-level `features` sequence.
/// * [`CollisionError::Validation`] if any feature is missing required
///   properties; every offending feature is reported, not just the first.
pub fn load_dataset(path: &Path) -> Result<CollisionDataset, CollisionError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CollisionError::NotFound(path.to_path_buf()),
        _ => CollisionError::Io(e),
    })?;

    let dataset = parse_dataset(&text)?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        "Collision dataset loaded"
    );
    Ok(dataset)
}

/// Decodes a collision dataset from GeoJSON text.
///
/// Features are decoded independently so that every invalid record in the
/// document surfaces in a single [`CollisionError::Validation`].
pub fn parse_dataset(text: &str) -> Result<CollisionDataset, CollisionError> {
    let raw: RawDataset = serde_json::from_str(text)?;

    let mut features = Vec::with_capacity(raw.features.len());
    let mut violations = Vec::new();

    for (i, value) in raw.features.into_iter().enumerate() {
        match serde_json::from_value::<Collision>(value) {
            Ok(collision) => features.push(collision),
            Err(e) => violations.push(format!("feature {i}: {e}")),
        }
    }

    if !violations.is_empty() {
        return Err(CollisionError::Validation(violations));
    }

    Ok(CollisionDataset {
        features,
        envelope: raw.envelope,
    })
}
