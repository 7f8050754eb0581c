use std::path::PathBuf;

/// Errors produced by the collision pipeline.
///
/// Every stage propagates; nothing is caught or retried. The binary crate
/// converts to `anyhow::Error` at the boundary, so any of these aborts the
/// run with a nonzero exit code.
#[derive(Debug, thiserror::Error)]
pub enum CollisionError {
    /// The input file does not exist.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem I/O failure outside of subset/chart writeback.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not well-formed JSON, or the document shape is wrong.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// One entry per feature with missing or invalid required properties.
    /// All violations in the document are reported together.
    #[error("invalid collision records:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    /// A collision date string does not parse as `YYYY/MM/DD`.
    #[error("feature {feature}: malformed collision date {value:?}")]
    Date { value: String, feature: usize },

    /// A filtered subset file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chart artifact could not be written.
    #[error("failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shows_path() {
        let err = CollisionError::NotFound(PathBuf::from("/tmp/missing.geojson"));
        assert!(err.to_string().contains("/tmp/missing.geojson"));
    }

    #[test]
    fn test_validation_lists_every_violation() {
        let err = CollisionError::Validation(vec![
            "feature 0: missing field `KILLED`".to_string(),
            "feature 3: missing field `COLLISIO_1`".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("feature 0"));
        assert!(msg.contains("feature 3"));
    }

    #[test]
    fn test_date_error_names_feature_and_value() {
        let err = CollisionError::Date {
            value: "2014-01-01".to_string(),
            feature: 7,
        };
        assert!(err.to_string().contains("feature 7"));
        assert!(err.to_string().contains("2014-01-01"));
    }
}
