//! The load → filter → aggregate → render pipeline, driven by caller flags
//! instead of process-global state.

use tracing::info;

use crate::dataset::CollisionDataset;
use crate::error::CollisionError;
use crate::{aggregate, filter, render};

/// Which optional stages to run. Both off means load-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    pub run_filter: bool,
    pub run_plot: bool,
}

/// Runs the optional stages over an already-decoded dataset: filter first,
/// then aggregate + render, each only when its flag is set.
pub fn run(dataset: &CollisionDataset, config: &RunConfig) -> Result<(), CollisionError> {
    if config.run_filter {
        filter::write_subsets(dataset)?;
    }

    if config.run_plot {
        let aggregate = aggregate::aggregate(dataset)?;
        render::render_charts(&aggregate)?;
    }

    if !config.run_filter && !config.run_plot {
        info!("No stage requested, dataset loaded and discarded");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse_dataset;

    #[test]
    fn test_no_flags_is_a_successful_no_op() {
        let dataset = parse_dataset(r#"{"features": []}"#).unwrap();
        run(&dataset, &RunConfig::default()).unwrap();
    }

    #[test]
    fn test_plot_fails_on_malformed_date_before_rendering() {
        let dataset = parse_dataset(
            r#"{"features": [
                {"properties": {"KILLED": 0, "DIRECTIO_1": "OTHER", "COLLISIO_1": "bad"}}
            ]}"#,
        )
        .unwrap();
        let config = RunConfig {
            run_filter: false,
            run_plot: true,
        };
        let err = run(&dataset, &config).unwrap_err();
        assert!(matches!(err, CollisionError::Date { .. }));
    }
}
