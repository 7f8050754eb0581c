//! Chart artifacts: collision histogram over time and roadway bar chart.
//!
//! Charts are self-contained interactive HTML documents built with plotly.
//! The HTML is written by this module rather than the charting backend so
//! that I/O failures surface as [`CollisionError::Render`].

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use plotly::layout::Axis;
use plotly::{Bar, Histogram, Layout, Plot};
use tracing::info;

use crate::aggregate::{CollisionAggregate, MIN_ROADWAY_COLLISIONS, RoadwayTally};
use crate::error::CollisionError;

pub const HISTOGRAM_OUTPUT: &str = "histogram.html";
pub const BARPLOT_OUTPUT: &str = "barplot.html";

const HISTOGRAM_TITLE: &str = "Lexington Collisions 2004 - 2014";
const BARPLOT_TITLE: &str = "Lexington Collisions by Roadway 2004 - 2014";

/// Writes [`HISTOGRAM_OUTPUT`] and [`BARPLOT_OUTPUT`] in the current
/// working directory, overwriting existing files. The bar chart only shows
/// roadways at or above [`MIN_ROADWAY_COLLISIONS`].
pub fn render_charts(aggregate: &CollisionAggregate) -> Result<(), CollisionError> {
    render_histogram(&aggregate.dates, Path::new(HISTOGRAM_OUTPUT))?;

    let roadways = aggregate.filtered_roadways(MIN_ROADWAY_COLLISIONS);
    render_barplot(&roadways, Path::new(BARPLOT_OUTPUT))?;

    Ok(())
}

/// Histogram over the full unfiltered date list, one bin per time unit.
pub fn render_histogram(dates: &[NaiveDate], path: &Path) -> Result<(), CollisionError> {
    let trace = Histogram::new(dates.to_vec()).name("all collisions");

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        Layout::new()
            .title(HISTOGRAM_TITLE)
            .x_axis(Axis::new().title("Date"))
            .y_axis(Axis::new().title("Count")),
    );

    write_chart(&plot, path)
}

/// Bar chart over the filtered roadway tally, categories in lexicographic
/// ascending label order.
pub fn render_barplot(roadways: &RoadwayTally, path: &Path) -> Result<(), CollisionError> {
    // BTreeMap iteration is already lexicographically ascending
    let labels: Vec<String> = roadways.keys().cloned().collect();
    let counts: Vec<u64> = roadways.values().copied().collect();

    let mut plot = Plot::new();
    plot.add_trace(Bar::new(labels, counts));
    plot.set_layout(
        Layout::new()
            .title(BARPLOT_TITLE)
            .x_axis(Axis::new().title("Roadway"))
            .y_axis(Axis::new().title("Count")),
    );

    write_chart(&plot, path)
}

fn write_chart(plot: &Plot, path: &Path) -> Result<(), CollisionError> {
    let html = plot.to_html();
    fs::write(path, html).map_err(|source| CollisionError::Render {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn sample_dates() -> Vec<NaiveDate> {
        vec![
            NaiveDate::from_ymd_opt(2004, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2004, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2010, 6, 15).unwrap(),
        ]
    }

    #[test]
    fn test_render_histogram_writes_html() {
        let path = temp_path("collisions_test_histogram.html");
        render_histogram(&sample_dates(), &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(HISTOGRAM_TITLE));
        assert!(html.contains("2004-01-01"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_render_barplot_writes_html() {
        let mut roadways = RoadwayTally::new();
        roadways.insert("MAIN ST".to_string(), 62);
        roadways.insert("ALPHA AVE".to_string(), 55);

        let path = temp_path("collisions_test_barplot.html");
        render_barplot(&roadways, &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(BARPLOT_TITLE));
        assert!(html.contains("MAIN ST"));
        assert!(html.contains("ALPHA AVE"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_render_to_bad_path_is_render_error() {
        let err = render_histogram(&sample_dates(), Path::new("/no/such/dir/h.html"))
            .unwrap_err();
        assert!(matches!(err, CollisionError::Render { .. }));
    }
}
