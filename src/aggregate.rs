//! Roadway label derivation and collision aggregation.
//!
//! Each feature collapses into at most one roadway label via a prioritized
//! fallback over its three intersection locators, and contributes its parsed
//! date to the histogram series. The bar chart only shows roadways at or
//! above [`MIN_ROADWAY_COLLISIONS`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::dataset::{CollisionDataset, CollisionProperties};
use crate::error::CollisionError;

/// Minimum number of collisions for a roadway to appear in the bar chart.
pub const MIN_ROADWAY_COLLISIONS: u64 = 50;

/// Occurrence count per derived roadway label. `BTreeMap` keeps labels in
/// the lexicographic order the bar chart expects.
pub type RoadwayTally = BTreeMap<String, u64>;

/// Result of one aggregation pass over the dataset.
#[derive(Debug)]
pub struct CollisionAggregate {
    /// One date per feature, in input order, unfiltered.
    pub dates: Vec<NaiveDate>,
    /// Full tally over every derived roadway label.
    pub roadways: RoadwayTally,
}

impl CollisionAggregate {
    /// Tally restricted to roadways with at least `min` collisions.
    pub fn filtered_roadways(&self, min: u64) -> RoadwayTally {
        self.roadways
            .iter()
            .filter(|&(_, &count)| count >= min)
            .map(|(label, &count)| (label.clone(), count))
            .collect()
    }
}

/// Derives the display label for a collision's roadway.
///
/// Prioritized fallback, first satisfied rule wins:
/// 1. primary and secondary both non-empty → `"primary secondary"`
/// 2. primary non-empty (secondary empty)  → primary
/// 3. alternate non-empty                  → alternate
/// 4. secondary non-empty                  → secondary
/// 5. no locator set                       → `None` (excluded from tally)
///
/// The ordering is load-bearing: a record with an empty primary but both
/// secondary and alternate set takes the alternate, and rule 2 never
/// consults the alternate once the primary is set.
pub fn roadway_label(props: &CollisionProperties) -> Option<String> {
    let primary = props.intersection_primary.as_str();
    let secondary = props.intersection_secondary.as_str();
    let alternate = props.intersection_alternate.as_str();

    if !primary.is_empty() {
        if !secondary.is_empty() {
            Some(format!("{primary} {secondary}"))
        } else {
            Some(primary.to_string())
        }
    } else if !alternate.is_empty() {
        Some(alternate.to_string())
    } else if !secondary.is_empty() {
        Some(secondary.to_string())
    } else {
        None
    }
}

/// Parses a `YYYY/MM/DD` collision date. Exactly three `/`-separated
/// integer components forming a valid calendar date.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Single pass over the dataset producing the date series and roadway tally.
///
/// # Errors
///
/// Returns [`CollisionError::Date`] on the first malformed date string; no
/// partial aggregate is produced.
pub fn aggregate(dataset: &CollisionDataset) -> Result<CollisionAggregate, CollisionError> {
    let mut dates = Vec::with_capacity(dataset.len());
    let mut roadways = RoadwayTally::new();

    for (i, collision) in dataset.features.iter().enumerate() {
        let props = &collision.properties;

        let date = parse_date(&props.date).ok_or_else(|| CollisionError::Date {
            value: props.date.clone(),
            feature: i,
        })?;
        dates.push(date);

        if let Some(label) = roadway_label(props) {
            *roadways.entry(label).or_insert(0) += 1;
        }
    }

    info!(
        records = dates.len(),
        roadways = roadways.len(),
        "Aggregation complete"
    );

    Ok(CollisionAggregate { dates, roadways })
}
