//! Travel-time aggregation.
//!
//! Each region carries one precomputed travel time per destination category.
//! The user picks a subset of categories; a region's displayed value is the
//! worst (maximum) time over that subset. [`TravelTimeAggregator`] owns the
//! active subset and recomputes every region's derived value when it changes.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dataset::Region;
use crate::error::{Error, Result};

/// Numeric stand-in for [`Effective::NoSelection`], above any real
/// minute-based threshold.
pub const DEFAULT_SENTINEL_MINUTES: f64 = 999.;

/// A region's derived display value.
///
/// `NoSelection` is a real state, not a magic number: with no destinations
/// selected there is nothing to measure, and scales render it with their
/// fallback color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Effective {
    /// No destination categories are active.
    #[default]
    NoSelection,
    /// Worst travel time in minutes over the active categories.
    Minutes(f64),
}

impl Effective {
    /// Numeric form for consumers that need a plain number; `NoSelection`
    /// becomes `sentinel` (conventionally [`DEFAULT_SENTINEL_MINUTES`]).
    pub fn as_minutes(&self, sentinel: f64) -> f64 {
        match self {
            Effective::NoSelection => sentinel,
            Effective::Minutes(v) => *v,
        }
    }
}

/// A destination category: stable key plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
}

impl Category {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Owns the fixed category set and the mutable active subset, and keeps
/// every region's [`Effective`] value consistent with that subset.
pub struct TravelTimeAggregator {
    categories: Vec<Category>,
    active: BTreeSet<String>,
    sentinel_minutes: f64,
}

impl TravelTimeAggregator {
    /// Build an aggregator with no active categories and the default
    /// sentinel. Duplicate keys and empty labels are configuration errors.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        Self::with_sentinel(categories, DEFAULT_SENTINEL_MINUTES)
    }

    /// Like [`TravelTimeAggregator::new`] with an explicit numeric sentinel
    /// for [`Effective::as_minutes`].
    pub fn with_sentinel(categories: Vec<Category>, sentinel_minutes: f64) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for category in &categories {
            if category.label.trim().is_empty() {
                return Err(Error::MissingLabel(category.key.clone()));
            }
            if !seen.insert(category.key.as_str()) {
                return Err(Error::DuplicateKey(category.key.clone()));
            }
        }
        Ok(Self {
            categories,
            active: BTreeSet::new(),
            sentinel_minutes,
        })
    }

    /// Known categories, in configuration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Display label for `key`, if the category is known.
    pub fn label_for(&self, key: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.label.as_str())
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains(key)
    }

    /// Currently active category keys.
    pub fn active(&self) -> &BTreeSet<String> {
        &self.active
    }

    pub fn sentinel_minutes(&self) -> f64 {
        self.sentinel_minutes
    }

    /// Replace the active subset. Unknown keys are rejected and the
    /// previous subset is kept.
    pub fn set_active<I, S>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = BTreeSet::new();
        for key in keys {
            let key = key.into();
            if !self.knows(&key) {
                return Err(Error::UnknownCategory(key));
            }
            next.insert(key);
        }
        self.active = next;
        Ok(())
    }

    /// Flip one category on or off; returns the new state. Callers must
    /// follow up with [`TravelTimeAggregator::recompute_all`].
    pub fn toggle(&mut self, key: &str) -> Result<bool> {
        if !self.knows(key) {
            return Err(Error::UnknownCategory(key.to_owned()));
        }
        if self.active.remove(key) {
            Ok(false)
        } else {
            self.active.insert(key.to_owned());
            Ok(true)
        }
    }

    /// Derived value for one region under the current active subset.
    ///
    /// A region lacking a travel time for an active category is a
    /// data-integrity failure of the upstream dataset; substituting a
    /// default here would silently understate the displayed time.
    pub fn recompute(&self, region: &Region) -> Result<Effective> {
        if self.active.is_empty() {
            return Ok(Effective::NoSelection);
        }
        let mut worst = f64::NEG_INFINITY;
        for key in &self.active {
            let minutes = region.minutes_to(key).ok_or_else(|| Error::MissingValue {
                region: region.id().to_owned(),
                category: key.clone(),
            })?;
            if minutes > worst {
                worst = minutes;
            }
        }
        Ok(Effective::Minutes(worst))
    }

    /// Recompute and store every region's derived value. After a successful
    /// return no region holds a value stale with respect to the current
    /// active subset.
    pub fn recompute_all(&self, regions: &mut [Region]) -> Result<()> {
        for region in regions.iter_mut() {
            region.effective = self.recompute(region)?;
        }
        debug!(
            "recomputed {} regions over {} active categories",
            regions.len(),
            self.active.len()
        );
        Ok(())
    }

    fn knows(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> TravelTimeAggregator {
        TravelTimeAggregator::new(vec![
            Category::new("groceries", "Groceries"),
            Category::new("parks", "Parks"),
            Category::new("cafes", "Cafes"),
        ])
        .unwrap()
    }

    fn region() -> Region {
        Region::new(
            "tract-1",
            [("groceries", 4.), ("parks", 12.), ("cafes", 2.)],
        )
    }

    #[test]
    fn max_over_active_categories() {
        let mut agg = aggregator();
        agg.set_active(["groceries", "parks"]).unwrap();
        assert_eq!(agg.recompute(&region()).unwrap(), Effective::Minutes(12.));
    }

    #[test]
    fn empty_selection_is_no_selection() {
        let agg = aggregator();
        assert_eq!(agg.recompute(&region()).unwrap(), Effective::NoSelection);
        assert_eq!(
            Effective::NoSelection.as_minutes(DEFAULT_SENTINEL_MINUTES),
            999.
        );
    }

    #[test]
    fn single_category_selects_its_value() {
        let mut agg = aggregator();
        agg.set_active(["cafes"]).unwrap();
        assert_eq!(agg.recompute(&region()).unwrap(), Effective::Minutes(2.));
    }

    #[test]
    fn missing_value_is_an_error() {
        let mut agg = aggregator();
        agg.set_active(["parks"]).unwrap();
        let incomplete = Region::new("tract-2", [("groceries", 4.)]);
        let err = agg.recompute(&incomplete).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingValue { region, category }
                if region == "tract-2" && category == "parks"
        ));
    }

    #[test]
    fn recompute_all_updates_every_region() {
        let mut agg = aggregator();
        agg.set_active(["groceries", "cafes"]).unwrap();
        let mut regions = vec![
            region(),
            Region::new("tract-3", [("groceries", 7.), ("parks", 1.), ("cafes", 9.)]),
        ];
        agg.recompute_all(&mut regions).unwrap();
        assert_eq!(regions[0].effective, Effective::Minutes(4.));
        assert_eq!(regions[1].effective, Effective::Minutes(9.));
    }

    #[test]
    fn recompute_all_is_idempotent() {
        let mut agg = aggregator();
        agg.set_active(["parks"]).unwrap();
        let mut regions = vec![region()];
        agg.recompute_all(&mut regions).unwrap();
        let first = regions[0].effective;
        agg.recompute_all(&mut regions).unwrap();
        assert_eq!(regions[0].effective, first);
    }

    #[test]
    fn stale_values_do_not_survive_a_selection_change() {
        let mut agg = aggregator();
        agg.set_active(["parks"]).unwrap();
        let mut regions = vec![region()];
        agg.recompute_all(&mut regions).unwrap();
        assert_eq!(regions[0].effective, Effective::Minutes(12.));

        agg.set_active::<_, &str>([]).unwrap();
        agg.recompute_all(&mut regions).unwrap();
        assert_eq!(regions[0].effective, Effective::NoSelection);
    }

    #[test]
    fn toggle_flips_and_reports_state() {
        let mut agg = aggregator();
        assert!(agg.toggle("parks").unwrap());
        assert!(agg.is_active("parks"));
        assert!(!agg.toggle("parks").unwrap());
        assert!(!agg.is_active("parks"));
    }

    #[test]
    fn unknown_keys_are_rejected_without_side_effects() {
        let mut agg = aggregator();
        agg.set_active(["parks"]).unwrap();
        assert!(matches!(
            agg.toggle("schools"),
            Err(Error::UnknownCategory(k)) if k == "schools"
        ));
        assert!(agg.set_active(["parks", "schools"]).is_err());
        assert!(agg.is_active("parks"));
        assert_eq!(agg.active().len(), 1);
    }

    #[test]
    fn categories_round_trip_through_json_config() {
        let json = r#"[
            {"key": "groceries", "label": "Groceries"},
            {"key": "parks", "label": "Parks"}
        ]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        let reencoded = serde_json::to_string(&categories).unwrap();
        let again: Vec<Category> = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(categories, again);

        let agg = TravelTimeAggregator::new(categories).unwrap();
        assert_eq!(agg.label_for("parks"), Some("Parks"));
        assert_eq!(agg.categories().len(), 2);
    }

    #[test]
    fn duplicate_or_unlabeled_categories_are_rejected() {
        let err = TravelTimeAggregator::new(vec![
            Category::new("parks", "Parks"),
            Category::new("parks", "Parks again"),
        ]);
        assert!(matches!(err, Err(Error::DuplicateKey(k)) if k == "parks"));

        let err = TravelTimeAggregator::new(vec![Category::new("parks", "  ")]);
        assert!(matches!(err, Err(Error::MissingLabel(k)) if k == "parks"));
    }
}
