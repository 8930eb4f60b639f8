//! Hover-detail formatting.
//!
//! Travel times shown in the info panel are clamped to a readable range:
//! anything quicker than the low bound reads "under", anything slower than
//! the high bound reads "over", and the rest is rounded to whole units.

use crate::aggregate::{Effective, TravelTimeAggregator};
use crate::dataset::Region;
use crate::error::{Error, Result};

/// Pure clamp-and-round formatter for travel-time values.
#[derive(Debug, Clone)]
pub struct DetailFormatter {
    low: f64,
    high: f64,
    unit: String,
}

impl DetailFormatter {
    /// Bounds are inclusive on both sides: values equal to a bound are
    /// printed as numbers, not as "under"/"over".
    pub fn new(low: f64, high: f64, unit: impl Into<String>) -> Result<Self> {
        if low > high {
            return Err(Error::InvalidBounds { low, high });
        }
        Ok(Self {
            low,
            high,
            unit: unit.into(),
        })
    }

    pub fn format(&self, minutes: f64) -> String {
        if minutes < self.low {
            format!("under {} {}", self.low, self.unit)
        } else if minutes > self.high {
            format!("over {} {}", self.high, self.unit)
        } else {
            format!("{} {}", minutes.round(), self.unit)
        }
    }

    /// Like [`DetailFormatter::format`] for derived values; no selection
    /// renders as `"n/a"`.
    pub fn format_effective(&self, effective: &Effective) -> String {
        match effective {
            Effective::NoSelection => "n/a".to_owned(),
            Effective::Minutes(v) => self.format(*v),
        }
    }

    /// `(label, formatted time)` pairs for the active categories, in
    /// category configuration order. A missing value for an active category
    /// is the same data-integrity error the aggregator raises.
    pub fn detail_lines(
        &self,
        region: &Region,
        aggregator: &TravelTimeAggregator,
    ) -> Result<Vec<(String, String)>> {
        let mut lines = Vec::new();
        for category in aggregator.categories() {
            if !aggregator.is_active(&category.key) {
                continue;
            }
            let minutes =
                region
                    .minutes_to(&category.key)
                    .ok_or_else(|| Error::MissingValue {
                        region: region.id().to_owned(),
                        category: category.key.clone(),
                    })?;
            lines.push((category.label.clone(), self.format(minutes)));
        }
        Ok(lines)
    }
}
