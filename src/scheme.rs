//! Color scales and legends.
//!
//! A scale maps a feature attribute to a fill color. Two classification
//! rules exist: [`ThresholdScale`] buckets a numeric value between ascending
//! bounds, [`CategoryScale`] matches a discrete key exactly. Both expose the
//! same [`ColorScale`] interface and carry an ordered legend.

use std::collections::HashSet;

use rgb::RGB8;

use crate::aggregate::Effective;
use crate::error::{Error, Result};
use crate::ramp::Ramp;

/// Color used when no bucket or key matches.
pub const DEFAULT_FALLBACK: &str = "#888";

/// One legend row: a swatch color and its label, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

/// A classification from attribute values to display colors.
pub trait ColorScale {
    /// The attribute type this scale classifies.
    type Value: ?Sized;

    /// Returns the color for `value`, or the fallback color when no
    /// bucket or key matches.
    fn color_for(&self, value: &Self::Value) -> &str;

    /// Legend rows in configuration order.
    fn legend(&self) -> &[LegendEntry];

    /// Color returned when nothing matches.
    fn fallback_color(&self) -> &str;

    /// Render the legend through `render`, joining consecutive entries with
    /// `separator` (none after the last).
    fn legend_markup<F>(&self, separator: &str, mut render: F) -> String
    where
        F: FnMut(&LegendEntry) -> String,
        Self: Sized,
    {
        let mut out = String::new();
        for (i, entry) in self.legend().iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&render(entry));
        }
        out
    }
}

/// Numeric scale over ascending thresholds.
///
/// Threshold `t_i` owns the half-open bucket `[t_i, t_{i+1})`; the final
/// bucket is open above. Values below the lowest threshold take the
/// fallback color, and a value sitting exactly on a bound belongs to the
/// higher bucket.
pub struct ThresholdScale {
    thresholds: Vec<f64>,
    legend: Vec<LegendEntry>,
    fallback: String,
}

impl ThresholdScale {
    /// Build a scale with the default `"#888"` fallback.
    ///
    /// Fails when the three sequences differ in length, are empty, or the
    /// thresholds are not strictly ascending.
    pub fn new(thresholds: Vec<f64>, colors: Vec<String>, labels: Vec<String>) -> Result<Self> {
        Self::with_fallback(thresholds, colors, labels, DEFAULT_FALLBACK)
    }

    /// Like [`ThresholdScale::new`] with an explicit fallback color.
    pub fn with_fallback(
        thresholds: Vec<f64>,
        colors: Vec<String>,
        labels: Vec<String>,
        fallback: impl Into<String>,
    ) -> Result<Self> {
        check_lengths(thresholds.len(), colors.len(), labels.len())?;
        for (i, pair) in thresholds.windows(2).enumerate() {
            if !(pair[0] < pair[1]) {
                return Err(Error::UnsortedThresholds(i + 1));
            }
        }
        Ok(Self {
            thresholds,
            legend: zip_legend(colors, labels),
            fallback: fallback.into(),
        })
    }

    /// Build a scale whose bucket colors are sampled from an L*C*h ramp
    /// between `start` and `end`, one sample per threshold.
    pub fn from_ramp(
        thresholds: Vec<f64>,
        labels: Vec<String>,
        start: RGB8,
        end: RGB8,
    ) -> Result<Self> {
        let colors = Ramp::between(start, end).hex_colors(thresholds.len());
        Self::new(thresholds, colors, labels)
    }

    /// Color for a derived travel-time value. `Effective::NoSelection`
    /// always renders with the fallback color, never a real bucket.
    pub fn color_for_effective(&self, effective: &Effective) -> &str {
        match effective {
            Effective::NoSelection => &self.fallback,
            Effective::Minutes(v) => self.color_for(v),
        }
    }
}

impl ColorScale for ThresholdScale {
    type Value = f64;

    fn color_for(&self, value: &f64) -> &str {
        // Last threshold not exceeding the value wins; NaN matches nothing.
        let mut color = self.fallback.as_str();
        for (t, entry) in self.thresholds.iter().zip(&self.legend) {
            if *value >= *t {
                color = &entry.color;
            }
        }
        color
    }

    fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    fn fallback_color(&self) -> &str {
        &self.fallback
    }
}

/// Exact-match scale over discrete keys.
pub struct CategoryScale {
    keys: Vec<String>,
    legend: Vec<LegendEntry>,
    fallback: String,
}

impl CategoryScale {
    /// Build a scale with the default `"#888"` fallback.
    ///
    /// Fails on mismatched lengths or duplicate keys; a duplicate would
    /// make the winning color an accident of entry order.
    pub fn new(keys: Vec<String>, colors: Vec<String>, labels: Vec<String>) -> Result<Self> {
        Self::with_fallback(keys, colors, labels, DEFAULT_FALLBACK)
    }

    /// Like [`CategoryScale::new`] with an explicit fallback color.
    pub fn with_fallback(
        keys: Vec<String>,
        colors: Vec<String>,
        labels: Vec<String>,
        fallback: impl Into<String>,
    ) -> Result<Self> {
        check_lengths(keys.len(), colors.len(), labels.len())?;
        let mut seen = HashSet::new();
        for key in &keys {
            if !seen.insert(key.as_str()) {
                return Err(Error::DuplicateKey(key.clone()));
            }
        }
        Ok(Self {
            keys,
            legend: zip_legend(colors, labels),
            fallback: fallback.into(),
        })
    }
}

impl ColorScale for CategoryScale {
    type Value = str;

    fn color_for(&self, value: &str) -> &str {
        self.keys
            .iter()
            .position(|k| k == value)
            .map(|i| self.legend[i].color.as_str())
            .unwrap_or(&self.fallback)
    }

    fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    fn fallback_color(&self) -> &str {
        &self.fallback
    }
}

fn check_lengths(keys: usize, colors: usize, labels: usize) -> Result<()> {
    if keys == 0 || keys != colors || keys != labels {
        return Err(Error::LengthMismatch {
            keys,
            colors,
            labels,
        });
    }
    Ok(())
}

fn zip_legend(colors: Vec<String>, labels: Vec<String>) -> Vec<LegendEntry> {
    colors
        .into_iter()
        .zip(labels)
        .map(|(color, label)| LegendEntry { color, label })
        .collect()
}
