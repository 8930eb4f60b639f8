//! Choropleth styling core.
//!
//! The reusable logic behind an interactive travel-time choropleth map:
//!
//! - [`ThresholdScale`] / [`CategoryScale`]: classify an attribute value
//!   into a fill color, with an ordered legend.
//! - [`TravelTimeAggregator`]: derive one display value per region from the
//!   user-selected subset of destination categories.
//! - [`DetailFormatter`]: clamp-and-round formatting for the hover panel.
//! - [`ramp::Ramp`] and [`palettes`]: where the bucket colors come from.
//!
//! Rendering (tiles, SVG, DOM events) stays in the mapping library; this
//! crate only turns data into colors and strings.
//!
//! ```
//! use choroplet::{Category, ThresholdScale, TravelTimeAggregator};
//!
//! let scale = ThresholdScale::new(
//!     vec![0., 5., 10., 15., 20., 25., 30.],
//!     choroplet::palettes::TRAVEL_TIME.iter().map(|s| s.to_string()).collect(),
//!     ["<5", "5-10", "10-15", "15-20", "20-25", "25-30", ">30"]
//!         .map(String::from).to_vec(),
//! )?;
//!
//! let mut aggregator = TravelTimeAggregator::new(vec![
//!     Category::new("groceries", "Groceries"),
//!     Category::new("parks", "Parks"),
//! ])?;
//! aggregator.toggle("parks")?;
//!
//! let region = choroplet::Region::new("tract-1", [("groceries", 4.), ("parks", 12.)]);
//! let effective = aggregator.recompute(&region)?;
//! let fill = scale.color_for_effective(&effective);
//! assert_eq!(fill, "#feb24c");
//! # Ok::<(), choroplet::Error>(())
//! ```

mod aggregate;
mod dataset;
mod error;
mod format;
pub mod palettes;
pub mod ramp;
mod scheme;

pub use aggregate::{Category, Effective, TravelTimeAggregator, DEFAULT_SENTINEL_MINUTES};
pub use dataset::{MapMetadata, Region, RegionCollection};
pub use error::{Error, Result};
pub use format::DetailFormatter;
pub use scheme::{CategoryScale, ColorScale, LegendEntry, ThresholdScale, DEFAULT_FALLBACK};
