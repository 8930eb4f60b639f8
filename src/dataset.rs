//! Input dataset contract.
//!
//! The upstream pipeline delivers a JSON collection of regions, each with an
//! opaque geometry and one precomputed travel time per destination category,
//! plus map-level metadata for the (external) rendering setup. Geometry is
//! never interpreted here, only carried.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::Effective;
use crate::error::{Error, Result};

/// One mapped geographic unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    id: String,
    /// GeoJSON geometry, opaque to this crate.
    #[serde(default)]
    geometry: serde_json::Value,
    /// Travel time in minutes per destination category key.
    minutes: HashMap<String, f64>,
    /// Derived display value; recomputed on every selection change, never
    /// part of the dataset itself.
    #[serde(skip)]
    pub effective: Effective,
}

impl Region {
    pub fn new<I, S>(id: impl Into<String>, minutes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            geometry: serde_json::Value::Null,
            minutes: minutes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            effective: Effective::NoSelection,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> &serde_json::Value {
        &self.geometry
    }

    /// Travel time to the nearest destination of `category`, if present.
    pub fn minutes_to(&self, category: &str) -> Option<f64> {
        self.minutes.get(category).copied()
    }
}

/// Map-level metadata consumed by the rendering setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapMetadata {
    /// Initial center as `[lat, lon]`.
    pub center: [f64; 2],
    pub zoom: u8,
    /// Bounding box as `[[south, west], [north, east]]`.
    pub bounds: [[f64; 2]; 2],
}

/// The full dataset: metadata plus all regions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCollection {
    metadata: MapMetadata,
    regions: Vec<Region>,
}

impl RegionCollection {
    /// Decode a dataset from JSON and validate it. Travel times must be
    /// non-negative; a negative entry is an upstream data error.
    pub fn from_json(json: &str) -> Result<Self> {
        let collection: RegionCollection = serde_json::from_str(json)?;
        for region in &collection.regions {
            for (category, minutes) in &region.minutes {
                if *minutes < 0. {
                    return Err(Error::NegativeMinutes {
                        region: region.id.clone(),
                        category: category.clone(),
                        minutes: *minutes,
                    });
                }
            }
        }
        Ok(collection)
    }

    pub fn metadata(&self) -> &MapMetadata {
        &self.metadata
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Mutable access for aggregation passes.
    pub fn regions_mut(&mut self) -> &mut [Region] {
        &mut self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "metadata": {
            "center": [47.6062, -122.3321],
            "zoom": 12,
            "bounds": [[47.49, -122.46], [47.73, -122.22]]
        },
        "regions": [
            {
                "id": "tract-1",
                "geometry": {"type": "Polygon", "coordinates": []},
                "minutes": {"groceries": 4.0, "parks": 12.0}
            },
            {
                "id": "tract-2",
                "minutes": {"groceries": 8.5, "parks": 3.0}
            }
        ]
    }"#;

    #[test]
    fn loads_regions_and_metadata() {
        let collection = RegionCollection::from_json(DATASET).unwrap();
        assert_eq!(collection.regions().len(), 2);
        assert_eq!(collection.metadata().zoom, 12);
        let tract = &collection.regions()[0];
        assert_eq!(tract.id(), "tract-1");
        assert_eq!(tract.minutes_to("parks"), Some(12.));
        assert_eq!(tract.minutes_to("cafes"), None);
    }

    #[test]
    fn effective_defaults_to_no_selection() {
        let collection = RegionCollection::from_json(DATASET).unwrap();
        for region in collection.regions() {
            assert_eq!(region.effective, Effective::NoSelection);
        }
    }

    #[test]
    fn missing_geometry_is_null() {
        let collection = RegionCollection::from_json(DATASET).unwrap();
        assert!(collection.regions()[1].geometry().is_null());
        assert!(collection.regions()[0].geometry().is_object());
    }

    #[test]
    fn negative_minutes_are_rejected() {
        let json = r#"{
            "metadata": {"center": [0, 0], "zoom": 1, "bounds": [[0, 0], [1, 1]]},
            "regions": [{"id": "t", "minutes": {"parks": -1.0}}]
        }"#;
        let err = RegionCollection::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeMinutes { region, category, minutes }
                if region == "t" && category == "parks" && minutes == -1.
        ));
    }

    #[test]
    fn malformed_json_is_a_dataset_error() {
        assert!(matches!(
            RegionCollection::from_json("{").unwrap_err(),
            Error::Dataset(_)
        ));
    }
}
