//! Built-in palettes.
//!
//! Two palettes cover the common choropleth setups: a sequential ramp for
//! minute-bucketed travel times (light for short, dark red for long) and a
//! qualitative set for destination categories.

use lazy_static::lazy_static;
use rgb::RGB8;

use crate::ramp::parse_hex;

/// 7-class sequential yellow→red ramp (Brewer YlOrRd), one color per
/// travel-time bucket.
pub const TRAVEL_TIME: &[&str] = &[
    "#ffffb2", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#b10026",
];

/// 8-class qualitative palette (Brewer Set2) for destination categories.
pub const CATEGORIES: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac9", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

lazy_static! {
    /// [`TRAVEL_TIME`] parsed to RGB, for use with [`crate::ramp::Ramp`].
    pub static ref TRAVEL_TIME_RGB: Vec<RGB8> = TRAVEL_TIME
        .iter()
        .map(|s| parse_hex(s).expect("built-in palette entry"))
        .collect();

    /// [`CATEGORIES`] parsed to RGB.
    pub static ref CATEGORIES_RGB: Vec<RGB8> = CATEGORIES
        .iter()
        .map(|s| parse_hex(s).expect("built-in palette entry"))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::to_hex;

    #[test]
    fn palettes_parse() {
        assert_eq!(TRAVEL_TIME_RGB.len(), TRAVEL_TIME.len());
        assert_eq!(CATEGORIES_RGB.len(), CATEGORIES.len());
        for (hex, rgb) in TRAVEL_TIME.iter().zip(TRAVEL_TIME_RGB.iter()) {
            assert_eq!(to_hex(*rgb), *hex);
        }
    }
}
