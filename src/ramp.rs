//! Perceptual color ramps.
//!
//! Threshold scales need one color per bucket; when those are not listed by
//! hand they are sampled from a [`Ramp`] between two endpoint colors. The
//! interpolation runs in CIE L*C*h, which keeps the lightness progression
//! even across the ramp, rather than in raw RGB.

use std::f64::consts::PI;

use rgb::RGB8;

use crate::error::{Error, Result};

const TWO_PI: f64 = 2. * PI;
const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;

/// Parse a CSS hex color (`#rgb` or `#rrggbb`) into an [`RGB8`].
pub fn parse_hex(s: &str) -> Result<RGB8> {
    let bad = || Error::InvalidColor(s.to_owned());
    let hex = s.strip_prefix('#').ok_or_else(bad)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    match hex.len() {
        3 => {
            let d = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).unwrap();
            // #abc is shorthand for #aabbcc
            Ok(RGB8::new(d(0) * 17, d(1) * 17, d(2) * 17))
        }
        6 => {
            let d = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap();
            Ok(RGB8::new(d(0), d(2), d(4)))
        }
        _ => Err(bad()),
    }
}

/// Format an [`RGB8`] as a lowercase `#rrggbb` string.
pub fn to_hex(c: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

/// A color in CIE L*C*h (L*a*b* with polar chroma/hue), D50 white point.
#[derive(Clone, Copy)]
struct Lch {
    l: f64,
    c: f64,
    h: f64,
}

impl Lch {
    fn from_rgb(c: RGB8) -> Lch {
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let (r, g, b) = (c.r as f64, c.g as f64, c.b as f64);
        let xr = 0.4522795 * r + 0.3993744 * g + 0.1483460 * b;
        let yr = 0.2225105 * r + 0.7168863 * g + 0.0606032 * b;
        let zr = 0.0168820 * r + 0.1176865 * g + 0.8654315 * b;
        let fx = if xr > EPS { xr.powf(C0) } else { C1 * xr + C2 };
        let fy = if yr > EPS { yr.powf(C0) } else { C1 * yr + C2 };
        let fz = if zr > EPS { zr.powf(C0) } else { C1 * zr + C2 };
        let l = 116. * fy - 16.;
        let a = 500. * (fx - fy);
        let b = 200. * (fy - fz);
        let h = {
            let h = b.atan2(a);
            if h < 0. {
                h + TWO_PI
            } else {
                h
            }
        };
        Lch { l, c: a.hypot(b), h }
    }

    fn to_rgb(self) -> RGB8 {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let a = self.c * self.h.cos();
        let b = self.c * self.h.sin();
        let fy = (self.l + 16.) / 116.;
        let fx = a / 500. + fy;
        let fz = fy - b / 200.;
        let fx1 = if fx > EPS0 { fx * fx * fx } else { C0 * (fx - C1) };
        let fy1 = if fy > EPS0 { fy * fy * fy } else { C0 * (fy - C1) };
        let fz1 = if fz > EPS0 { fz * fz * fz } else { C0 * (fz - C1) };
        let r = 3.0215932 * fx1 - 1.6168777 * fy1 - 0.4047152 * fz1;
        let g = -0.9437222 * fx1 + 1.9161365 * fy1 + 0.0275856 * fz1;
        let b = 0.0693906 * fx1 - 0.2290271 * fy1 + 1.1596365 * fz1;
        RGB8::new(
            r.clamp(0., 255.).round() as u8,
            g.clamp(0., 255.).round() as u8,
            b.clamp(0., 255.).round() as u8,
        )
    }
}

/// An L*C*h interpolation between two endpoint colors.
pub struct Ramp {
    c0: Lch,
    dc: Lch, // end minus start, hue on the short arc
}

impl Ramp {
    /// Ramp from `start` to `end`, taking the shorter way around the hue
    /// circle.
    pub fn between(start: RGB8, end: RGB8) -> Self {
        let lch0 = Lch::from_rgb(start);
        let lch1 = Lch::from_rgb(end);
        let (h0, h1) = (lch0.h, lch1.h);
        let dh = if h1 > h0 && h1 - h0 > PI {
            h1 - (h0 + TWO_PI)
        } else if h1 < h0 && h0 - h1 > PI {
            h1 + TWO_PI - h0
        } else {
            h1 - h0
        };
        Ramp {
            c0: lch0,
            dc: Lch {
                l: lch1.l - lch0.l,
                c: lch1.c - lch0.c,
                h: dh,
            },
        }
    }

    /// Color at `t` ∈ \[0, 1\]; `t` is clamped.
    pub fn at(&self, t: f64) -> RGB8 {
        let t = t.clamp(0., 1.);
        Lch {
            l: self.c0.l + t * self.dc.l,
            c: self.c0.c + t * self.dc.c,
            h: self.c0.h + t * self.dc.h,
        }
        .to_rgb()
    }

    /// `n` evenly spaced samples, endpoints included, as hex strings.
    /// `n == 1` yields just the start color.
    pub fn hex_colors(&self, n: usize) -> Vec<String> {
        match n {
            0 => Vec::new(),
            1 => vec![to_hex(self.at(0.))],
            _ => (0..n)
                .map(|i| to_hex(self.at(i as f64 / (n - 1) as f64)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        for s in ["#ffeda0", "#800026", "#000000", "#ffffff"] {
            assert_eq!(to_hex(parse_hex(s).unwrap()), s);
        }
    }

    #[test]
    fn hex_shorthand() {
        assert_eq!(parse_hex("#888").unwrap(), RGB8::new(136, 136, 136));
        assert_eq!(parse_hex("#f00").unwrap(), RGB8::new(255, 0, 0));
    }

    #[test]
    fn hex_rejects_malformed() {
        for s in ["888", "#88", "#8888", "#gggggg", "#1234567", ""] {
            assert!(parse_hex(s).is_err(), "{s:?} should not parse");
        }
    }

    #[test]
    fn ramp_endpoints_roundtrip() {
        let start = RGB8::new(255, 237, 160);
        let end = RGB8::new(128, 0, 38);
        let ramp = Ramp::between(start, end);
        assert_eq!(ramp.at(0.), start);
        assert_eq!(ramp.at(1.), end);
        // Out-of-range positions clamp to the endpoints.
        assert_eq!(ramp.at(-0.5), start);
        assert_eq!(ramp.at(1.5), end);
    }

    #[test]
    fn ramp_sampling_counts() {
        let ramp = Ramp::between(RGB8::new(255, 255, 178), RGB8::new(177, 0, 38));
        assert!(ramp.hex_colors(0).is_empty());
        assert_eq!(ramp.hex_colors(1).len(), 1);
        let seven = ramp.hex_colors(7);
        assert_eq!(seven.len(), 7);
        assert_eq!(seven[0], "#ffffb2");
        assert_eq!(seven[6], "#b10026");
    }
}
