//! RGB color math for cell coloring and neighbor averaging.
//!
//! Cells store their color as a `#rrggbb` hex string; the simulation only
//! needs RGB triples transiently, while averaging the colors of a newborn
//! cell's parents. Decoding is deliberately forgiving: a malformed string
//! degrades to black instead of failing, so one corrupt cell can never
//! halt a tick.
//!
//! [`random_color`] generates the bright per-session and per-injection
//! colors. It picks a random hue at fixed saturation and value, which
//! keeps colors distinguishable on the dark viewer canvas (plain uniform
//! RGB skews muddy).

use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Fixed saturation for generated colors (0..=255 scale).
const SATURATION: u32 = 190;

/// Fixed value (brightness) for generated colors (0..=255 scale).
const VALUE: u32 = 230;

/// An RGB triple used transiently during neighbor averaging.
///
/// Not persisted per cell; cells store only the hex string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black, the fallback for malformed hex strings and empty averages.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Decode a `#rrggbb` or `rrggbb` hex string (case-insensitive).
    ///
    /// Malformed input returns [`Self::BLACK`] rather than an error. The
    /// cell invariant guarantees valid colors, so this path should never
    /// be taken; if it is, a zero contribution to the average is the
    /// least disruptive outcome.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Self::BLACK;
        }
        let channel = |lo: usize, hi: usize| {
            digits
                .get(lo..hi)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        };
        match (channel(0, 2), channel(2, 4), channel(4, 6)) {
            (Some(r), Some(g), Some(b)) => Self { r, g, b },
            _ => Self::BLACK,
        }
    }

    /// Encode as a lowercase `#rrggbb` string, zero-padded per channel.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accumulates RGB sums over a set of neighbor cells and produces the
/// floor-averaged color.
///
/// Channel sums use `u32` so the maximum possible sum (8 neighbors at 255)
/// is nowhere near overflow; saturating adds keep the type honest anyway.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorAccumulator {
    /// Running red sum.
    r: u32,
    /// Running green sum.
    g: u32,
    /// Running blue sum.
    b: u32,
    /// Number of colors accumulated.
    count: u32,
}

impl ColorAccumulator {
    /// Create an empty accumulator.
    pub const fn new() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            count: 0,
        }
    }

    /// Add one color to the running sums.
    pub fn add(&mut self, rgb: Rgb) {
        self.r = self.r.saturating_add(u32::from(rgb.r));
        self.g = self.g.saturating_add(u32::from(rgb.g));
        self.b = self.b.saturating_add(u32::from(rgb.b));
        self.count = self.count.saturating_add(1);
    }

    /// Number of colors accumulated so far.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// The floor-averaged color over everything accumulated.
    ///
    /// Returns [`Rgb::BLACK`] when nothing was accumulated; the average is
    /// meaningless at count zero and callers must ignore it (no birth
    /// happens without live neighbors).
    pub fn average(&self) -> Rgb {
        if self.count == 0 {
            return Rgb::BLACK;
        }
        let channel = |sum: u32| u8::try_from(sum.wrapping_div(self.count)).unwrap_or(u8::MAX);
        Rgb {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }
}

/// Generate a bright random color as a `#rrggbb` string.
///
/// Picks a uniform random hue and converts from HSV at fixed saturation
/// and value (integer arithmetic throughout). Used for the per-session
/// color assigned on connect and the color of periodically injected
/// patterns.
pub fn random_color(rng: &mut impl Rng) -> String {
    let hue: u32 = rng.random_range(0..360);
    hsv_to_rgb(hue, SATURATION, VALUE).to_hex()
}

/// Convert an HSV color (hue in degrees, saturation and value on a
/// 0..=255 scale) to RGB using integer arithmetic.
fn hsv_to_rgb(hue: u32, saturation: u32, value: u32) -> Rgb {
    // Chroma and the intermediate channel, both on the 0..=255 scale.
    let chroma = value.saturating_mul(saturation).wrapping_div(255);
    let within = hue.wrapping_rem(120);
    let distance = within.abs_diff(60);
    let x = chroma.saturating_mul(60_u32.saturating_sub(distance)).wrapping_div(60);
    let floor = value.saturating_sub(chroma);

    let (r, g, b) = match hue.wrapping_div(60) {
        0 => (chroma, x, 0),
        1 => (x, chroma, 0),
        2 => (0, chroma, x),
        3 => (0, x, chroma),
        4 => (x, 0, chroma),
        _ => (chroma, 0, x),
    };

    let channel = |c: u32| u8::try_from(c.saturating_add(floor)).unwrap_or(u8::MAX);
    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn decodes_with_and_without_hash() {
        let with = Rgb::from_hex("#1a2b3c");
        let without = Rgb::from_hex("1a2b3c");
        assert_eq!(with, Rgb { r: 26, g: 43, b: 60 });
        assert_eq!(with, without);
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(Rgb::from_hex("#FF00aA"), Rgb { r: 255, g: 0, b: 170 });
    }

    #[test]
    fn malformed_hex_degrades_to_black() {
        assert_eq!(Rgb::from_hex(""), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#fff"), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#gggggg"), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("not a color"), Rgb::BLACK);
    }

    #[test]
    fn encode_pads_and_lowercases() {
        let rgb = Rgb { r: 1, g: 0, b: 255 };
        assert_eq!(rgb.to_hex(), "#0100ff");
    }

    #[test]
    fn hex_round_trip() {
        let rgb = Rgb { r: 12, g: 200, b: 99 };
        assert_eq!(Rgb::from_hex(&rgb.to_hex()), rgb);
    }

    #[test]
    fn average_floors_each_channel() {
        let mut acc = ColorAccumulator::new();
        acc.add(Rgb { r: 10, g: 0, b: 255 });
        acc.add(Rgb { r: 11, g: 1, b: 255 });
        acc.add(Rgb { r: 12, g: 2, b: 254 });
        assert_eq!(acc.count(), 3);
        // 33/3=11, 3/3=1, 764/3=254 (floor)
        assert_eq!(acc.average(), Rgb { r: 11, g: 1, b: 254 });
    }

    #[test]
    fn empty_average_is_black() {
        let acc = ColorAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert_eq!(acc.average(), Rgb::BLACK);
    }

    #[test]
    fn random_color_is_valid_hex() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let color = random_color(&mut rng);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            // Round-trips exactly, so every digit is valid hex.
            assert_eq!(Rgb::from_hex(&color).to_hex(), color);
        }
    }

    #[test]
    fn random_color_is_bright() {
        // At fixed value 230, the brightest channel is always 230.
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            let rgb = Rgb::from_hex(&random_color(&mut rng));
            let max = rgb.r.max(rgb.g).max(rgb.b);
            assert_eq!(max, 230);
        }
    }

    #[test]
    fn hsv_primary_hues() {
        assert_eq!(hsv_to_rgb(0, 255, 255), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(hsv_to_rgb(120, 255, 255), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(hsv_to_rgb(240, 255, 255), Rgb { r: 0, g: 0, b: 255 });
    }
}
