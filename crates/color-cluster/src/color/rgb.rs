//! 8-bit RGB color type
//!
//! The wire format of the whole system: image pixels come in as `Rgb`,
//! grouped colors go out as `Rgb`, and live-screen verification compares
//! `Rgb` values. Equality is exact; similarity is a separate
//! tolerance-based relation.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColorError;

/// An 8-bit RGB color.
///
/// Immutable value type. `==` is exact tuple equality; use
/// [`Rgb::within_tolerance`] for the tolerance-based relation that drives
/// pixel matching and draw verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a new Rgb color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an Rgb color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Tolerance-based similarity: true iff every channel differs by at
    /// most `tolerance` (a per-channel Chebyshev bound, not Euclidean
    /// distance). Tolerance 0 degenerates to exact equality.
    ///
    /// The relation is symmetric and reflexive. The same predicate is used
    /// both when locating target pixels in a chunk and when verifying a
    /// freshly drawn pixel against the selected palette, so its exact
    /// shape matters.
    ///
    /// # Example
    ///
    /// ```
    /// use color_cluster::Rgb;
    ///
    /// let target = Rgb::new(200, 100, 50);
    /// assert!(target.within_tolerance(Rgb::new(205, 95, 55), 10));
    /// assert!(!target.within_tolerance(Rgb::new(212, 100, 50), 10));
    /// ```
    #[inline]
    pub fn within_tolerance(self, other: Rgb, tolerance: u8) -> bool {
        let t = i16::from(tolerance);
        (i16::from(self.r) - i16::from(other.r)).abs() <= t
            && (i16::from(self.g) - i16::from(other.g)).abs() <= t
            && (i16::from(self.b) - i16::from(other.b)).abs() <= t
    }

    /// Sum of the three channels (0..=765).
    ///
    /// Used as the darkest-to-lightest sort key when presenting a group's
    /// unique colors.
    #[inline]
    pub fn channel_sum(self) -> u16 {
        u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
    }
}

impl fmt::Display for Rgb {
    /// Format as `#RRGGBB` (uppercase hex).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color string.
    ///
    /// Accepts `RRGGBB` and the CSS shorthand `RGB`, each with or without
    /// a leading `#`. Case does not matter and surrounding whitespace is
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let width = match hex.len() {
            3 => 1,
            6 => 2,
            _ => return Err(ParseColorError::InvalidLength),
        };
        let channel = |i: usize| -> Result<u8, ParseColorError> {
            let digits = hex
                .get(i * width..(i + 1) * width)
                .ok_or(ParseColorError::InvalidLength)?;
            let v = u8::from_str_radix(digits, 16)?;
            // A single shorthand digit stands for both nibbles, so "A"
            // reads as 0xAA
            Ok(if width == 1 { v * 0x11 } else { v })
        };
        Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_tolerance_is_exact_equality() {
        let a = Rgb::new(10, 20, 30);
        assert!(a.within_tolerance(a, 0));
        assert!(!a.within_tolerance(Rgb::new(10, 20, 31), 0));
        assert!(!a.within_tolerance(Rgb::new(11, 20, 30), 0));
    }

    #[test]
    fn test_tolerance_bounds_each_channel_independently() {
        let target = Rgb::new(200, 100, 50);

        // Every channel within 10
        assert!(target.within_tolerance(Rgb::new(205, 95, 55), 10));
        // Exactly at the bound
        assert!(target.within_tolerance(Rgb::new(210, 90, 60), 10));
        // One channel over the bound fails even though the others match exactly
        assert!(!target.within_tolerance(Rgb::new(212, 100, 50), 10));
        assert!(!target.within_tolerance(Rgb::new(200, 111, 50), 10));
    }

    #[test]
    fn test_similarity_is_symmetric_and_reflexive() {
        let pairs = [
            (Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)),
            (Rgb::new(200, 100, 50), Rgb::new(205, 95, 55)),
            (Rgb::new(128, 128, 128), Rgb::new(130, 126, 129)),
        ];
        for tolerance in [0u8, 3, 10, 50, 255] {
            for (a, b) in pairs {
                assert_eq!(
                    a.within_tolerance(b, tolerance),
                    b.within_tolerance(a, tolerance),
                    "similarity must be symmetric for {a} vs {b} at tolerance {tolerance}"
                );
                assert!(a.within_tolerance(a, tolerance));
                assert!(b.within_tolerance(b, tolerance));
            }
        }
    }

    #[test]
    fn test_saturated_channels_do_not_wrap() {
        // i16 arithmetic must not wrap around at the u8 boundaries
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        assert!(!black.within_tolerance(white, 254));
        assert!(black.within_tolerance(white, 255));
    }

    #[test]
    fn test_channel_sum_orders_dark_to_light() {
        let dark = Rgb::new(10, 10, 10);
        let mid = Rgb::new(100, 80, 120);
        let light = Rgb::new(250, 250, 250);
        assert!(dark.channel_sum() < mid.channel_sum());
        assert!(mid.channel_sum() < light.channel_sum());
        assert_eq!(Rgb::new(255, 255, 255).channel_sum(), 765);
    }

    #[test]
    fn test_hex_parsing_6digit() {
        let white: Rgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Rgb::new(255, 255, 255));

        let red: Rgb = "FF0000".parse().unwrap();
        assert_eq!(red, Rgb::new(255, 0, 0));

        let mixed: Rgb = "  #1a2B3c  ".parse().unwrap();
        assert_eq!(mixed, Rgb::new(0x1A, 0x2B, 0x3C));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        let color: Rgb = "#ABC".parse().unwrap();
        assert_eq!(color, Rgb::new(0xAA, 0xBB, 0xCC));

        let red: Rgb = "f00".parse().unwrap();
        assert_eq!(red, Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!(
            "".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        // Only a single leading hash is allowed
        assert!("##FFF".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let color = Rgb::new(0x0F, 0xA0, 0x7E);
        assert_eq!(color.to_string(), "#0FA07E");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }
}
