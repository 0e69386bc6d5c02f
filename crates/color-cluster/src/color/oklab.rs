//! Oklab perceptual color space
//!
//! Oklab is a perceptual color space designed for uniform color perception.
//! Clustering measures all neighborhood distances here so that one radius
//! behaves consistently across the whole gamut.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::rgb::Rgb;

/// A color in Oklab perceptual color space.
///
/// Oklab provides perceptually uniform distances - equal numerical
/// differences correspond to equal perceived differences. That property is
/// what makes a single clustering radius meaningful for dark and light
/// regions alike.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 1.0 = white for in-gamut colors)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// Conversion from [`Rgb`] is one-way. Grouping results always refer back
/// to the original Rgb values, so the inverse transform is never needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness: 0.0 (black) to 1.0 (white) for in-gamut colors
    pub l: f32,
    /// Green-red axis: typically -0.5 to 0.5
    pub a: f32,
    /// Blue-yellow axis: typically -0.5 to 0.5
    pub b: f32,
}

impl Oklab {
    /// Create a new Oklab color.
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Squared Euclidean distance in Oklab space (perceptual distance metric).
    ///
    /// Use squared distance to avoid sqrt when comparing distances.
    /// For actual distance, take the square root of this result.
    ///
    /// # Example
    ///
    /// ```
    /// use color_cluster::Oklab;
    ///
    /// let white = Oklab::new(1.0, 0.0, 0.0);
    /// let black = Oklab::new(0.0, 0.0, 0.0);
    /// let gray = Oklab::new(0.5, 0.0, 0.0);
    ///
    /// // Gray is equidistant from black and white
    /// let d_to_black = gray.distance_squared(black);
    /// let d_to_white = gray.distance_squared(white);
    /// assert!((d_to_black - d_to_white).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Euclidean distance in Oklab space.
    ///
    /// Clustering radii are specified as plain distances, so this is the
    /// form DBSCAN compares against its epsilon.
    #[inline]
    pub fn distance(self, other: Oklab) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

/// Decode one 8-bit sRGB channel to linear light.
///
/// Piecewise transfer function from IEC 61966-2-1.
#[inline]
fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl From<Rgb> for Oklab {
    /// Convert an 8-bit sRGB color to Oklab.
    ///
    /// Gamma-decodes each channel to linear light, then applies the
    /// updated 2021-01-25 matrices from Björn Ottosson.
    ///
    /// # Example
    ///
    /// ```
    /// use color_cluster::{Oklab, Rgb};
    ///
    /// let gray = Oklab::from(Rgb::new(128, 128, 128));
    /// // Gray has near-zero a and b (no chroma)
    /// assert!(gray.a.abs() < 0.001);
    /// assert!(gray.b.abs() < 0.001);
    /// ```
    fn from(rgb: Rgb) -> Self {
        let r = srgb_to_linear(rgb.r);
        let g = srgb_to_linear(rgb.g);
        let b = srgb_to_linear(rgb.b);

        // Step 1: Linear sRGB to LMS (M1 matrix)
        let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
        let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
        let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

        // Step 2: Cube root (nonlinearity)
        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // Step 3: LMS to Lab (M2 matrix)
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}
