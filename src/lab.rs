use std::sync::LazyLock;

use image::Rgb;

/// D65 reference white used to normalise XYZ before the Lab transform.
const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;

const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 7.787;

/// Linear-light value for every 8-bit sRGB channel value.
static LINEAR: LazyLock<[f64; 256]> = LazyLock::new(|| {
    let mut table = [0.0; 256];
    for (value, slot) in table.iter_mut().enumerate() {
        *slot = srgb_to_linear(value as u8);
    }
    table
});

/// A color in CIE L*a*b* space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Lightness, 0 for black to 100 for the reference white.
    pub l: f64,
    /// Green (negative) to red (positive) axis.
    pub a: f64,
    /// Blue (negative) to yellow (positive) axis.
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(&self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

impl From<Rgb<u8>> for Lab {
    fn from(rgb: Rgb<u8>) -> Self {
        to_lab(rgb)
    }
}

/// Expand one gamma-encoded sRGB channel to linear light.
#[inline]
fn srgb_to_linear(value: u8) -> f64 {
    let c = f64::from(value) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        LAB_KAPPA * t + 16.0 / 116.0
    }
}

/// Convert an sRGB color to CIE L*a*b* (D65).
pub fn to_lab(rgb: Rgb<u8>) -> Lab {
    let Rgb([r, g, b]) = rgb;
    let table = &*LINEAR;
    let (r, g, b) = (table[r as usize], table[g as usize], table[b as usize]);

    let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / WHITE_X;
    let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) / WHITE_Y;
    let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / WHITE_Z;

    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}
