use image::Rgb;

use crate::lab::{Lab, to_lab};

/// Margin subtracted from the search threshold when deciding which traced shapes to keep.
pub const KEEP_MARGIN: f64 = 5.0;

const CHROMA_WEIGHT: f64 = 0.045;
const HUE_WEIGHT: f64 = 0.015;

/// Perceptual difference between two sRGB colors.
///
/// CIE94-style ΔE where the chroma and hue weights are taken from `reference`
/// only, so `distance(a, b)` and `distance(b, a)` generally differ. Callers that
/// test a candidate against samples pass the candidate first.
pub fn distance(reference: Rgb<u8>, other: Rgb<u8>) -> f64 {
    lab_distance(to_lab(reference), to_lab(other))
}

/// The same metric as [`distance`] on already converted colors.
pub fn lab_distance(reference: Lab, other: Lab) -> f64 {
    let delta_l = reference.l - other.l;
    let delta_a = reference.a - other.a;
    let delta_b = reference.b - other.b;

    let c1 = reference.chroma();
    let c2 = other.chroma();
    let delta_c = c1 - c2;

    // Cancellation can push the hue term slightly below zero.
    let delta_h_sq = delta_a * delta_a + delta_b * delta_b - delta_c * delta_c;
    let delta_h = if delta_h_sq < 0.0 {
        0.0
    } else {
        delta_h_sq.sqrt()
    };

    let sc = 1.0 + CHROMA_WEIGHT * c1;
    let sh = 1.0 + HUE_WEIGHT * c1;

    let scaled_c = delta_c / sc;
    let scaled_h = delta_h / sh;
    let sum = delta_l * delta_l + scaled_c * scaled_c + scaled_h * scaled_h;
    if sum < 0.0 { 0.0 } else { sum.sqrt() }
}

/// Whether a shape colored `color` stays visible against the `reference` background
/// picked with `threshold`.
pub fn is_distinct(reference: Rgb<u8>, color: Rgb<u8>, threshold: i32) -> bool {
    distance(reference, color) > f64::from(threshold) - KEEP_MARGIN
}
