use image::{Rgb, RgbaImage};

use crate::BackdropResult;

/// A collection of traced shapes, each carrying one representative color.
pub trait ShapeSet {
    /// Shape colors in trace order, duplicates included.
    fn colors(&self) -> Vec<Rgb<u8>>;

    /// Keep only the shapes whose color satisfies `keep`, returning how many were dropped.
    fn retain_colors<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(Rgb<u8>) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A trait representing an algorithm that approximates an image with colored shapes.
pub trait ShapeTracer {
    type Options;
    type Output: ShapeSet;

    fn trace(&self, image: &RgbaImage, options: &Self::Options) -> BackdropResult<Self::Output>;
}

/// Take up to `limit` shape colors, in trace order, as search samples.
pub fn sample_colors<S>(shapes: &S, limit: Option<usize>) -> Vec<Rgb<u8>>
where
    S: ShapeSet,
{
    let mut colors = shapes.colors();
    if let Some(limit) = limit {
        colors.truncate(limit);
    }
    colors
}

#[cfg(feature = "tracer-vtracer")]
pub mod vtracer;
