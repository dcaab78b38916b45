use image::{Rgb, RgbaImage};
use visioncortex::PathSimplifyMode;
use vtracer::{ColorImage, ColorMode, Config, Hierarchical, SvgFile, convert};

use crate::{BackdropError, BackdropResult};

use super::{ShapeSet, ShapeTracer};

/// Knobs for VTracer's color tracing.
///
/// Tracing always runs in color mode: the background search and the shape
/// filter both read each path's fill color.
#[derive(Debug, Clone)]
pub struct TraceOptions {
    pub hierarchy: Hierarchical,
    pub simplify: PathSimplifyMode,
    /// Patches smaller than this many pixels are discarded.
    pub filter_speckle: usize,
    pub color_precision: i32,
    pub layer_difference: i32,
    pub corner_threshold: i32,
    pub length_threshold: f64,
    pub max_iterations: usize,
    pub splice_threshold: i32,
    /// Decimal places in path coordinates; `None` leaves them unrounded.
    pub path_precision: Option<u32>,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            hierarchy: Hierarchical::Stacked,
            simplify: PathSimplifyMode::Spline,
            filter_speckle: 4,
            color_precision: 6,
            layer_difference: 16,
            corner_threshold: 60,
            length_threshold: 4.0,
            max_iterations: 10,
            splice_threshold: 45,
            path_precision: Some(2),
        }
    }
}

impl From<&TraceOptions> for Config {
    fn from(options: &TraceOptions) -> Self {
        Config {
            color_mode: ColorMode::Color,
            hierarchical: options.hierarchy.clone(),
            mode: options.simplify,
            filter_speckle: options.filter_speckle,
            color_precision: options.color_precision,
            layer_difference: options.layer_difference,
            corner_threshold: options.corner_threshold,
            length_threshold: options.length_threshold,
            max_iterations: options.max_iterations,
            splice_threshold: options.splice_threshold,
            path_precision: options.path_precision,
        }
    }
}

/// VTracer-based shape tracer; every SVG path is one shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct VtracerShapeTracer;

impl ShapeTracer for VtracerShapeTracer {
    type Options = TraceOptions;
    type Output = SvgFile;

    fn trace(&self, image: &RgbaImage, options: &Self::Options) -> BackdropResult<Self::Output> {
        trace(rgba_to_color_image(image), options)
    }
}

impl ShapeSet for SvgFile {
    fn colors(&self) -> Vec<Rgb<u8>> {
        self.paths
            .iter()
            .map(|path| Rgb([path.color.r, path.color.g, path.color.b]))
            .collect()
    }

    fn retain_colors<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Rgb<u8>) -> bool,
    {
        let before = self.paths.len();
        self.paths
            .retain(|path| keep(Rgb([path.color.r, path.color.g, path.color.b])));
        before - self.paths.len()
    }

    fn len(&self) -> usize {
        self.paths.len()
    }
}

/// Copy an RGBA buffer into the pixel layout VTracer reads.
pub fn rgba_to_color_image(image: &RgbaImage) -> ColorImage {
    let (w, h) = image.dimensions();
    ColorImage {
        pixels: image.as_raw().clone(),
        width: w as usize,
        height: h as usize,
    }
}

/// Trace a ColorImage into colored SVG paths.
pub fn trace(img: ColorImage, options: &TraceOptions) -> BackdropResult<SvgFile> {
    convert(img, Config::from(options)).map_err(BackdropError::Trace)
}
