pub mod color;
pub mod config;
pub mod distance;
pub mod error;
pub mod fill;
pub mod lab;
pub mod search;
pub mod tracer;

pub use color::{parse_rgb, to_hex};
pub use config::{SearchOptions, SearchStrategy};
pub use distance::{KEEP_MARGIN, distance, is_distinct, lab_distance};
pub use error::{BackdropError, BackdropResult};
pub use fill::fill_background;
pub use lab::{Lab, to_lab};
pub use search::{DistinctColorSearch, SearchOutcome, counter_to_rgb, rgb_to_counter, search};
pub use tracer::{ShapeSet, ShapeTracer, sample_colors};
#[cfg(feature = "tracer-vtracer")]
pub use tracer::vtracer::{TraceOptions, VtracerShapeTracer};

use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbaImage};
use tracing::{debug, info};

use crate::config::DEFAULT_SAMPLE_LIMIT;

/// Entry point for configuring background selection and tracing.
#[derive(Debug, Clone)]
pub struct Backdrop {
    search: DistinctColorSearch,
    /// Maximum number of traced shape colors fed to the search; `None` uses them all.
    sample_limit: Option<usize>,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            search: DistinctColorSearch::default(),
            sample_limit: Some(DEFAULT_SAMPLE_LIMIT),
        }
    }

    /// Set the search used to pick background colors.
    pub fn with_search(mut self, search: DistinctColorSearch) -> Self {
        self.search = search;
        self
    }

    /// Set how many shape colors are sampled before searching.
    pub fn with_sample_limit(mut self, sample_limit: Option<usize>) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    pub fn sample_limit(&self) -> Option<usize> {
        self.sample_limit
    }

    /// Decode the image at `path`.
    pub fn open(&self, path: impl AsRef<Path>) -> BackdropResult<SourceImage> {
        let path = path.as_ref();
        let image = image::open(path)?;
        debug!(path = %path.display(), "decoded source image");
        Ok(self.from_image(image))
    }

    /// Wrap an already decoded image.
    pub fn from_image(&self, image: DynamicImage) -> SourceImage {
        let has_alpha = image.color().has_alpha();
        SourceImage {
            rgba: Arc::new(image.into_rgba8()),
            has_alpha,
            search: self.search.clone(),
            sample_limit: self.sample_limit,
        }
    }
}

/// The background color picked for an image and the threshold it met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundChoice {
    pub color: Rgb<u8>,
    pub threshold: i32,
    /// Number of shape colors the search was run against.
    pub samples: usize,
}

impl BackgroundChoice {
    /// Whether a shape of `color` should survive over this background.
    pub fn keeps(&self, color: Rgb<u8>) -> bool {
        is_distinct(self.color, color, self.threshold)
    }
}

/// Result of tracing a source image.
#[derive(Debug, Clone)]
pub struct TraceOutcome<O> {
    /// Shapes that survived filtering.
    pub shapes: O,
    /// Background used, if the image had an alpha channel.
    pub background: Option<BackgroundChoice>,
    /// The image after the background fill, if one was applied.
    pub filled: Option<RgbaImage>,
    pub kept: usize,
    pub discarded: usize,
}

/// A decoded image ready for background selection and tracing.
#[derive(Debug, Clone)]
pub struct SourceImage {
    rgba: Arc<RgbaImage>,
    has_alpha: bool,
    search: DistinctColorSearch,
    sample_limit: Option<usize>,
}

impl SourceImage {
    /// Get a reference to the RGBA pixels.
    pub fn image(&self) -> &RgbaImage {
        self.rgba.as_ref()
    }

    /// Whether the decoded image carried an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// Trace the image once and search a color distinct from the traced shape colors.
    pub fn choose_background<T>(
        &self,
        tracer: &T,
        options: &T::Options,
    ) -> BackdropResult<BackgroundChoice>
    where
        T: ShapeTracer,
    {
        let shapes = tracer.trace(self.rgba.as_ref(), options)?;
        let samples = sample_colors(&shapes, self.sample_limit);
        debug!(
            shapes = shapes.len(),
            samples = samples.len(),
            "sampled shape colors"
        );

        let outcome = self.search.run(&samples);
        info!(
            color = %to_hex(outcome.color),
            threshold = outcome.threshold,
            "chose background color"
        );
        Ok(BackgroundChoice {
            color: outcome.color,
            threshold: outcome.threshold,
            samples: samples.len(),
        })
    }

    /// The image drawn over an opaque fill of the chosen background color.
    pub fn filled(&self, choice: &BackgroundChoice) -> RgbaImage {
        fill_background(self.rgba.as_ref(), choice.color)
    }

    /// Trace the image into shapes.
    ///
    /// Images with an alpha channel get a distinct background first; shapes too
    /// close to that background are dropped from the output. Opaque images are
    /// traced as they are and keep every shape.
    pub fn trace<T>(&self, tracer: &T, options: &T::Options) -> BackdropResult<TraceOutcome<T::Output>>
    where
        T: ShapeTracer,
    {
        if !self.has_alpha {
            let shapes = tracer.trace(self.rgba.as_ref(), options)?;
            let kept = shapes.len();
            return Ok(TraceOutcome {
                shapes,
                background: None,
                filled: None,
                kept,
                discarded: 0,
            });
        }

        let choice = self.choose_background(tracer, options)?;
        let filled = self.filled(&choice);
        let mut shapes = tracer.trace(&filled, options)?;
        let discarded = shapes.retain_colors(|color| choice.keeps(color));
        let kept = shapes.len();
        info!(kept, discarded, "filtered shapes against background");

        Ok(TraceOutcome {
            shapes,
            background: Some(choice),
            filled: Some(filled),
            kept,
            discarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbImage};

    /// Treats every distinct opaque pixel color, in scan order, as one shape.
    struct PixelTracer;

    #[derive(Debug)]
    struct PixelShapes(Vec<Rgb<u8>>);

    impl ShapeSet for PixelShapes {
        fn colors(&self) -> Vec<Rgb<u8>> {
            self.0.clone()
        }

        fn retain_colors<F>(&mut self, mut keep: F) -> usize
        where
            F: FnMut(Rgb<u8>) -> bool,
        {
            let before = self.0.len();
            self.0.retain(|&c| keep(c));
            before - self.0.len()
        }

        fn len(&self) -> usize {
            self.0.len()
        }
    }

    impl ShapeTracer for PixelTracer {
        type Options = ();
        type Output = PixelShapes;

        fn trace(&self, image: &RgbaImage, _options: &()) -> BackdropResult<PixelShapes> {
            let mut colors: Vec<Rgb<u8>> = Vec::new();
            for px in image.pixels().filter(|px| px[3] == 255) {
                let color = Rgb([px[0], px[1], px[2]]);
                if !colors.contains(&color) {
                    colors.push(color);
                }
            }
            Ok(PixelShapes(colors))
        }
    }

    /// Left half opaque `left`, right half fully transparent.
    fn half_transparent(left: [u8; 3]) -> DynamicImage {
        let image = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([left[0], left[1], left[2], 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        DynamicImage::ImageRgba8(image)
    }

    #[test]
    fn opaque_image_keeps_every_shape() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([0, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([255, 255, 255]));
        let source = Backdrop::new().from_image(DynamicImage::ImageRgb8(rgb));

        assert!(!source.has_alpha());
        let outcome = source.trace(&PixelTracer, &()).unwrap();
        assert!(outcome.background.is_none());
        assert!(outcome.filled.is_none());
        assert_eq!(outcome.kept, 2);
        assert_eq!(outcome.discarded, 0);
    }

    #[test]
    fn background_chosen_against_shape_colors() {
        let source = Backdrop::new().from_image(half_transparent([0, 0, 0]));
        let choice = source.choose_background(&PixelTracer, &()).unwrap();
        assert_eq!(choice.color, Rgb([224, 0, 0]));
        assert_eq!(choice.threshold, 50);
        assert_eq!(choice.samples, 1);
    }

    #[test]
    fn background_shapes_are_filtered_out() {
        let source = Backdrop::new().from_image(half_transparent([0, 0, 0]));
        let outcome = source.trace(&PixelTracer, &()).unwrap();

        let background = outcome.background.unwrap();
        assert_eq!(background.color, Rgb([224, 0, 0]));
        assert_eq!(outcome.shapes.0, vec![Rgb([0, 0, 0])]);
        assert_eq!(outcome.kept, 1);
        assert_eq!(outcome.discarded, 1);

        let filled = outcome.filled.unwrap();
        assert_eq!(filled.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(filled.get_pixel(3, 1).0, [224, 0, 0, 255]);
    }

    #[test]
    fn sample_limit_defaults_to_500() {
        assert_eq!(Backdrop::new().sample_limit(), Some(500));
        assert_eq!(Backdrop::new().with_sample_limit(None).sample_limit(), None);
    }

    #[test]
    fn zero_sample_limit_searches_empty_set() {
        let backdrop = Backdrop::new().with_sample_limit(Some(0));
        assert_eq!(backdrop.sample_limit(), Some(0));
        let source = backdrop.from_image(half_transparent([0, 0, 0]));
        let choice = source.choose_background(&PixelTracer, &()).unwrap();
        assert_eq!(choice.color, Rgb([0, 0, 0]));
        assert_eq!(choice.samples, 0);
    }

    #[test]
    fn custom_search_is_used() {
        let search = DistinctColorSearch::new(
            SearchOptions::default().with_strategy(SearchStrategy::Parallel),
        )
        .unwrap();
        let source = Backdrop::new()
            .with_search(search)
            .from_image(half_transparent([255, 0, 0]));
        let choice = source.choose_background(&PixelTracer, &()).unwrap();
        assert_eq!(choice.color, Rgb([0, 0, 0]));
        assert_eq!(choice.threshold, 50);
    }

    #[test]
    fn filtering_is_deterministic() {
        let source = Backdrop::new().from_image(half_transparent([30, 90, 200]));
        let first = source.trace(&PixelTracer, &()).unwrap();
        let second = source.trace(&PixelTracer, &()).unwrap();
        assert_eq!(first.shapes.0, second.shapes.0);
        assert_eq!(first.background, second.background);
    }

    #[test]
    fn open_reads_png_with_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.png");
        if let DynamicImage::ImageRgba8(image) = half_transparent([10, 20, 30]) {
            image.save(&path).unwrap();
        }

        let source = Backdrop::new().open(&path).unwrap();
        assert!(source.has_alpha());
        assert_eq!(source.image().dimensions(), (4, 2));
        assert_eq!(source.image().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Backdrop::new().open(dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, BackdropError::Image(_) | BackdropError::Io(_)));
    }
}
