use std::path::PathBuf;

use backdrop::config::{DEFAULT_DECAY_STEP, DEFAULT_INITIAL_THRESHOLD, DEFAULT_SAMPLE_LIMIT};
use backdrop::{SearchOptions, SearchStrategy, TraceOptions, parse_rgb};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use image::Rgb;
use visioncortex::PathSimplifyMode;
use vtracer::Hierarchical;

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Threshold the background search starts from
    #[arg(
        long = "initial-threshold",
        default_value_t = DEFAULT_INITIAL_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub initial_threshold: i32,
    /// Amount the threshold drops after a pass over every color finds nothing
    #[arg(
        long = "decay-step",
        default_value_t = DEFAULT_DECAY_STEP,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    pub decay_step: i32,
    /// Split each search pass across all CPU cores
    #[arg(long)]
    pub parallel: bool,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl From<&GlobalOptions> for SearchOptions {
    fn from(global: &GlobalOptions) -> Self {
        let strategy = if global.parallel {
            SearchStrategy::Parallel
        } else {
            SearchStrategy::Sequential
        };
        SearchOptions::default()
            .with_initial_threshold(global.initial_threshold)
            .with_decay_step(global.decay_step)
            .with_strategy(strategy)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trace an image into an SVG, filling transparency with a distinct background first
    Trace(TraceCommand),
    /// Print the background color chosen for an image
    Background(BackgroundCommand),
    /// Pick a color distinct from the given colors
    Pick(PickCommand),
    /// Print the perceptual distance from one color to another
    Distance(DistanceCommand),
}

#[derive(Args, Debug)]
pub struct TraceCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output SVG path (defaults to input name with `.svg`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Save the background-filled image that was traced
    #[arg(long = "export-filled", value_name = "PATH", num_args = 0..=1)]
    pub export_filled: Option<Option<PathBuf>>,
    #[command(flatten)]
    pub sampling: SamplingArgs,
    #[command(flatten)]
    pub trace_options: TraceOptionsArgs,
}

#[derive(Args, Debug)]
pub struct BackgroundCommand {
    /// Input image path
    pub input: PathBuf,
    /// Save the image drawn over the chosen background
    #[arg(long = "export-filled", value_name = "PATH", num_args = 0..=1)]
    pub export_filled: Option<Option<PathBuf>>,
    #[command(flatten)]
    pub sampling: SamplingArgs,
    #[command(flatten)]
    pub trace_options: TraceOptionsArgs,
}

#[derive(Args, Debug)]
pub struct PickCommand {
    /// Colors to stay away from (`#rrggbb`, `rrggbb` or `r,g,b`)
    #[arg(value_parser = parse_color_arg)]
    pub colors: Vec<Rgb<u8>>,
}

#[derive(Args, Debug)]
pub struct DistanceCommand {
    /// Reference color; its chroma weights the difference
    #[arg(value_parser = parse_color_arg)]
    pub reference: Rgb<u8>,
    /// Color compared against the reference
    #[arg(value_parser = parse_color_arg)]
    pub other: Rgb<u8>,
}

fn parse_color_arg(value: &str) -> Result<Rgb<u8>, String> {
    parse_rgb(value).map_err(|err| err.to_string())
}

#[derive(Args, Debug)]
pub struct SamplingArgs {
    /// Number of traced shape colors the background must stay away from
    #[arg(
        long = "sample-limit",
        env = "BACKDROP_SAMPLE_LIMIT",
        default_value_t = DEFAULT_SAMPLE_LIMIT
    )]
    pub sample_limit: usize,
    /// Use every traced shape color as a sample
    #[arg(long = "all-samples")]
    pub all_samples: bool,
}

impl SamplingArgs {
    pub fn limit(&self) -> Option<usize> {
        if self.all_samples {
            None
        } else {
            Some(self.sample_limit)
        }
    }
}

/// How overlapping shapes are layered in the traced SVG.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ShapeLayering {
    /// Later shapes are drawn on top of earlier ones
    Stacked,
    /// Shapes are cut out of each other and never overlap
    Cutout,
}

impl From<ShapeLayering> for Hierarchical {
    fn from(value: ShapeLayering) -> Self {
        match value {
            ShapeLayering::Stacked => Hierarchical::Stacked,
            ShapeLayering::Cutout => Hierarchical::Cutout,
        }
    }
}

/// How shape outlines are simplified.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutlineCurve {
    /// Keep the raw pixel staircase
    Pixel,
    Polygon,
    Spline,
}

impl From<OutlineCurve> for PathSimplifyMode {
    fn from(value: OutlineCurve) -> Self {
        match value {
            OutlineCurve::Pixel => PathSimplifyMode::None,
            OutlineCurve::Polygon => PathSimplifyMode::Polygon,
            OutlineCurve::Spline => PathSimplifyMode::Spline,
        }
    }
}

/// Shape tracing knobs. Shapes are always traced in color, since their fill
/// colors feed the background search.
#[derive(Args, Debug)]
pub struct TraceOptionsArgs {
    /// How overlapping shapes are layered
    #[arg(long = "layering", value_enum, default_value_t = ShapeLayering::Stacked)]
    pub layering: ShapeLayering,
    /// How shape outlines are simplified
    #[arg(long = "curve", value_enum, default_value_t = OutlineCurve::Spline)]
    pub curve: OutlineCurve,
    /// Drop shapes covering fewer pixels than this
    #[arg(long = "filter-speckle", default_value_t = 4)]
    pub filter_speckle: usize,
    /// Bits kept per channel when grouping pixels into shapes
    #[arg(long = "color-precision", default_value_t = 6)]
    pub color_precision: i32,
    /// Minimum color step between stacked shape layers
    #[arg(long = "layer-difference", default_value_t = 16)]
    pub layer_difference: i32,
    /// Outline angle in degrees above which a corner is kept sharp
    #[arg(long = "corner-threshold", default_value_t = 60)]
    pub corner_threshold: i32,
    /// Shortest outline segment before subdivision stops
    #[arg(long = "length-threshold", default_value_t = 4.0)]
    pub length_threshold: f64,
    /// Subdivision rounds when fitting outline curves
    #[arg(long = "max-iterations", default_value_t = 10)]
    pub max_iterations: usize,
    /// Outline angle in degrees at which a curve is split
    #[arg(long = "splice-threshold", default_value_t = 45)]
    pub splice_threshold: i32,
    /// Decimal places written for SVG coordinates
    #[arg(long = "path-precision")]
    pub path_precision: Option<u32>,
    /// Write SVG coordinates unrounded
    #[arg(long = "no-path-precision", conflicts_with = "path_precision")]
    pub no_path_precision: bool,
}

impl From<&TraceOptionsArgs> for TraceOptions {
    fn from(args: &TraceOptionsArgs) -> Self {
        let path_precision = match (args.no_path_precision, args.path_precision) {
            (true, _) => None,
            (false, Some(places)) => Some(places),
            (false, None) => TraceOptions::default().path_precision,
        };

        TraceOptions {
            hierarchy: args.layering.into(),
            simplify: args.curve.into(),
            filter_speckle: args.filter_speckle,
            color_precision: args.color_precision,
            layer_difference: args.layer_difference,
            corner_threshold: args.corner_threshold,
            length_threshold: args.length_threshold,
            max_iterations: args.max_iterations,
            splice_threshold: args.splice_threshold,
            path_precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_map_to_search_options() {
        let cli = Cli::parse_from([
            "backdrop",
            "--initial-threshold",
            "60",
            "--decay-step",
            "5",
            "--parallel",
            "pick",
            "#ff0000",
        ]);
        let options = SearchOptions::from(&cli.global);
        assert_eq!(options.initial_threshold, 60);
        assert_eq!(options.decay_step, 5);
        assert_eq!(options.strategy, SearchStrategy::Parallel);
    }

    #[test]
    fn zero_decay_step_rejected_by_parser() {
        let result = Cli::try_parse_from(["backdrop", "--decay-step", "0", "pick"]);
        assert!(result.is_err());
    }

    #[test]
    fn pick_parses_mixed_color_formats() {
        let cli = Cli::parse_from(["backdrop", "pick", "#000000", "255,0,0", "0000ff"]);
        let Commands::Pick(cmd) = cli.command else {
            panic!("expected pick command");
        };
        assert_eq!(
            cmd.colors,
            vec![Rgb([0, 0, 0]), Rgb([255, 0, 0]), Rgb([0, 0, 255])]
        );
    }

    #[test]
    fn invalid_color_rejected_by_parser() {
        let result = Cli::try_parse_from(["backdrop", "distance", "#zzzzzz", "#000000"]);
        assert!(result.is_err());
    }

    #[test]
    fn all_samples_disables_limit() {
        let cli = Cli::parse_from(["backdrop", "background", "in.png", "--all-samples"]);
        let Commands::Background(cmd) = cli.command else {
            panic!("expected background command");
        };
        assert_eq!(cmd.sampling.limit(), None);
    }

    #[test]
    fn trace_defaults_map_to_trace_options() {
        let cli = Cli::parse_from(["backdrop", "trace", "in.png"]);
        let Commands::Trace(cmd) = cli.command else {
            panic!("expected trace command");
        };
        let options = TraceOptions::from(&cmd.trace_options);
        assert!(matches!(options.hierarchy, Hierarchical::Stacked));
        assert!(matches!(options.simplify, PathSimplifyMode::Spline));
        assert_eq!(options.path_precision, Some(2));
        assert!(cmd.export_filled.is_none());
    }

    #[test]
    fn trace_flags_map_to_trace_options() {
        let cli = Cli::parse_from([
            "backdrop",
            "trace",
            "in.png",
            "--layering",
            "cutout",
            "--curve",
            "pixel",
            "--no-path-precision",
        ]);
        let Commands::Trace(cmd) = cli.command else {
            panic!("expected trace command");
        };
        let options = TraceOptions::from(&cmd.trace_options);
        assert!(matches!(options.hierarchy, Hierarchical::Cutout));
        assert!(matches!(options.simplify, PathSimplifyMode::None));
        assert_eq!(options.path_precision, None);
    }

    #[test]
    fn color_mode_is_not_an_option() {
        let result = Cli::try_parse_from(["backdrop", "trace", "in.png", "--color-mode", "binary"]);
        assert!(result.is_err());
    }

    #[test]
    fn export_filled_without_path() {
        let cli = Cli::parse_from(["backdrop", "trace", "in.png", "--export-filled"]);
        let Commands::Trace(cmd) = cli.command else {
            panic!("expected trace command");
        };
        assert!(matches!(cmd.export_filled, Some(None)));
    }
}
