use std::path::{Path, PathBuf};
use std::time::Duration;

use backdrop::{Backdrop, BackdropResult, DistinctColorSearch, SearchOptions};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{GlobalOptions, SamplingArgs};

/// Build the search described by the global options.
pub fn build_search(global: &GlobalOptions) -> BackdropResult<DistinctColorSearch> {
    DistinctColorSearch::new(SearchOptions::from(global))
}

/// The convenience function to build a Backdrop instance from the global and sampling options.
pub fn build_backdrop(global: &GlobalOptions, sampling: &SamplingArgs) -> BackdropResult<Backdrop> {
    Ok(Backdrop::new()
        .with_search(build_search(global)?)
        .with_sample_limit(sampling.limit()))
}

/// Spinner shown on stderr while a long-running step works.
pub fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Derive a variant file path by appending a suffix before the extension.
pub fn derive_variant_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut derived = input.to_path_buf();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    let filename = format!("{}-{}.{}", stem, suffix, extension);
    derived.set_file_name(filename);
    derived
}

/// Derive an SVG file path by changing the extension to "svg".
pub fn derive_svg_path(input: &Path) -> PathBuf {
    let mut path = input.to_path_buf();
    path.set_extension("svg");
    path
}

/// Resolve an optional export flag into a concrete path.
pub fn resolve_export_path(
    flag: &Option<Option<PathBuf>>,
    input: &Path,
    suffix: &str,
) -> Option<PathBuf> {
    match flag {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(derive_variant_path(input, suffix, "png")),
        None => None,
    }
}
