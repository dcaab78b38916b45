//! Exhaustive search for a color that stands apart from a set of samples.
//!
//! Candidates are enumerated by a 24-bit counter. Each pass walks the whole RGB
//! cube in counter order and accepts the first candidate whose distance to every
//! sample reaches the current threshold. When a pass comes up empty the threshold
//! decays and the walk restarts from zero.

use image::Rgb;
use rayon::prelude::*;
use tracing::debug;

use crate::BackdropResult;
use crate::config::{SearchOptions, SearchStrategy};
use crate::distance::lab_distance;
use crate::lab::{Lab, to_lab};

/// Number of distinct 8-bit RGB colors.
pub const COLOR_SPACE_SIZE: u32 = 1 << 24;
/// Highest counter value; the last candidate of every pass.
pub const MAX_COUNTER: u32 = COLOR_SPACE_SIZE - 1;

/// Map a counter to its candidate color.
///
/// The low byte becomes the first channel, so counters `0..=255` walk the red
/// channel with green and blue at zero.
#[inline]
pub fn counter_to_rgb(counter: u32) -> Rgb<u8> {
    let first = (counter & 0x0000ff) as u8;
    let second = ((counter & 0x00ff00) >> 8) as u8;
    let third = ((counter & 0xff0000) >> 16) as u8;
    Rgb([first, second, third])
}

/// Inverse of [`counter_to_rgb`].
#[inline]
pub fn rgb_to_counter(rgb: Rgb<u8>) -> u32 {
    let Rgb([first, second, third]) = rgb;
    u32::from(first) | (u32::from(second) << 8) | (u32::from(third) << 16)
}

/// The accepted candidate together with the threshold it satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub color: Rgb<u8>,
    pub threshold: i32,
    /// Counter the color was found at.
    pub counter: u32,
}

/// Threshold and pass count carried from one pass to the next.
#[derive(Debug, Clone, Copy)]
struct SearchState {
    threshold: i32,
    pass: u32,
}

impl SearchState {
    fn new(threshold: i32) -> Self {
        Self { threshold, pass: 0 }
    }

    fn decayed(self, step: i32) -> Self {
        Self {
            threshold: self.threshold.saturating_sub(step),
            pass: self.pass + 1,
        }
    }
}

/// Background color search with configurable threshold schedule.
#[derive(Debug, Clone, Default)]
pub struct DistinctColorSearch {
    options: SearchOptions,
}

impl DistinctColorSearch {
    pub fn new(options: SearchOptions) -> BackdropResult<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Find the lowest-counter color at least `threshold` away from every sample,
    /// lowering the threshold until one exists.
    pub fn run(&self, samples: &[Rgb<u8>]) -> SearchOutcome {
        self.run_within(samples, MAX_COUNTER)
    }

    /// Same as [`run`](Self::run) with every pass ending at `last_counter`.
    pub(crate) fn run_within(&self, samples: &[Rgb<u8>], last_counter: u32) -> SearchOutcome {
        let sample_labs: Vec<Lab> = samples.iter().map(|&sample| to_lab(sample)).collect();
        let mut state = SearchState::new(self.options.initial_threshold);

        loop {
            if let Some(counter) = self.scan_pass(&sample_labs, state.threshold, last_counter) {
                debug!(
                    counter,
                    threshold = state.threshold,
                    passes = state.pass + 1,
                    "accepted background candidate"
                );
                return SearchOutcome {
                    color: counter_to_rgb(counter),
                    threshold: state.threshold,
                    counter,
                };
            }
            let next = state.decayed(self.options.decay_step);
            debug!(
                from = state.threshold,
                to = next.threshold,
                "no candidate reached the threshold, decaying"
            );
            state = next;
        }
    }

    fn scan_pass(&self, samples: &[Lab], threshold: i32, last_counter: u32) -> Option<u32> {
        let threshold = f64::from(threshold);
        let satisfies = |counter: &u32| accepts(counter_to_rgb(*counter), samples, threshold);
        match self.options.strategy {
            SearchStrategy::Sequential => (0..=last_counter).find(satisfies),
            SearchStrategy::Parallel => (0..=last_counter).into_par_iter().find_first(satisfies),
        }
    }
}

/// A candidate is rejected as soon as one sample is closer than `threshold`.
#[inline]
fn accepts(candidate: Rgb<u8>, samples: &[Lab], threshold: f64) -> bool {
    let candidate = to_lab(candidate);
    !samples
        .iter()
        .any(|&sample| lab_distance(candidate, sample) < threshold)
}

/// Run the search with the default schedule (start at 50, decay by 10).
pub fn search(samples: &[Rgb<u8>]) -> SearchOutcome {
    DistinctColorSearch::default().run(samples)
}
