//! Placement stages for a linked pattern
//!
//! Takes the stitch graph produced by the linker and computes a position and
//! orientation for every stitch:
//!
//! 1. [`place_naive`] lays rows out flat or as rings
//! 2. [`relax`] nudges stitches toward consistent spacing
//! 3. [`orient`] derives a local frame from the final positions
//!
//! Each stage owns one field of [`StitchNode`](crate::pattern::StitchNode)
//! and runs to completion before the next starts.

pub mod config;
pub mod error;
pub mod naive;
pub mod orientation;
pub mod relax;

pub use config::LayoutConfig;
pub use error::ConfigError;
pub use naive::place_naive;
pub use orientation::orient;
pub use relax::{relax, spring_neighbours, RelaxReport};

use crate::pattern::Pattern;

/// Run all placement stages on a linked pattern.
///
/// With `relaxation` off, stitches keep their naive positions and only get
/// oriented.
pub fn place(pattern: &mut Pattern, config: &LayoutConfig, relaxation: bool) -> Option<RelaxReport> {
    place_naive(pattern, config);
    let report = relaxation.then(|| relax(pattern, config));
    orient(pattern, config);
    report
}
