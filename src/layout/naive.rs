//! Naive row layout
//!
//! Gives every stitch a first position before relaxation. Flat rows are laid
//! out as a serpentine: each row runs along X, the next row starts above the
//! last stitch and runs back the other way. Rounds are laid out as a
//! horizontal circle sized from the stitch count, and keep the working
//! direction.

use std::f64::consts::{PI, TAU};

use crate::geom::{Quat, Vec3};
use crate::pattern::{Pattern, RowEnding, StitchNode};

use super::config::LayoutConfig;

/// Place every stitch row by row. Returns the number of stitches placed.
///
/// A pattern with stitches but no rows carries no row-ending information,
/// so nothing is placed.
pub fn place_naive(pattern: &mut Pattern, config: &LayoutConfig) -> usize {
    if pattern.rows.is_empty() {
        if !pattern.nodes.is_empty() {
            tracing::warn!(
                stitches = pattern.nodes.len(),
                "no row information, skipping naive layout"
            );
        }
        return 0;
    }

    let mut cursor = Vec3::ZERO;
    let mut direction = 1.0;
    let mut placed = 0;

    for row in &pattern.rows {
        let orientation = if direction > 0.0 {
            Quat::IDENTITY
        } else {
            Quat::HALF_TURN_Z
        };
        let count = row.nodes.len();

        match row.ending {
            RowEnding::Turn | RowEnding::Last => {
                for (k, &index) in row.nodes.iter().enumerate() {
                    let offset = Vec3::new(k as f64 * config.stitch_spacing * direction, 0.0, 0.0);
                    placed += set_pose(&mut pattern.nodes, index, cursor + offset, orientation);
                }
                if count > 0 {
                    cursor.x += (count - 1) as f64 * config.stitch_spacing * direction;
                }
                cursor.y += config.row_spacing;
                direction = -direction;
            }
            RowEnding::LoopAround => {
                if count > 0 {
                    let radius = count as f64 * config.stitch_width / PI;
                    let centre = cursor + Vec3::new(radius * direction, 0.0, 0.0);
                    for (k, &index) in row.nodes.iter().enumerate() {
                        let theta = TAU * k as f64 / count as f64;
                        let offset = Vec3::new(
                            -direction * radius * theta.cos(),
                            0.0,
                            radius * theta.sin(),
                        );
                        placed += set_pose(&mut pattern.nodes, index, centre + offset, orientation);
                    }
                }
                cursor.y += config.row_spacing;
            }
        }
    }

    tracing::debug!(placed, rows = pattern.rows.len(), "naive layout done");
    placed
}

fn set_pose(nodes: &mut [StitchNode], index: usize, position: Vec3, orientation: Quat) -> usize {
    match nodes.get_mut(index) {
        Some(node) => {
            node.position = position;
            node.orientation = orientation;
            1
        }
        None => 0,
    }
}
