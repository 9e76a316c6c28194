//! Orientation resolver
//!
//! Builds a local frame for every stitch from its final position. Local X
//! follows the working direction along the row, local Y points from the
//! parents toward the children, and local Z completes a right-handed frame.
//! The external elaborator uses the resulting quaternion to orient stitch
//! models.

use crate::geom::{Quat, Vec3};
use crate::pattern::{Neighbours, Pattern, StitchNode};

use super::config::LayoutConfig;

/// Squared length below which an axis is treated as degenerate
const DEGENERATE: f64 = 1e-18;

/// Set the orientation of every stitch from the final positions
pub fn orient(pattern: &mut Pattern, config: &LayoutConfig) {
    let neighbours = pattern.neighbours();
    let orientations: Vec<Quat> = (0..pattern.nodes.len())
        .map(|index| compute_orientation(&pattern.nodes, index, neighbours[index], config))
        .collect();

    for (node, orientation) in pattern.nodes.iter_mut().zip(orientations) {
        node.orientation = orientation;
    }
}

/// Row neighbours used for the X axis. Chains are skipped where possible,
/// except that a stitch between two chains keeps the next one.
fn axis_neighbours(nodes: &[StitchNode], around: Neighbours) -> (Option<usize>, Option<usize>) {
    let is_chain = |i: usize| nodes[i].stitch_type.is_chain();
    let prev = around.prev.filter(|&i| !is_chain(i));
    let next = around.next.filter(|&i| !is_chain(i));

    if prev.is_none() && next.is_none() {
        // Nothing but chains (or nothing at all) on either side
        match (around.prev, around.next) {
            (_, Some(n)) => (None, Some(n)),
            (Some(p), None) => (Some(p), None),
            (None, None) => (None, None),
        }
    } else {
        (prev, next)
    }
}

fn compute_orientation(
    nodes: &[StitchNode],
    index: usize,
    around: Neighbours,
    config: &LayoutConfig,
) -> Quat {
    let node = &nodes[index];
    let here = node.position;

    let local_x = match axis_neighbours(nodes, around) {
        (Some(p), Some(n)) => {
            (nodes[n].position - here) * config.forward_weight + (here - nodes[p].position)
        }
        (Some(p), None) => here - nodes[p].position,
        (None, Some(n)) => nodes[n].position - here,
        (None, None) => return Quat::IDENTITY,
    };
    let local_x = local_x.normalize();
    if local_x.length_squared() < DEGENERATE {
        return Quat::IDENTITY;
    }

    let mut local_y = Vec3::ZERO;
    for &child in &node.children {
        local_y += nodes[child].position - here;
    }
    for &parent in &node.parents {
        local_y -= nodes[parent].position - here;
    }
    if node.parents.is_empty() && node.children.is_empty() {
        local_y = Vec3::Y;
    }

    let mut local_z = local_x.cross(local_y).normalize();
    if local_z.length_squared() < DEGENERATE {
        // Y collapsed onto X; fall back to world up, then world Z
        local_z = local_x.cross(Vec3::Y).normalize();
        if local_z.length_squared() < DEGENERATE {
            local_z = local_x.cross(Vec3::Z).normalize();
        }
    }
    let local_y = local_z.cross(local_x);

    Quat::from_frame(local_x, local_y, local_z)
}
