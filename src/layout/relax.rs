//! Iterative spring relaxation
//!
//! Every stitch is tied by a spring to its row neighbours, its parents and
//! its children. A spring's rest length is the sum of the two stitch radii.
//! A stitch's step is the average of its spring forces rather than their
//! sum, clamped to `max_step`. Each iteration computes all displacements from
//! the positions at the start of the iteration and then applies them
//! together, so the result does not depend on node order and is reproducible
//! for a given input and config.
//!
//! The solver is best effort: it stops when the summed squared movement falls
//! below the threshold, or when the iteration cap is reached. Hitting the cap
//! is reported, not treated as an error.

use crate::geom::Vec3;
use crate::pattern::Pattern;

use super::config::LayoutConfig;

/// Distance below which two stitches count as coincident
const COINCIDENT: f64 = 1e-9;

/// Outcome of a relaxation run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RelaxReport {
    /// Iterations actually run
    pub iterations: usize,
    /// Movement dropped below the threshold before the cap
    pub converged: bool,
    /// Summed squared displacement of the last iteration
    pub movement: f64,
    /// Summed squared displacement over every iteration run
    pub total_movement: f64,
}

/// Spring partners for every stitch: row prev/next, parents and children.
///
/// Each list is sorted and free of duplicates.
pub fn spring_neighbours(pattern: &Pattern) -> Vec<Vec<usize>> {
    let rows = pattern.neighbours();
    pattern
        .nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let mut partners: Vec<usize> = rows[index]
                .prev
                .into_iter()
                .chain(rows[index].next)
                .chain(node.parents.iter().copied())
                .chain(node.children.iter().copied())
                .filter(|&j| j != index && j < pattern.nodes.len())
                .collect();
            partners.sort_unstable();
            partners.dedup();
            partners
        })
        .collect()
}

/// Relax stitch positions in place.
pub fn relax(pattern: &mut Pattern, config: &LayoutConfig) -> RelaxReport {
    let partners = spring_neighbours(pattern);
    let mut report = RelaxReport::default();

    for iteration in 1..=config.max_iterations {
        let positions = pattern.positions();
        let displacements: Vec<Vec3> = partners
            .iter()
            .enumerate()
            .map(|(index, neighbours)| displacement(index, neighbours, &positions, config))
            .collect();

        let movement: f64 = displacements.iter().map(|d| d.length_squared()).sum();
        for (node, delta) in pattern.nodes.iter_mut().zip(&displacements) {
            node.position += *delta;
        }

        report.iterations = iteration;
        report.movement = movement;
        report.total_movement += movement;
        if movement < config.movement_threshold {
            report.converged = true;
            break;
        }
    }

    if report.converged {
        tracing::debug!(
            iterations = report.iterations,
            movement = report.movement,
            total_movement = report.total_movement,
            "relaxation converged"
        );
    } else {
        tracing::warn!(
            iterations = report.iterations,
            movement = report.movement,
            threshold = config.movement_threshold,
            "relaxation stopped at the iteration cap without converging"
        );
    }
    report
}

/// Neighbour-averaged spring force on one stitch, clamped to `max_step`
fn displacement(index: usize, neighbours: &[usize], positions: &[Vec3], config: &LayoutConfig) -> Vec3 {
    if neighbours.is_empty() {
        return Vec3::ZERO;
    }

    let here = positions[index];
    let ideal = config.ideal_distance();
    let mut total = Vec3::ZERO;
    for &j in neighbours {
        let offset = positions[j] - here;
        let distance = offset.length();
        let direction = if distance < COINCIDENT {
            if j > index {
                Vec3::X
            } else {
                -Vec3::X
            }
        } else {
            offset * (1.0 / distance)
        };
        total += direction * ((distance - ideal) * config.spring_constant);
    }

    let averaged = total * (1.0 / neighbours.len() as f64);
    if averaged.is_finite() {
        averaged.clamp_length(config.max_step)
    } else {
        Vec3::ZERO
    }
}
