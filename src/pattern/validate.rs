//! Structural checks for a linked pattern

use crate::error::PatternError;

use super::types::Pattern;

impl Pattern {
    /// Check the graph invariants every linked pattern must satisfy.
    ///
    /// - parents precede their children
    /// - at most two parents, and two only for decreases
    /// - `children` is the exact inverse of `parents`, edge for edge
    /// - rows list every node once, in creation order
    pub fn validate(&self) -> Result<(), PatternError> {
        for (index, node) in self.nodes.iter().enumerate() {
            if node.index != index {
                return Err(PatternError::MisplacedNode {
                    index,
                    found: node.index,
                });
            }
            if node.parents.len() > 2
                || (node.parents.len() == 2 && !node.stitch_type.is_decrease())
            {
                return Err(PatternError::TooManyParents {
                    index,
                    stitch_type: node.stitch_type,
                    count: node.parents.len(),
                });
            }
            for &parent in &node.parents {
                if parent >= index {
                    return Err(PatternError::ForwardParent { index, parent });
                }
                let back_linked = self.nodes.get(parent).is_some_and(|p| {
                    occurrences(&p.children, index) == occurrences(&node.parents, parent)
                });
                if !back_linked {
                    return Err(PatternError::MissingChild { parent, child: index });
                }
            }
            for &child in &node.children {
                let forward_linked = self.nodes.get(child).is_some_and(|c| {
                    occurrences(&c.parents, index) == occurrences(&node.children, child)
                });
                if !forward_linked {
                    return Err(PatternError::MissingParent { child, parent: index });
                }
            }
        }

        let mut expected = 0;
        for (row, r) in self.rows.iter().enumerate() {
            for &index in &r.nodes {
                if index != expected {
                    return Err(PatternError::RowPartition {
                        row,
                        expected,
                        found: index,
                    });
                }
                expected += 1;
            }
        }
        if expected != self.nodes.len() {
            return Err(PatternError::UnassignedNodes {
                assigned: expected,
                total: self.nodes.len(),
            });
        }

        Ok(())
    }
}

fn occurrences(list: &[usize], value: usize) -> usize {
    list.iter().filter(|&&v| v == value).count()
}
