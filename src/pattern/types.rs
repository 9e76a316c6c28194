//! Linked pattern types: stitch nodes, rows and the pattern arena

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{Quat, Vec3};

use super::instruction::{Foundation, Location, StitchInstruction, StitchType};

/// A stitch in the linked graph.
///
/// Nodes live in a flat arena; every cross-reference is an index into
/// [`Pattern::nodes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchNode {
    pub index: usize,
    pub stitch_type: StitchType,
    pub colour: String,
    /// Stitches in an earlier row this one is worked into
    pub parents: Vec<usize>,
    /// Stitches that name this one as a parent
    pub children: Vec<usize>,
    pub position: Vec3,
    pub orientation: Quat,
    #[serde(default)]
    pub location: Option<Location>,
}

impl StitchNode {
    pub fn new(index: usize, stitch: &StitchInstruction) -> Self {
        Self {
            index,
            stitch_type: stitch.stitch_type,
            colour: stitch.colour.clone(),
            parents: Vec::new(),
            children: Vec::new(),
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            location: stitch.location.clone(),
        }
    }
}

/// How a row hands over to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowEnding {
    /// Work turns; the next row reads this one back to front
    Turn,
    /// The round closes on itself and continues in the same direction
    LoopAround,
    /// Final row of the pattern
    Last,
}

impl fmt::Display for RowEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RowEnding::Turn => "turn",
            RowEnding::LoopAround => "loop-around",
            RowEnding::Last => "last",
        };
        f.write_str(s)
    }
}

/// Node indices of one row, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub nodes: Vec<usize>,
    pub ending: RowEnding,
}

impl Row {
    pub fn new(nodes: Vec<usize>, ending: RowEnding) -> Self {
        Self { nodes, ending }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Row-adjacent neighbours of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbours {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// A linked pattern: every stitch plus the rows that partition them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub foundation: Foundation,
    pub nodes: Vec<StitchNode>,
    pub rows: Vec<Row>,
}

impl Pattern {
    pub fn new(foundation: Foundation) -> Self {
        Self {
            foundation,
            nodes: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&StitchNode> {
        self.nodes.get(index)
    }

    /// Row endings, one per row
    pub fn endings(&self) -> impl Iterator<Item = RowEnding> + '_ {
        self.rows.iter().map(|r| r.ending)
    }

    /// Prev/next neighbour of every node within its own row.
    ///
    /// Nodes missing from the row list get no neighbours.
    pub fn neighbours(&self) -> Vec<Neighbours> {
        let mut table = vec![Neighbours::default(); self.nodes.len()];
        for row in &self.rows {
            for (pos, &index) in row.nodes.iter().enumerate() {
                let Some(entry) = table.get_mut(index) else {
                    continue;
                };
                entry.prev = pos.checked_sub(1).map(|p| row.nodes[p]);
                entry.next = row.nodes.get(pos + 1).copied();
            }
        }
        table
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}

/// One line per row: `row N (ending): i i<p i<p,q ...`
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            write!(f, "row {} ({}):", r, row.ending)?;
            for &index in &row.nodes {
                write!(f, " {}", index)?;
                if let Some(node) = self.nodes.get(index) {
                    if !node.parents.is_empty() {
                        let parents: Vec<String> =
                            node.parents.iter().map(|p| p.to_string()).collect();
                        write!(f, "<{}", parents.join(","))?;
                    }
                }
            }
        }
        Ok(())
    }
}
