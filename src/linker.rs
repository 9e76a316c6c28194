//! Graph linker: resolves the instruction stream into a stitch graph
//!
//! Stitches are linked to parents in the previous row through a cursor that
//! walks that row in working order. A `turn` reverses the row just closed so
//! the next row reads it back to front. Running off the end of the previous
//! row without a `turn` means the work is going round: the open row is closed
//! as a loop-around and becomes the row to link into, which is how spiral
//! rounds are rebuilt without explicit round markers.

use crate::error::LinkError;
use crate::pattern::{
    Foundation, Instruction, InstructionStream, Pattern, Row, RowEnding, StitchInstruction,
    StitchNode,
};

/// Link an instruction stream into a pattern.
///
/// Fails on the first stitch that cannot be attached; no partial graph is
/// returned.
pub fn link(stream: &InstructionStream) -> Result<Pattern, LinkError> {
    let mut linker = Linker::new(stream.foundation);
    for instruction in &stream.instructions {
        match instruction {
            Instruction::Turn => linker.turn(),
            Instruction::EndOfRing => linker.in_ring = false,
            Instruction::Stitch(stitch) => linker.stitch(stitch)?,
        }
    }
    let pattern = linker.finish();

    tracing::debug!(
        stitches = pattern.nodes.len(),
        rows = pattern.rows.len(),
        "linked pattern"
    );
    Ok(pattern)
}

/// Row-building state for one `link` call
struct Linker {
    foundation: Foundation,
    nodes: Vec<StitchNode>,
    rows: Vec<Row>,
    /// Stitches available as parents, in working order
    previous_row: Vec<usize>,
    current_row: Vec<usize>,
    /// Next slot of `previous_row` to link to
    previous_index: isize,
    /// Still working into the magic ring
    in_ring: bool,
    /// A turn came after the last stitch made
    turned: bool,
}

impl Linker {
    fn new(foundation: Foundation) -> Self {
        Self {
            foundation,
            nodes: Vec::new(),
            rows: Vec::new(),
            previous_row: Vec::new(),
            current_row: Vec::new(),
            previous_index: 0,
            in_ring: foundation == Foundation::MagicRing,
            turned: false,
        }
    }

    fn turn(&mut self) {
        let closed = std::mem::take(&mut self.current_row);
        self.previous_row = closed.iter().rev().copied().collect();
        self.rows.push(Row::new(closed, RowEnding::Turn));
        self.previous_index = 0;
        self.turned = true;
    }

    /// Close the open row as a round and start linking into it
    fn loop_around(&mut self, index: usize, stitch: &StitchInstruction) -> Result<(), LinkError> {
        self.previous_index -= self.previous_row.len() as isize;
        self.previous_row = std::mem::take(&mut self.current_row);
        self.rows
            .push(Row::new(self.previous_row.clone(), RowEnding::LoopAround));

        if self.previous_row.is_empty() || self.previous_index >= self.previous_row.len() as isize
        {
            return Err(LinkError::no_stitch(index, stitch.location.clone()));
        }
        Ok(())
    }

    fn stitch(&mut self, stitch: &StitchInstruction) -> Result<(), LinkError> {
        let index = self.nodes.len();
        let mut node = StitchNode::new(index, stitch);

        if !(stitch.stitch_type.is_chain() || self.in_ring) {
            self.previous_index = match self.previous_index.checked_add(stitch.parent_offset) {
                Some(cursor) => cursor,
                None if stitch.parent_offset > 0 => {
                    return Err(LinkError::no_stitch(index, stitch.location.clone()))
                }
                None => return Err(LinkError::no_previous(index, stitch.location.clone())),
            };

            for _ in 0..stitch.stitch_type.parent_count() {
                if self.previous_index >= self.previous_row.len() as isize {
                    self.loop_around(index, stitch)?;
                } else if self.previous_index < 0 {
                    return Err(LinkError::no_previous(index, stitch.location.clone()));
                }

                let mut slot = self.previous_index as usize;
                if !self.turned && index.checked_sub(1) == Some(self.previous_row[slot]) {
                    slot += 1;
                    if slot >= self.previous_row.len() {
                        return Err(LinkError::adjacent(index, stitch.location.clone()));
                    }
                }

                let parent = self.previous_row[slot];
                node.parents.push(parent);
                self.nodes[parent].children.push(index);
                self.previous_index = slot as isize + 1;
            }
        }

        self.nodes.push(node);
        self.current_row.push(index);
        self.turned = false;
        Ok(())
    }

    fn finish(mut self) -> Pattern {
        let last = std::mem::take(&mut self.current_row);
        self.rows.push(Row::new(last, RowEnding::Last));
        Pattern {
            foundation: self.foundation,
            nodes: self.nodes,
            rows: self.rows,
        }
    }
}
