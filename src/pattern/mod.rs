//! Pattern data model: the instruction stream going in and the linked
//! stitch graph coming out.

pub mod instruction;
pub mod types;
mod validate;

pub use instruction::{
    Foundation, Instruction, InstructionStream, Location, Span, StitchInstruction, StitchType,
};
pub use types::{Neighbours, Pattern, Row, RowEnding, StitchNode};
