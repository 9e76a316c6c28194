//! The instruction stream consumed by the linker
//!
//! Instructions arrive from an external pattern parser that has already
//! rejected lexical and syntactic errors. Each stitch names its type, its
//! colour and how far the parent cursor should move before it is linked.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Byte range in the pattern source text
pub type Span = std::ops::Range<usize>;

/// How a pattern is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Foundation {
    /// A single anchor point; the first row is usually a chain
    SlipKnot,
    /// An adjustable loop; the first round attaches to the ring itself
    MagicRing,
}

/// Kinds of stitch understood by the linker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StitchType {
    Chain,
    Slip,
    Single,
    Double,
    Treble,
    /// Two stitches worked together into one (sc2tog)
    Decrease,
    InvisibleDecrease,
}

impl StitchType {
    pub fn is_chain(self) -> bool {
        matches!(self, StitchType::Chain)
    }

    pub fn is_decrease(self) -> bool {
        matches!(self, StitchType::Decrease | StitchType::InvisibleDecrease)
    }

    /// Number of previous-row stitches this stitch is worked into
    pub fn parent_count(self) -> usize {
        if self.is_chain() {
            0
        } else if self.is_decrease() {
            2
        } else {
            1
        }
    }

    /// Short pattern abbreviation
    pub fn abbreviation(self) -> &'static str {
        match self {
            StitchType::Chain => "ch",
            StitchType::Slip => "sl",
            StitchType::Single => "sc",
            StitchType::Double => "dc",
            StitchType::Treble => "tr",
            StitchType::Decrease => "dec",
            StitchType::InvisibleDecrease => "invdec",
        }
    }
}

impl fmt::Display for StitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Where a stitch came from in the pattern text.
///
/// Filled in on a best-effort basis by the parser. Only used for
/// diagnostics; nothing in the placement stages reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Byte range of the instruction text
    pub span: Span,
    /// Row number as written in the pattern
    #[serde(default)]
    pub row: Option<usize>,
    /// Stitch number within the row, starting at 1
    #[serde(default)]
    pub stitch: Option<usize>,
}

impl Location {
    pub fn new(span: Span) -> Self {
        Self {
            span,
            row: None,
            stitch: None,
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_stitch(mut self, stitch: usize) -> Self {
        self.stitch = Some(stitch);
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(row) = self.row {
            write!(f, "row {} ", row)?;
        }
        if let Some(stitch) = self.stitch {
            write!(f, "stitch {} ", stitch)?;
        }
        write!(f, "(input:{}..{})", self.span.start, self.span.end)
    }
}

/// A single stitch to be linked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StitchInstruction {
    pub stitch_type: StitchType,
    /// Opaque colour token, carried through unchanged
    pub colour: String,
    /// Cursor movement applied before linking. `0` takes the next free
    /// parent; `-1` reuses the one just consumed (an increase).
    #[serde(default)]
    pub parent_offset: isize,
    #[serde(default)]
    pub location: Option<Location>,
}

impl StitchInstruction {
    pub fn new(stitch_type: StitchType, colour: impl Into<String>) -> Self {
        Self {
            stitch_type,
            colour: colour.into(),
            parent_offset: 0,
            location: None,
        }
    }

    pub fn with_offset(mut self, parent_offset: isize) -> Self {
        self.parent_offset = parent_offset;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// One element of the instruction stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    Stitch(StitchInstruction),
    /// Close the row and work back along it
    Turn,
    /// Close the magic ring; later stitches link normally
    EndOfRing,
}

impl From<StitchInstruction> for Instruction {
    fn from(stitch: StitchInstruction) -> Self {
        Instruction::Stitch(stitch)
    }
}

/// A foundation plus its ordered instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStream {
    pub foundation: Foundation,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

impl InstructionStream {
    pub fn new(foundation: Foundation) -> Self {
        Self {
            foundation,
            instructions: Vec::new(),
        }
    }

    pub fn slip_knot() -> Self {
        Self::new(Foundation::SlipKnot)
    }

    pub fn magic_ring() -> Self {
        Self::new(Foundation::MagicRing)
    }

    /// Append `count` plain stitches of one type
    pub fn stitches(mut self, stitch_type: StitchType, count: usize, colour: &str) -> Self {
        for _ in 0..count {
            self.instructions
                .push(StitchInstruction::new(stitch_type, colour).into());
        }
        self
    }

    /// Append two stitches worked into the same parent
    pub fn increase(mut self, stitch_type: StitchType, colour: &str) -> Self {
        self.instructions
            .push(StitchInstruction::new(stitch_type, colour).into());
        self.instructions
            .push(StitchInstruction::new(stitch_type, colour).with_offset(-1).into());
        self
    }

    pub fn push(mut self, instruction: impl Into<Instruction>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    pub fn turn(self) -> Self {
        self.push(Instruction::Turn)
    }

    pub fn end_of_ring(self) -> Self {
        self.push(Instruction::EndOfRing)
    }

    /// Number of stitch instructions, ignoring markers
    pub fn stitch_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Stitch(_)))
            .count()
    }
}
