//! stitchgraph - spatial embedding of crochet patterns
//!
//! This library links a flat stream of stitch instructions into a stitch
//! graph, then places every stitch in 3-D space with a position and an
//! orientation, ready for a mesh elaborator.
//!
//! # Example
//!
//! ```rust
//! use stitchgraph::{embed, InstructionStream, StitchType};
//!
//! let stream = InstructionStream::slip_knot()
//!     .stitches(StitchType::Chain, 4, "white")
//!     .turn()
//!     .stitches(StitchType::Single, 4, "white");
//!
//! let embedding = embed(&stream).unwrap();
//! assert_eq!(embedding.pattern.nodes.len(), 8);
//! assert_eq!(embedding.pattern.nodes[4].parents, vec![3]);
//! ```

pub mod error;
pub mod geom;
pub mod layout;
pub mod linker;
pub mod pattern;

pub use error::{LinkError, PatternError};
pub use geom::{Quat, Vec3};
pub use layout::{ConfigError, LayoutConfig, RelaxReport};
pub use linker::link;
pub use pattern::{
    Foundation, Instruction, InstructionStream, Location, Pattern, Row, RowEnding,
    StitchInstruction, StitchNode, StitchType,
};

use thiserror::Error;

/// Errors that can occur during the embedding pipeline
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The instruction stream cannot be linked
    #[error("link error: {0}")]
    Link(#[from] LinkError),

    /// The layout configuration is unusable
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration for the complete embedding pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// Run the relaxation solver between naive layout and orientation
    pub relax: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            relax: true,
        }
    }
}

impl EmbedConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Enable or disable the relaxation solver
    pub fn with_relaxation(mut self, relax: bool) -> Self {
        self.relax = relax;
        self
    }
}

/// A fully placed pattern
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub pattern: Pattern,
    /// Solver outcome; `None` when relaxation was skipped
    pub relaxation: Option<RelaxReport>,
}

/// Link and place a pattern with default configuration
pub fn embed(stream: &InstructionStream) -> Result<Embedding, EmbedError> {
    embed_with_config(stream, &EmbedConfig::default())
}

/// Link and place a pattern with custom configuration
///
/// # Example
///
/// ```rust
/// use stitchgraph::{embed_with_config, EmbedConfig, InstructionStream, LayoutConfig, StitchType};
///
/// let stream = InstructionStream::magic_ring()
///     .stitches(StitchType::Single, 6, "red")
///     .end_of_ring()
///     .stitches(StitchType::Single, 6, "red");
///
/// let config = EmbedConfig::new()
///     .with_layout(LayoutConfig::default().with_max_iterations(20));
///
/// let embedding = embed_with_config(&stream, &config).unwrap();
/// let report = embedding.relaxation.unwrap();
/// assert!(report.iterations <= 20);
/// ```
pub fn embed_with_config(
    stream: &InstructionStream,
    config: &EmbedConfig,
) -> Result<Embedding, EmbedError> {
    config.layout.validate()?;

    let mut pattern = link(stream)?;
    let relaxation = layout::place(&mut pattern, &config.layout, config.relax);

    Ok(Embedding {
        pattern,
        relaxation,
    })
}
