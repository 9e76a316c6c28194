//! Error types for linking and graph validation

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::pattern::{Location, Span, StitchType};

/// A stitch that cannot be attached to the fabric.
///
/// These are deterministic consequences of the instruction stream; the
/// pattern has to be corrected upstream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkError {
    /// The row to wrap around into has no stitches
    #[error("no stitch to link to, for stitch {index}{}", location_suffix(.location))]
    NoStitchToLinkTo {
        index: usize,
        location: Option<Location>,
    },

    /// The parent cursor moved before the start of the previous row
    #[error("no previous stitch to link to, for stitch {index}{}", location_suffix(.location))]
    NoPreviousStitch {
        index: usize,
        location: Option<Location>,
    },

    /// The only candidate parent is the stitch made just before this one
    #[error(
        "cannot link to the immediately preceding stitch, for stitch {index}{}",
        location_suffix(.location)
    )]
    AdjacentParent {
        index: usize,
        location: Option<Location>,
    },
}

fn location_suffix(location: &Option<Location>) -> String {
    match location {
        Some(loc) => format!(" at {}", loc),
        None => String::new(),
    }
}

impl LinkError {
    pub fn no_stitch(index: usize, location: Option<Location>) -> Self {
        Self::NoStitchToLinkTo { index, location }
    }

    pub fn no_previous(index: usize, location: Option<Location>) -> Self {
        Self::NoPreviousStitch { index, location }
    }

    pub fn adjacent(index: usize, location: Option<Location>) -> Self {
        Self::AdjacentParent { index, location }
    }

    /// Index of the stitch that failed to link
    pub fn index(&self) -> usize {
        match self {
            Self::NoStitchToLinkTo { index, .. }
            | Self::NoPreviousStitch { index, .. }
            | Self::AdjacentParent { index, .. } => *index,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::NoStitchToLinkTo { location, .. }
            | Self::NoPreviousStitch { location, .. }
            | Self::AdjacentParent { location, .. } => location.as_ref(),
        }
    }

    /// Get the source span if the parser supplied one
    pub fn span(&self) -> Option<&Span> {
        self.location().map(|l| &l.span)
    }

    fn hint(&self) -> &'static str {
        match self {
            Self::NoStitchToLinkTo { .. } => "there is nothing in the previous row to work into",
            Self::NoPreviousStitch { .. } => "the parent offset points before the start of the row",
            Self::AdjacentParent { .. } => "a stitch cannot be worked into the one just made",
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = match self.span() {
            Some(span) => span.clone(),
            None => return self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(false))
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.hint())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// A linked pattern that breaks a graph invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PatternError {
    #[error("node at position {index} carries index {found}")]
    MisplacedNode { index: usize, found: usize },

    #[error("stitch {index} ({stitch_type}) has {count} parents")]
    TooManyParents {
        index: usize,
        stitch_type: StitchType,
        count: usize,
    },

    #[error("stitch {index} links forward to stitch {parent}")]
    ForwardParent { index: usize, parent: usize },

    #[error("stitch {parent} does not list child {child}")]
    MissingChild { parent: usize, child: usize },

    #[error("stitch {child} does not list parent {parent}")]
    MissingParent { child: usize, parent: usize },

    #[error("row {row} lists stitch {found}, expected {expected}")]
    RowPartition {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("rows cover {assigned} of {total} stitches")]
    UnassignedNodes { assigned: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_includes_location() {
        let err = LinkError::no_previous(4, Some(Location::new(10..14).with_row(2)));
        assert_eq!(
            err.to_string(),
            "no previous stitch to link to, for stitch 4 at row 2 (input:10..14)"
        );
        assert_eq!(err.index(), 4);
        assert_eq!(err.span(), Some(&(10..14)));
    }

    #[test]
    fn test_message_without_location() {
        let err = LinkError::adjacent(1, None);
        assert_eq!(
            err.to_string(),
            "cannot link to the immediately preceding stitch, for stitch 1"
        );
        assert!(err.span().is_none());
        assert_eq!(err.format("sc", "pattern.txt"), err.to_string());
    }

    #[test]
    fn test_format_points_at_source() {
        let source = "ch 3, turn, sc 4";
        let err = LinkError::no_stitch(5, Some(Location::new(12..16)));
        let report = err.format(source, "pattern.txt");
        assert!(report.contains("pattern.txt"));
        assert!(report.contains("no stitch to link to"));
        assert!(report.contains("nothing in the previous row"));
    }
}
