//! Error types for the IR crate.

use crate::qudit::{CircuitPoint, QuditId};
use thiserror::Error;

/// Errors that can occur in IR operations.
///
/// Variants fall in two groups: configuration errors raised eagerly when a
/// gate, operation or matrix is built with an invalid shape, and structural
/// errors raised when a circuit mutation refers to sites that do not match
/// the circuit's current contents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A wire was declared with zero levels.
    #[error("Invalid radix {0}: a qudit needs at least one level")]
    InvalidRadix(usize),

    /// The register's dimension does not fit in a `usize`.
    #[error("Register with radices {0} is too large for a dense matrix")]
    RegisterTooLarge(String),

    /// A level index does not address a level of the gate.
    #[error("Gate '{gate_name}' has {num_levels} levels, level index {index} is out of range")]
    InvalidLevelIndex {
        /// Name of the gate.
        gate_name: String,
        /// The requested level.
        index: usize,
        /// Number of levels of the gate.
        num_levels: usize,
    },

    /// Wrong number of parameters supplied to a gate.
    #[error("Gate '{gate_name}' takes {expected} parameters, got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Actual number of parameters provided.
        got: usize,
    },

    /// Gate requires a different number of qudits.
    #[error("Gate '{gate_name}' acts on {expected} qudits, got {got}")]
    QuditCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qudits.
        expected: usize,
        /// Actual number of qudits provided.
        got: usize,
    },

    /// Duplicate qudit in an operation location.
    #[error("Duplicate qudit {qudit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQudit {
        /// The duplicate qudit.
        qudit: QuditId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Qudit index past the end of the register.
    #[error(
        "Qudit {qudit} out of range for a {num_qudits}-qudit register{}",
        format_gate_context(.gate_name)
    )]
    QuditOutOfRange {
        /// The offending qudit.
        qudit: QuditId,
        /// Size of the register.
        num_qudits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A gate's radix does not match the wire it is placed on.
    #[error(
        "Radix mismatch on {qudit}: wire has {expected} levels, gate expects {got}{}",
        format_gate_context(.gate_name)
    )]
    RadixMismatch {
        /// The wire.
        qudit: QuditId,
        /// Levels of the wire.
        expected: usize,
        /// Levels the gate expects.
        got: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Matrix shape does not agree with its radices.
    #[error("Matrix dimension mismatch: expected {expected}x{expected}, got {rows}x{cols}")]
    DimensionMismatch {
        /// Dimension implied by the radices.
        expected: usize,
        /// Actual row count.
        rows: usize,
        /// Actual column count.
        cols: usize,
    },

    /// No operation lives at a circuit point.
    #[error("No operation at {point}")]
    InvalidPoint {
        /// The empty or out-of-bounds point.
        point: CircuitPoint,
    },

    /// The operation at a point is not the one the caller expected.
    #[error("Operation at {point} does not match the expected site, found '{found}'")]
    SiteMismatch {
        /// The site.
        point: CircuitPoint,
        /// Description of the operation actually found.
        found: String,
    },

    /// Two sites of one batch resolve to the same operation.
    #[error("Sites {point} and {other} refer to the same operation")]
    DuplicateSite {
        /// The later site.
        point: CircuitPoint,
        /// The earlier site resolving to the same operation.
        other: CircuitPoint,
    },

    /// A replacement does not cover the same wires as the operation it replaces.
    #[error(
        "Replacement '{gate_name}' at {point} acts on {}, expected {}",
        format_location(.got),
        format_location(.expected)
    )]
    ReplacementLocationMismatch {
        /// The site being replaced.
        point: CircuitPoint,
        /// Name of the replacement gate.
        gate_name: String,
        /// Wires of the replaced operation.
        expected: Vec<QuditId>,
        /// Wires of the replacement operation.
        got: Vec<QuditId>,
    },

    /// Batch replacement received unequal numbers of sites and operations.
    #[error("Got {operations} replacement operations for {sites} sites")]
    ReplacementCountMismatch {
        /// Number of sites.
        sites: usize,
        /// Number of operations.
        operations: usize,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Render a location as `(q0, q1)`.
pub(crate) fn format_location(location: &[QuditId]) -> String {
    let qudits: Vec<String> = location.iter().map(ToString::to_string).collect();
    format!("({})", qudits.join(", "))
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_gate_and_site() {
        let err = IrError::DuplicateQudit {
            qudit: QuditId(1),
            gate_name: Some("cx".into()),
        };
        assert_eq!(err.to_string(), "Duplicate qudit q1 in operation (gate: cx)");

        let err = IrError::SiteMismatch {
            point: CircuitPoint::new(3, 0),
            found: "h@(q0)".into(),
        };
        assert!(err.to_string().contains("cycle 3"));
        assert!(err.to_string().contains("h@(q0)"));
    }

    #[test]
    fn test_location_format() {
        assert_eq!(format_location(&[QuditId(0), QuditId(2)]), "(q0, q2)");
        assert_eq!(format_location(&[]), "()");
    }
}
