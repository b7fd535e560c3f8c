//! Operations binding a gate to a location and parameters.

use std::fmt;
use std::sync::Arc;

use crate::error::{IrError, IrResult, format_location};
use crate::gate::Gate;
use crate::qudit::QuditId;
use crate::unitary::{Radices, UnitaryMatrix};

/// A gate placed on an ordered list of distinct qudits.
///
/// The gate is held behind an [`Arc`] so that many operations can share one
/// immutable gate value, e.g. every site of a rewrite pointing at the same
/// template.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// The gate applied.
    gate: Arc<Gate>,
    /// Qudits the gate acts on, in gate-wire order.
    location: Vec<QuditId>,
    /// Parameters bound to the gate.
    params: Vec<f64>,
}

impl Operation {
    /// Create an operation, validating arity, distinctness and parameter count.
    pub fn new(
        gate: impl Into<Arc<Gate>>,
        location: impl IntoIterator<Item = QuditId>,
        params: Vec<f64>,
    ) -> IrResult<Self> {
        let gate = gate.into();
        let location: Vec<QuditId> = location.into_iter().collect();

        if location.len() != gate.num_qudits() {
            return Err(IrError::QuditCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qudits(),
                got: location.len(),
            });
        }
        for (i, qudit) in location.iter().enumerate() {
            if location[..i].contains(qudit) {
                return Err(IrError::DuplicateQudit {
                    qudit: *qudit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        if params.len() != gate.num_params() {
            return Err(IrError::ParameterCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_params(),
                got: params.len(),
            });
        }

        Ok(Self {
            gate,
            location,
            params,
        })
    }

    /// The shared gate.
    #[inline]
    pub fn gate(&self) -> &Arc<Gate> {
        &self.gate
    }

    /// Qudits the operation acts on.
    #[inline]
    pub fn location(&self) -> &[QuditId] {
        &self.location
    }

    /// Bound parameters.
    #[inline]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Name of the gate.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Radices of the gate's wires.
    pub fn radices(&self) -> Radices {
        self.gate.radices()
    }

    /// Check if the gate wraps a sub-circuit.
    pub fn is_compound(&self) -> bool {
        self.gate.is_compound()
    }

    /// Check if the operation touches `qudit`.
    pub fn acts_on(&self, qudit: QuditId) -> bool {
        self.location.contains(&qudit)
    }

    /// Unitary of the gate with this operation's parameters, on its own wires.
    pub fn unitary(&self) -> IrResult<UnitaryMatrix> {
        self.gate.unitary(&self.params)
    }

    /// Same gate, remapped through `outer` and bound to `params`.
    ///
    /// Sub-circuit wire `i` becomes `outer[i]`. Used when splicing the body
    /// of a compound operation into the enclosing circuit.
    pub(crate) fn rebind(&self, outer: &[QuditId], params: Vec<f64>) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
            location: self.location.iter().map(|q| outer[q.index()]).collect(),
            params,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name(), format_location(&self.location))?;
        if !self.params.is_empty() {
            write!(f, "{:?}", self.params)?;
        }
        Ok(())
    }
}
