//! Compound gates defined by an embedded circuit.

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::unitary::{Radices, UnitaryMatrix};

/// A gate whose action is an entire sub-circuit.
///
/// Its arity and radices are those of the sub-circuit, and its parameters
/// are the sub-circuit's operation parameters concatenated in schedule
/// order. Placing it as one operation lets a multi-gate pattern be swapped
/// in atomically; [`Circuit::unfold_all`] splices the body back in later.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitGate {
    name: String,
    circuit: Circuit,
}

impl CircuitGate {
    /// Wrap a circuit as a gate.
    pub fn new(name: impl Into<String>, circuit: Circuit) -> Self {
        Self {
            name: name.into(),
            circuit,
        }
    }

    /// Name of the gate.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The embedded circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of wires.
    pub fn num_qudits(&self) -> usize {
        self.circuit.num_qudits()
    }

    /// Radices of the sub-circuit.
    pub fn radices(&self) -> &Radices {
        self.circuit.radices()
    }

    /// Total parameter count of the sub-circuit.
    pub fn num_params(&self) -> usize {
        self.circuit.num_params()
    }

    /// Parameters currently bound inside the sub-circuit.
    pub fn params(&self) -> Vec<f64> {
        self.circuit.params()
    }

    /// Unitary of the sub-circuit with `params` assigned in schedule order.
    pub fn unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        self.circuit.unitary_with(params)
    }
}
