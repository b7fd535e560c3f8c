//! Quantum gate types.
//!
//! A gate is immutable and knows its arity, per-wire radices and parameter
//! count. Parameters live on the [`Operation`](crate::Operation) that places
//! the gate, so one gate value can be shared by any number of operations.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use crate::circuit_gate::CircuitGate;
use crate::error::{IrError, IrResult};
use crate::qudit_gate::{ClockGate, PdGate, ShiftGate};
use crate::unitary::{Radices, UnitaryMatrix};

/// Standard qubit gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotation gates
    /// Rotation around X axis, one parameter.
    Rx,
    /// Rotation around Y axis, one parameter.
    Ry,
    /// Rotation around Z axis, one parameter.
    Rz,
    /// Phase gate, one parameter.
    P,
    /// Universal single-qubit gate U3(θ, φ, λ).
    U3,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled phase gate, one parameter.
    CP,
    /// Controlled rotation around Z, one parameter.
    CRz,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::Rx => "rx",
            StandardGate::Ry => "ry",
            StandardGate::Rz => "rz",
            StandardGate::P => "p",
            StandardGate::U3 => "u3",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::CP => "cp",
            StandardGate::CRz => "crz",
            StandardGate::CCX => "ccx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::Rx
            | StandardGate::Ry
            | StandardGate::Rz
            | StandardGate::P
            | StandardGate::U3 => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::CP
            | StandardGate::CRz => 2,

            StandardGate::CCX => 3,
        }
    }

    /// Get the number of real parameters this gate takes.
    #[inline]
    pub fn num_params(&self) -> usize {
        match self {
            StandardGate::Rx
            | StandardGate::Ry
            | StandardGate::Rz
            | StandardGate::P
            | StandardGate::CP
            | StandardGate::CRz => 1,
            StandardGate::U3 => 3,
            _ => 0,
        }
    }

    /// Compute the unitary for the given parameters.
    pub fn unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        check_params(self.name(), self.num_params(), params)?;
        let one = c(1.0, 0.0);
        let zero = c(0.0, 0.0);
        let i = c(0.0, 1.0);
        let s = FRAC_1_SQRT_2;

        let values = match self {
            StandardGate::I => vec![one, zero, zero, one],
            StandardGate::X => vec![zero, one, one, zero],
            StandardGate::Y => vec![zero, -i, i, zero],
            StandardGate::Z => vec![one, zero, zero, -one],
            StandardGate::H => vec![c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)],
            StandardGate::S => vec![one, zero, zero, i],
            StandardGate::Sdg => vec![one, zero, zero, -i],
            StandardGate::T => vec![one, zero, zero, Complex64::from_polar(1.0, PI_4)],
            StandardGate::Tdg => vec![one, zero, zero, Complex64::from_polar(1.0, -PI_4)],
            StandardGate::SX => {
                let (p, m) = (c(0.5, 0.5), c(0.5, -0.5));
                vec![p, m, m, p]
            }
            StandardGate::Rx => {
                let (cos, sin) = half_angle(params[0]);
                vec![c(cos, 0.0), c(0.0, -sin), c(0.0, -sin), c(cos, 0.0)]
            }
            StandardGate::Ry => {
                let (cos, sin) = half_angle(params[0]);
                vec![c(cos, 0.0), c(-sin, 0.0), c(sin, 0.0), c(cos, 0.0)]
            }
            StandardGate::Rz => vec![
                Complex64::from_polar(1.0, -params[0] / 2.0),
                zero,
                zero,
                Complex64::from_polar(1.0, params[0] / 2.0),
            ],
            StandardGate::P => vec![one, zero, zero, Complex64::from_polar(1.0, params[0])],
            StandardGate::U3 => {
                let (theta, phi, lambda) = (params[0], params[1], params[2]);
                let (cos, sin) = half_angle(theta);
                vec![
                    c(cos, 0.0),
                    -Complex64::from_polar(sin, lambda),
                    Complex64::from_polar(sin, phi),
                    Complex64::from_polar(cos, phi + lambda),
                ]
            }
            StandardGate::CX => controlled([zero, one, one, zero]),
            StandardGate::CY => controlled([zero, -i, i, zero]),
            StandardGate::CZ => controlled([one, zero, zero, -one]),
            StandardGate::CH => controlled([c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)]),
            StandardGate::CP => controlled([one, zero, zero, Complex64::from_polar(1.0, params[0])]),
            StandardGate::CRz => controlled([
                Complex64::from_polar(1.0, -params[0] / 2.0),
                zero,
                zero,
                Complex64::from_polar(1.0, params[0] / 2.0),
            ]),
            StandardGate::Swap => permutation(&[0, 2, 1, 3]),
            StandardGate::ISwap => vec![
                one, zero, zero, zero, //
                zero, zero, i, zero, //
                zero, i, zero, zero, //
                zero, zero, zero, one,
            ],
            StandardGate::CCX => permutation(&[0, 1, 2, 3, 4, 5, 7, 6]),
        };
        UnitaryMatrix::from_row_major(values, Radices::qubits(self.num_qubits()))
    }
}

const PI_4: f64 = std::f64::consts::FRAC_PI_4;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn half_angle(theta: f64) -> (f64, f64) {
    ((theta / 2.0).cos(), (theta / 2.0).sin())
}

/// Two-qubit controlled version of a 2x2 block; the control is the first wire.
fn controlled(block: [Complex64; 4]) -> Vec<Complex64> {
    let one = c(1.0, 0.0);
    let zero = c(0.0, 0.0);
    vec![
        one, zero, zero, zero, //
        zero, one, zero, zero, //
        zero, zero, block[0], block[1], //
        zero, zero, block[2], block[3],
    ]
}

/// Row-major permutation matrix sending basis state `j` to `perm[j]`.
fn permutation(perm: &[usize]) -> Vec<Complex64> {
    let dim = perm.len();
    let mut values = vec![c(0.0, 0.0); dim * dim];
    for (col, &row) in perm.iter().enumerate() {
        values[row * dim + col] = c(1.0, 0.0);
    }
    values
}

/// Reject a parameter vector whose length differs from the gate's.
pub(crate) fn check_params(gate_name: &str, expected: usize, params: &[f64]) -> IrResult<()> {
    if params.len() == expected {
        Ok(())
    } else {
        Err(IrError::ParameterCountMismatch {
            gate_name: gate_name.to_string(),
            expected,
            got: params.len(),
        })
    }
}

/// Stable identifier of a gate's type, independent of its parameters.
///
/// Passes compare identifiers to decide whether an operation matches a
/// pattern; a [`PdGate`] on any level is still `GateId::Pd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateId {
    /// A standard qubit gate.
    Standard(StandardGate),
    /// The qudit P[i] diagonal gate.
    Pd,
    /// The qudit clock gate.
    Clock,
    /// The qudit shift gate.
    Shift,
    /// A gate defined by a sub-circuit.
    Circuit,
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateId::Standard(g) => f.write_str(g.name()),
            GateId::Pd => f.write_str("pd"),
            GateId::Clock => f.write_str("clock"),
            GateId::Shift => f.write_str("shift"),
            GateId::Circuit => f.write_str("circuit"),
        }
    }
}

impl From<StandardGate> for GateId {
    fn from(gate: StandardGate) -> Self {
        GateId::Standard(gate)
    }
}

/// A quantum gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// A standard qubit gate.
    Standard(StandardGate),
    /// The qudit P[i] diagonal gate.
    Pd(PdGate),
    /// The qudit clock gate.
    Clock(ClockGate),
    /// The qudit shift gate.
    Shift(ShiftGate),
    /// A compound gate wrapping a sub-circuit.
    Circuit(CircuitGate),
}

impl Gate {
    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Pd(_) => "pd",
            Gate::Clock(_) => "clock",
            Gate::Shift(_) => "shift",
            Gate::Circuit(g) => g.name(),
        }
    }

    /// Get the type identifier of this gate.
    pub fn id(&self) -> GateId {
        match self {
            Gate::Standard(g) => GateId::Standard(*g),
            Gate::Pd(_) => GateId::Pd,
            Gate::Clock(_) => GateId::Clock,
            Gate::Shift(_) => GateId::Shift,
            Gate::Circuit(_) => GateId::Circuit,
        }
    }

    /// Number of wires the gate acts on.
    pub fn num_qudits(&self) -> usize {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Pd(_) | Gate::Clock(_) | Gate::Shift(_) => 1,
            Gate::Circuit(g) => g.num_qudits(),
        }
    }

    /// Levels of each wire the gate acts on.
    pub fn radices(&self) -> Radices {
        match self {
            Gate::Standard(g) => Radices::qubits(g.num_qubits()),
            Gate::Pd(g) => g.radices(),
            Gate::Clock(g) => g.radices(),
            Gate::Shift(g) => g.radices(),
            Gate::Circuit(g) => g.radices().clone(),
        }
    }

    /// Number of real parameters.
    pub fn num_params(&self) -> usize {
        match self {
            Gate::Standard(g) => g.num_params(),
            Gate::Pd(_) | Gate::Clock(_) | Gate::Shift(_) => 0,
            Gate::Circuit(g) => g.num_params(),
        }
    }

    /// Compute the unitary for the given parameters.
    ///
    /// Fails with [`IrError::ParameterCountMismatch`] if `params` does not
    /// have exactly [`num_params`](Self::num_params) entries.
    pub fn unitary(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        match self {
            Gate::Standard(g) => g.unitary(params),
            Gate::Pd(g) => g.unitary(params),
            Gate::Clock(g) => g.unitary(params),
            Gate::Shift(g) => g.unitary(params),
            Gate::Circuit(g) => g.unitary(params),
        }
    }

    /// Check if this gate wraps a sub-circuit.
    pub fn is_compound(&self) -> bool {
        matches!(self, Gate::Circuit(_))
    }

    /// The wrapped circuit gate, if any.
    pub fn as_circuit(&self) -> Option<&CircuitGate> {
        match self {
            Gate::Circuit(g) => Some(g),
            _ => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<PdGate> for Gate {
    fn from(gate: PdGate) -> Self {
        Gate::Pd(gate)
    }
}

impl From<ClockGate> for Gate {
    fn from(gate: ClockGate) -> Self {
        Gate::Clock(gate)
    }
}

impl From<ShiftGate> for Gate {
    fn from(gate: ShiftGate) -> Self {
        Gate::Shift(gate)
    }
}

impl From<CircuitGate> for Gate {
    fn from(gate: CircuitGate) -> Self {
        Gate::Circuit(gate)
    }
}
