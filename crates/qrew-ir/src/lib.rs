//! Qrew Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits over qudits of arbitrary radix. It is the foundation of the
//! qrew rewriting stack.
//!
//! # Overview
//!
//! A [`Circuit`] is a register of wires with fixed radices and a list of
//! cycles. Each cycle holds operations acting on disjoint wires, so the
//! cycle order is the schedule. An [`Operation`] binds a shared [`Gate`] to
//! a location and bound parameters.
//!
//! # Core Components
//!
//! - **Addressing**: [`QuditId`] for wires, [`CircuitPoint`] for a
//!   `(cycle, qudit)` site in a circuit
//! - **Matrices**: [`UnitaryMatrix`] and [`Radices`], with big-endian
//!   basis ordering (qudit 0 is the most significant digit)
//! - **Gates**: [`StandardGate`] for the qubit library, [`PdGate`],
//!   [`ClockGate`] and [`ShiftGate`] for qudits, and [`CircuitGate`] for
//!   gates defined by a sub-circuit
//! - **Circuit**: [`Circuit`] with atomic [`batch_replace`](Circuit::batch_replace)
//!   and [`unfold_all`](Circuit::unfold_all)
//!
//! # Example: Expanding a compound gate
//!
//! ```rust
//! use std::sync::Arc;
//! use qrew_ir::{Circuit, CircuitGate, CircuitPoint, Gate, Operation, QuditId};
//!
//! // H·CX·H on two qubits acts as CZ.
//! let mut body = Circuit::new(2);
//! body.h(QuditId(1)).unwrap();
//! body.cx(QuditId(0), QuditId(1)).unwrap();
//! body.h(QuditId(1)).unwrap();
//! let template = Arc::new(Gate::from(CircuitGate::new("cz_as_cx", body)));
//!
//! let mut circuit = Circuit::new(2);
//! circuit.cz(QuditId(0), QuditId(1)).unwrap();
//! let before = circuit.unitary().unwrap();
//!
//! let op = Operation::new(template, [QuditId(0), QuditId(1)], vec![]).unwrap();
//! circuit.batch_replace(&[CircuitPoint::new(0, 0)], vec![op]).unwrap();
//! circuit.unfold_all();
//!
//! assert_eq!(circuit.num_operations(), 3);
//! assert!(circuit.unitary().unwrap().approx_eq(&before, 1e-9));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qudits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg`, `SX` | 1 | Phase and root gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation gates |
//! | `U3` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled gates |
//! | `Swap`, `ISwap` | 2 | Swap gates |
//! | `CP`, `CRz` | 2 | Controlled rotations |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |
//! | `PdGate` | 1 | Qudit P[i] phase gate |
//! | `ClockGate`, `ShiftGate` | 1 | Qudit Z and X |
//! | `CircuitGate` | any | Sub-circuit |

pub mod circuit;
pub mod circuit_gate;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qudit;
pub mod qudit_gate;
pub mod unitary;

pub use circuit::Circuit;
pub use circuit_gate::CircuitGate;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateId, StandardGate};
pub use operation::Operation;
pub use qudit::{CircuitPoint, QuditId};
pub use qudit_gate::{ClockGate, PdGate, ShiftGate};
pub use unitary::{EPSILON, Radices, UnitaryMatrix};
