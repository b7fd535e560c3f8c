//! Property tests for compound gate expansion.
//!
//! Every leaf operation carries a distinct rotation angle, so the sequence
//! of `(gate, angle)` pairs seen on each wire identifies the order in which
//! that wire is acted on.

use proptest::prelude::*;
use std::sync::Arc;

use qrew_ir::{Circuit, CircuitGate, Gate, QuditId};

const NUM_QUBITS: usize = 3;

type WireLog = Vec<Vec<String>>;

#[derive(Debug, Clone)]
enum Step {
    Rz(usize),
    Cx(usize, usize),
    Compound(usize, usize, usize),
}

/// rz(0) · cx(0, 1) · rz(1)
fn body_a() -> Circuit {
    let mut body = Circuit::new(2);
    body.rz(0.0, QuditId(0)).unwrap();
    body.cx(QuditId(0), QuditId(1)).unwrap();
    body.rz(0.0, QuditId(1)).unwrap();
    body
}

/// cx(1, 0) · rz(0)
fn body_b() -> Circuit {
    let mut body = Circuit::new(2);
    body.cx(QuditId(1), QuditId(0)).unwrap();
    body.rz(0.0, QuditId(0)).unwrap();
    body
}

/// A on (1, 0), then rz(1), then B on (0, 1)
fn body_c(a: &Arc<Gate>, b: &Arc<Gate>) -> Circuit {
    let mut body = Circuit::new(2);
    body.append_shared(a, &[1, 0], vec![0.0, 0.0]).unwrap();
    body.rz(0.0, QuditId(1)).unwrap();
    body.append_shared(b, &[0, 1], vec![0.0]).unwrap();
    body
}

fn templates() -> Vec<Arc<Gate>> {
    let a = Arc::new(Gate::from(CircuitGate::new("a", body_a())));
    let b = Arc::new(Gate::from(CircuitGate::new("b", body_b())));
    let c = Arc::new(Gate::from(CircuitGate::new("c", body_c(&a, &b))));
    vec![a, b, c]
}

fn pair() -> impl Strategy<Value = (usize, usize)> {
    (0..NUM_QUBITS, 1..NUM_QUBITS).prop_map(|(a, offset)| (a, (a + offset) % NUM_QUBITS))
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..NUM_QUBITS).prop_map(Step::Rz),
        pair().prop_map(|(a, b)| Step::Cx(a, b)),
        (0usize..3, pair()).prop_map(|(k, (a, b))| Step::Compound(k, a, b)),
    ]
}

/// Record the leaves of `circuit` on `wires` in schedule order, binding
/// `params` in the same order.
fn log_leaves(circuit: &Circuit, wires: &[QuditId], params: &[f64], log: &mut WireLog) {
    let mut rest = params;
    for op in circuit.operations() {
        let (head, tail) = rest.split_at(op.params().len());
        rest = tail;
        let outer: Vec<QuditId> = op.location().iter().map(|q| wires[q.index()]).collect();
        match op.gate().as_circuit() {
            Some(inner) => log_leaves(inner.circuit(), &outer, head, log),
            None => {
                let entry = format!("{}{:?}", op.name(), head);
                for q in outer {
                    log[q.index()].push(entry.clone());
                }
            }
        }
    }
}

fn wire_log(circuit: &Circuit) -> WireLog {
    let mut log = vec![vec![]; circuit.num_qudits()];
    let wires: Vec<QuditId> = (0..circuit.num_qudits()).map(QuditId).collect();
    log_leaves(circuit, &wires, &circuit.params(), &mut log);
    log
}

#[allow(clippy::cast_precision_loss)]
fn build(steps: &[Step]) -> Circuit {
    let templates = templates();
    let mut circuit = Circuit::new(NUM_QUBITS);
    let mut next = 0usize;
    let mut angles = |n: usize| -> Vec<f64> {
        (0..n)
            .map(|_| {
                next += 1;
                next as f64 * 0.1
            })
            .collect()
    };
    for step in steps {
        match *step {
            Step::Rz(q) => {
                let theta = angles(1)[0];
                circuit.rz(theta, QuditId(q)).unwrap();
            }
            Step::Cx(a, b) => {
                circuit.cx(QuditId(a), QuditId(b)).unwrap();
            }
            Step::Compound(k, a, b) => {
                let gate = &templates[k];
                let params = angles(gate.num_params());
                circuit.append_shared(gate, &[a, b], params).unwrap();
            }
        }
    }
    circuit
}

proptest! {
    #[test]
    fn unfold_preserves_wire_order(steps in prop::collection::vec(step(), 0..12)) {
        let mut circuit = build(&steps);
        let expected = wire_log(&circuit);
        let compound = circuit.num_compound();

        let expanded = circuit.unfold_all();

        prop_assert_eq!(circuit.num_compound(), 0);
        prop_assert!(expanded >= compound);
        prop_assert_eq!(wire_log(&circuit), expected);
    }

    #[test]
    fn unfold_preserves_unitary(steps in prop::collection::vec(step(), 0..10)) {
        let mut circuit = build(&steps);
        let before = circuit.unitary().unwrap();
        let num_params = circuit.num_params();

        circuit.unfold_all();

        prop_assert_eq!(circuit.num_params(), num_params);
        prop_assert!(circuit.unitary().unwrap().approx_eq(&before, 1e-8));
    }

    #[test]
    fn unfold_is_idempotent(steps in prop::collection::vec(step(), 0..12)) {
        let mut circuit = build(&steps);
        circuit.unfold_all();
        let once = circuit.clone();

        prop_assert_eq!(circuit.unfold_all(), 0);
        prop_assert_eq!(circuit, once);
    }
}
