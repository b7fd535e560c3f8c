//! Property tests for the rewrite passes on random circuits.

use proptest::prelude::*;

use qrew_compile::{GateRewritePass, Pass, PropertySet, RewriteStats};
use qrew_ir::{Circuit, GateId, QuditId, StandardGate};

const NUM_QUBITS: usize = 3;

#[derive(Debug, Clone)]
enum Step {
    H(usize),
    Rz(f64, usize),
    Cx(usize, usize),
    Cz(usize, usize),
    Swap(usize, usize),
}

fn pair() -> impl Strategy<Value = (usize, usize)> {
    (0..NUM_QUBITS, 1..NUM_QUBITS).prop_map(|(a, offset)| (a, (a + offset) % NUM_QUBITS))
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..NUM_QUBITS).prop_map(Step::H),
        (-3.0..3.0f64, 0..NUM_QUBITS).prop_map(|(t, q)| Step::Rz(t, q)),
        pair().prop_map(|(a, b)| Step::Cx(a, b)),
        pair().prop_map(|(a, b)| Step::Cz(a, b)),
        pair().prop_map(|(a, b)| Step::Swap(a, b)),
    ]
}

fn step_without_cz() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..NUM_QUBITS).prop_map(Step::H),
        (-3.0..3.0f64, 0..NUM_QUBITS).prop_map(|(t, q)| Step::Rz(t, q)),
        pair().prop_map(|(a, b)| Step::Cx(a, b)),
        pair().prop_map(|(a, b)| Step::Swap(a, b)),
    ]
}

fn build(steps: &[Step]) -> Circuit {
    let mut circuit = Circuit::new(NUM_QUBITS);
    for step in steps {
        let appended = match *step {
            Step::H(q) => circuit.h(QuditId(q)),
            Step::Rz(theta, q) => circuit.rz(theta, QuditId(q)),
            Step::Cx(a, b) => circuit.cx(QuditId(a), QuditId(b)),
            Step::Cz(a, b) => circuit.cz(QuditId(a), QuditId(b)),
            Step::Swap(a, b) => circuit.swap(QuditId(a), QuditId(b)),
        };
        appended.unwrap();
    }
    circuit
}

fn count(circuit: &Circuit, gate: StandardGate) -> usize {
    circuit
        .gate_counts()
        .get(&GateId::Standard(gate))
        .copied()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn cz_rewrite_preserves_semantics(steps in prop::collection::vec(step(), 0..16)) {
        let mut circuit = build(&steps);
        let before = circuit.unitary().unwrap();
        let czs = count(&circuit, StandardGate::CZ);
        let others = circuit.num_operations() - czs;

        let mut props = PropertySet::new();
        GateRewritePass::cz_to_cnot().unwrap().run(&mut circuit, &mut props).unwrap();

        prop_assert_eq!(count(&circuit, StandardGate::CZ), 0);
        prop_assert_eq!(circuit.num_compound(), 0);
        prop_assert_eq!(circuit.num_operations(), others + 3 * czs);
        prop_assert_eq!(props.get::<RewriteStats>().unwrap().total_replaced(), czs);
        prop_assert!(circuit.unitary().unwrap().approx_eq(&before, 1e-8));
    }

    #[test]
    fn swap_rewrite_preserves_semantics(steps in prop::collection::vec(step(), 0..16)) {
        let mut circuit = build(&steps);
        let before = circuit.unitary().unwrap();

        GateRewritePass::swap_to_cnot().unwrap().run(&mut circuit, &mut PropertySet::new()).unwrap();

        prop_assert_eq!(count(&circuit, StandardGate::Swap), 0);
        prop_assert!(circuit.unitary().unwrap().approx_eq(&before, 1e-8));
    }

    #[test]
    fn rewrite_without_matches_is_noop(steps in prop::collection::vec(step_without_cz(), 0..16)) {
        let mut circuit = build(&steps);
        let before = circuit.clone();

        GateRewritePass::cz_to_cnot().unwrap().run(&mut circuit, &mut PropertySet::new()).unwrap();

        prop_assert_eq!(circuit, before);
    }
}
