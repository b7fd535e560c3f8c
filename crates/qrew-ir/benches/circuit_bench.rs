//! Benchmarks for qrew circuit operations
//!
//! Run with: cargo bench -p qrew-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

use qrew_ir::{Circuit, CircuitGate, CircuitPoint, Gate, Operation, QuditId};

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::new(10);
        b.iter(|| {
            circuit.h(black_box(QuditId(0))).unwrap();
        });
    });

    group.bench_function("cz_gate", |b| {
        let mut circuit = Circuit::new(10);
        b.iter(|| {
            circuit
                .cz(black_box(QuditId(0)), black_box(QuditId(1)))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark GHZ state circuit creation
fn bench_ghz_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_circuit");

    for num_qubits in &[3, 10, 50, 100] {
        group.bench_with_input(
            BenchmarkId::new("create", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| {
                    let mut circuit = Circuit::new(n);
                    circuit.h(QuditId(0)).unwrap();
                    for i in 0..n - 1 {
                        circuit.cx(QuditId(i), QuditId(i + 1)).unwrap();
                    }
                    black_box(circuit)
                });
            },
        );
    }

    group.finish();
}

fn h_cx_h() -> Arc<Gate> {
    let mut body = Circuit::new(2);
    body.h(QuditId(1)).unwrap();
    body.cx(QuditId(0), QuditId(1)).unwrap();
    body.h(QuditId(1)).unwrap();
    Arc::new(Gate::from(CircuitGate::new("h_cx_h", body)))
}

/// Benchmark batch replacement followed by unfolding
fn bench_replace_and_unfold(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_and_unfold");
    let template = h_cx_h();

    for num_qubits in &[10, 100, 500] {
        let mut circuit = Circuit::new(*num_qubits);
        for _layer in 0..5 {
            for i in (0..*num_qubits - 1).step_by(2) {
                circuit.cz(QuditId(i), QuditId(i + 1)).unwrap();
            }
        }
        let sites: Vec<CircuitPoint> = circuit
            .operations_with_cycles()
            .map(|(cycle, op)| CircuitPoint::new(cycle, op.location()[0]))
            .collect();
        let ops: Vec<Operation> = circuit
            .operations()
            .map(|op| Operation::new(Arc::clone(&template), op.location().iter().copied(), vec![]).unwrap())
            .collect();

        group.bench_with_input(
            BenchmarkId::new("batch_replace", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| {
                    let mut circuit = circuit.clone();
                    circuit.batch_replace(&sites, ops.clone()).unwrap();
                    black_box(circuit)
                });
            },
        );

        let mut replaced = circuit.clone();
        replaced.batch_replace(&sites, ops.clone()).unwrap();
        group.bench_with_input(
            BenchmarkId::new("unfold_all", num_qubits),
            &replaced,
            |b, circuit| {
                b.iter(|| {
                    let mut circuit = circuit.clone();
                    black_box(circuit.unfold_all())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark dense unitary evaluation
fn bench_unitary(c: &mut Criterion) {
    let mut group = c.benchmark_group("unitary");

    for num_qubits in &[2, 4, 6] {
        let mut circuit = Circuit::new(*num_qubits);
        for i in 0..*num_qubits {
            circuit.h(QuditId(i)).unwrap();
        }
        for i in 0..*num_qubits - 1 {
            circuit.cx(QuditId(i), QuditId(i + 1)).unwrap();
        }
        group.bench_with_input(
            BenchmarkId::new("unitary", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.unitary().unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_gate_addition,
    bench_ghz_circuit,
    bench_replace_and_unfold,
    bench_unitary,
);

criterion_main!(benches);
