//! Cycle-scheduled circuit representation.

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateId, StandardGate, check_params};
use crate::operation::Operation;
use crate::qudit::{CircuitPoint, QuditId};
use crate::qudit_gate::PdGate;
use crate::unitary::{Radices, UnitaryMatrix};

/// One time slot of a circuit.
///
/// Each wire is touched by at most one operation of the cycle.
#[derive(Debug, Clone, Default, PartialEq)]
struct Cycle {
    /// Operations in insertion order.
    ops: Vec<Operation>,
    /// Wire → index into `ops`.
    wires: FxHashMap<QuditId, usize>,
}

impl Cycle {
    fn is_free(&self, location: &[QuditId]) -> bool {
        location.iter().all(|q| !self.wires.contains_key(q))
    }

    fn slot(&self, qudit: QuditId) -> Option<usize> {
        self.wires.get(&qudit).copied()
    }

    /// Caller guarantees the operation's wires are free.
    fn insert(&mut self, op: Operation) {
        debug_assert!(self.is_free(op.location()));
        let slot = self.ops.len();
        for &qudit in op.location() {
            self.wires.insert(qudit, slot);
        }
        self.ops.push(op);
    }

    fn remove(&mut self, slot: usize) -> Operation {
        let op = self.ops.remove(slot);
        self.wires.retain(|_, s| *s != slot);
        for s in self.wires.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        op
    }
}

/// A quantum circuit laid out in cycles.
///
/// Wires are numbered `0..num_qudits` and each has a fixed radix. Every
/// operation lives in exactly one cycle, and the cycle order is the
/// schedule: for any wire, the operations touching it are applied in
/// increasing cycle order.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Levels of each wire.
    radices: Radices,
    /// The schedule.
    cycles: Vec<Cycle>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubit wires.
    pub fn new(num_qubits: usize) -> Self {
        Self::with_radices(Radices::qubits(num_qubits))
    }

    /// Create an empty circuit with the given wire radices.
    pub fn with_radices(radices: Radices) -> Self {
        Self {
            radices,
            cycles: vec![],
        }
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Append an operation in the earliest cycle after every operation
    /// already touching its wires.
    ///
    /// The operation must act on at least one wire.
    pub fn append(&mut self, op: Operation) -> IrResult<CircuitPoint> {
        self.check_operation(&op)?;
        let Some(&anchor) = op.location().first() else {
            return Err(IrError::QuditCountMismatch {
                gate_name: op.name().to_string(),
                expected: 1,
                got: 0,
            });
        };
        let cycle = self
            .cycles
            .iter()
            .rposition(|c| !c.is_free(op.location()))
            .map_or(0, |c| c + 1);
        if cycle == self.cycles.len() {
            self.cycles.push(Cycle::default());
        }
        let point = CircuitPoint::new(cycle, anchor);
        self.cycles[cycle].insert(op);
        Ok(point)
    }

    /// Build and append an operation from a gate.
    pub fn append_gate(
        &mut self,
        gate: impl Into<Gate>,
        location: &[usize],
        params: Vec<f64>,
    ) -> IrResult<CircuitPoint> {
        self.append_shared(&Arc::new(gate.into()), location, params)
    }

    /// Append an operation that shares an existing gate value.
    pub fn append_shared(
        &mut self,
        gate: &Arc<Gate>,
        location: &[usize],
        params: Vec<f64>,
    ) -> IrResult<CircuitPoint> {
        let op = Operation::new(
            Arc::clone(gate),
            location.iter().copied().map(QuditId),
            params,
        )?;
        self.append(op)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qudit: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::H, &[qudit.index()], vec![])?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qudit: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::X, &[qudit.index()], vec![])?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qudit: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::Z, &[qudit.index()], vec![])?;
        Ok(self)
    }

    /// Apply RZ rotation.
    pub fn rz(&mut self, theta: f64, qudit: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::Rz, &[qudit.index()], vec![theta])?;
        Ok(self)
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QuditId, target: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::CX, &[control.index(), target.index()], vec![])?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QuditId, target: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::CZ, &[control.index(), target.index()], vec![])?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QuditId, q2: QuditId) -> IrResult<&mut Self> {
        self.append_gate(StandardGate::Swap, &[q1.index(), q2.index()], vec![])?;
        Ok(self)
    }

    /// Apply the P[ind] gate sized to the wire's radix.
    pub fn pd(&mut self, ind: usize, qudit: QuditId) -> IrResult<&mut Self> {
        let levels = self.radices.get(qudit).ok_or_else(|| IrError::QuditOutOfRange {
            qudit,
            num_qudits: self.num_qudits(),
            gate_name: Some("pd".into()),
        })?;
        self.append_gate(PdGate::new(levels, ind)?, &[qudit.index()], vec![])?;
        Ok(self)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Number of wires.
    pub fn num_qudits(&self) -> usize {
        self.radices.len()
    }

    /// Radices of all wires.
    pub fn radices(&self) -> &Radices {
        &self.radices
    }

    /// Number of cycles, including empty ones.
    pub fn num_cycles(&self) -> usize {
        self.cycles.len()
    }

    /// Number of non-empty cycles.
    pub fn depth(&self) -> usize {
        self.cycles.iter().filter(|c| !c.ops.is_empty()).count()
    }

    /// Number of operations.
    pub fn num_operations(&self) -> usize {
        self.cycles.iter().map(|c| c.ops.len()).sum()
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.cycles.iter().all(|c| c.ops.is_empty())
    }

    /// Total number of bound parameters.
    pub fn num_params(&self) -> usize {
        self.operations().map(|op| op.params().len()).sum()
    }

    /// Operation parameters concatenated in schedule order.
    pub fn params(&self) -> Vec<f64> {
        self.operations()
            .flat_map(|op| op.params().iter().copied())
            .collect()
    }

    /// Iterate over operations in schedule order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> + '_ {
        self.cycles.iter().flat_map(|c| c.ops.iter())
    }

    /// Iterate over `(cycle, operation)` pairs in schedule order.
    ///
    /// Each call starts a fresh pass over the circuit.
    pub fn operations_with_cycles(&self) -> impl Iterator<Item = (usize, &Operation)> + '_ {
        self.cycles
            .iter()
            .enumerate()
            .flat_map(|(i, c)| c.ops.iter().map(move |op| (i, op)))
    }

    /// Get the operation at a point.
    pub fn get(&self, point: CircuitPoint) -> Option<&Operation> {
        let cycle = self.cycles.get(point.cycle)?;
        cycle.slot(point.qudit).map(|slot| &cycle.ops[slot])
    }

    /// Count operations by gate type.
    pub fn gate_counts(&self) -> FxHashMap<GateId, usize> {
        let mut counts = FxHashMap::default();
        for op in self.operations() {
            *counts.entry(op.gate().id()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of compound operations.
    pub fn num_compound(&self) -> usize {
        self.operations().filter(|op| op.is_compound()).count()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Remove and return the operation at a point.
    ///
    /// The cycle is kept even if it becomes empty.
    pub fn remove(&mut self, point: CircuitPoint) -> IrResult<Operation> {
        let slot = self
            .cycles
            .get(point.cycle)
            .and_then(|c| c.slot(point.qudit))
            .ok_or(IrError::InvalidPoint { point })?;
        Ok(self.cycles[point.cycle].remove(slot))
    }

    /// Replace the operations at `points` with `ops`, all or nothing.
    ///
    /// See [`batch_replace_if`](Self::batch_replace_if).
    pub fn batch_replace(&mut self, points: &[CircuitPoint], ops: Vec<Operation>) -> IrResult<()> {
        self.batch_replace_if(points, ops, |_| true)
    }

    /// Replace the operations at `points` with `ops`, all or nothing.
    ///
    /// `ops[i]` replaces the operation found at `points[i]`. Every site is
    /// validated against the current circuit before anything changes:
    ///
    /// - the point must address an operation accepted by `expected`,
    /// - no two points may address the same operation,
    /// - the replacement must act on exactly the wires of the operation it
    ///   replaces (order may differ) with matching radices.
    ///
    /// On any failure the circuit is left untouched. Since each replacement
    /// occupies the same wires in the same cycle, the schedule of every
    /// other operation is unaffected and no cycle indices shift.
    pub fn batch_replace_if<F>(
        &mut self,
        points: &[CircuitPoint],
        ops: Vec<Operation>,
        expected: F,
    ) -> IrResult<()>
    where
        F: Fn(&Operation) -> bool,
    {
        if points.len() != ops.len() {
            return Err(IrError::ReplacementCountMismatch {
                sites: points.len(),
                operations: ops.len(),
            });
        }

        // Phase 1: resolve every site against the current state.
        let mut seen: FxHashMap<(usize, usize), CircuitPoint> = FxHashMap::default();
        let mut plan = Vec::with_capacity(points.len());
        for (&point, op) in points.iter().zip(&ops) {
            let cycle = self
                .cycles
                .get(point.cycle)
                .ok_or(IrError::InvalidPoint { point })?;
            let slot = cycle
                .slot(point.qudit)
                .ok_or(IrError::InvalidPoint { point })?;
            let current = &cycle.ops[slot];

            if !expected(current) {
                return Err(IrError::SiteMismatch {
                    point,
                    found: current.to_string(),
                });
            }
            if let Some(&other) = seen.get(&(point.cycle, slot)) {
                return Err(IrError::DuplicateSite { point, other });
            }
            seen.insert((point.cycle, slot), point);

            self.check_operation(op)?;
            let old: FxHashSet<QuditId> = current.location().iter().copied().collect();
            let new: FxHashSet<QuditId> = op.location().iter().copied().collect();
            if old != new {
                return Err(IrError::ReplacementLocationMismatch {
                    point,
                    gate_name: op.name().to_string(),
                    expected: current.location().to_vec(),
                    got: op.location().to_vec(),
                });
            }
            plan.push((point.cycle, slot));
        }

        // Phase 2: nothing below can fail.
        for ((cycle, slot), op) in plan.into_iter().zip(ops) {
            let target = &mut self.cycles[cycle];
            for &qudit in op.location() {
                target.wires.insert(qudit, slot);
            }
            target.ops[slot] = op;
        }
        Ok(())
    }

    /// Expand every compound operation into its sub-circuit.
    ///
    /// Works one nesting level at a time until no compound operations are
    /// left. Within one level, cycle `c` of the circuit becomes a block of
    /// as many cycles as its deepest compound operation: primitive
    /// operations stay in the block's first cycle and each compound body is
    /// laid out cycle by cycle on the wires of the operation it replaces.
    /// Blocks keep their relative order, so the order of operations along
    /// every wire is preserved. A circuit without compound operations is
    /// not modified.
    ///
    /// Returns the number of compound operations expanded.
    pub fn unfold_all(&mut self) -> usize {
        let mut expanded = 0;
        while self.operations().any(Operation::is_compound) {
            let (cycles, count) = self.unfold_level();
            self.cycles = cycles;
            expanded += count;
        }
        expanded
    }

    fn unfold_level(&self) -> (Vec<Cycle>, usize) {
        let mut out: Vec<Cycle> = Vec::with_capacity(self.cycles.len());
        let mut count = 0;

        for cycle in &self.cycles {
            let height = cycle
                .ops
                .iter()
                .filter_map(|op| op.gate().as_circuit())
                .map(|g| g.circuit().num_cycles())
                .max()
                .unwrap_or(1)
                .max(1);
            let base = out.len();
            out.resize_with(base + height, Cycle::default);

            for op in &cycle.ops {
                let Some(body) = op.gate().as_circuit() else {
                    out[base].insert(op.clone());
                    continue;
                };
                count += 1;
                // Params were validated against the body's total at construction.
                let mut params = op.params();
                for (sub_cycle, sub_op) in body.circuit().operations_with_cycles() {
                    let (head, rest) = params.split_at(sub_op.params().len());
                    params = rest;
                    out[base + sub_cycle].insert(sub_op.rebind(op.location(), head.to_vec()));
                }
            }
        }
        (out, count)
    }

    // =========================================================================
    // Semantics
    // =========================================================================

    /// Unitary of the whole circuit with its bound parameters.
    pub fn unitary(&self) -> IrResult<UnitaryMatrix> {
        self.unitary_with(&self.params())
    }

    /// Unitary of the whole circuit with `params` assigned to operations in
    /// schedule order.
    pub fn unitary_with(&self, params: &[f64]) -> IrResult<UnitaryMatrix> {
        check_params("circuit", self.num_params(), params)?;
        let mut acc = UnitaryMatrix::identity(self.radices.clone())?;
        let mut rest = params;
        for op in self.operations() {
            let (head, tail) = rest.split_at(op.params().len());
            rest = tail;
            let local = op.gate().unitary(head)?;
            acc = local.embed(op.location(), &self.radices)?.dot(&acc)?;
        }
        Ok(acc)
    }

    fn check_operation(&self, op: &Operation) -> IrResult<()> {
        for (&qudit, &radix) in op.location().iter().zip(op.radices().as_slice()) {
            let levels = self
                .radices
                .get(qudit)
                .ok_or_else(|| IrError::QuditOutOfRange {
                    qudit,
                    num_qudits: self.num_qudits(),
                    gate_name: Some(op.name().to_string()),
                })?;
            if levels != radix {
                return Err(IrError::RadixMismatch {
                    qudit,
                    expected: levels,
                    got: radix,
                    gate_name: Some(op.name().to_string()),
                });
            }
        }
        Ok(())
    }
}
