//! Gate-to-subcircuit rewrite pass.

use std::sync::Arc;
use tracing::{debug, trace};

use qrew_ir::{Circuit, CircuitGate, CircuitPoint, Gate, Operation, QuditId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{PropertySet, RewriteStats};

/// Tolerance when checking a template against its source gate.
const TEMPLATE_TOLERANCE: f64 = 1e-9;

/// A matched operation: where it sits and the wires it acted on when the
/// circuit was scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteSite {
    /// Cycle and first qudit of the matched operation.
    pub point: CircuitPoint,
    /// Wires of the matched operation, in gate-wire order.
    pub location: Vec<QuditId>,
}

/// Replaces every occurrence of one gate with a fixed sub-circuit.
///
/// The replacement is built once as a [`CircuitGate`] template and shared
/// by every site. A run is a straight pipeline:
///
/// 1. scan for operations whose gate equals the source gate,
/// 2. build one template operation per site on the matched location,
/// 3. swap all sites in one atomic [`Circuit::batch_replace_if`] call,
/// 4. [`Circuit::unfold_all`] so no compound operations remain.
///
/// The circuit is not re-scanned after unfolding.
#[derive(Debug, Clone)]
pub struct GateRewritePass {
    /// Rule name, used as the pass name and in [`RewriteStats`].
    name: String,
    /// Gate to eliminate, including its construction arguments.
    source: Gate,
    /// Shared replacement gate.
    template: Arc<Gate>,
    /// Parameters bound to every template operation.
    template_params: Vec<f64>,
}

impl GateRewritePass {
    /// Create a rule replacing `source` with `template`.
    ///
    /// The source gate must be parameter-free, and the template must act on
    /// wires with the same radices and implement the same unitary up to a
    /// global phase.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<Gate>,
        template: CircuitGate,
    ) -> CompileResult<Self> {
        let name = name.into();
        let source = source.into();

        if source.is_compound() {
            return Err(CompileError::InvalidConfiguration(format!(
                "rule '{name}': source gate '{}' is compound",
                source.name()
            )));
        }
        if source.num_params() != 0 {
            return Err(CompileError::InvalidConfiguration(format!(
                "rule '{name}': source gate '{}' takes {} parameters, expected none",
                source.name(),
                source.num_params()
            )));
        }
        if source.radices() != *template.radices() {
            return Err(CompileError::InvalidConfiguration(format!(
                "rule '{name}': template '{}' has radices {}, source gate '{}' has {}",
                template.name(),
                template.radices(),
                source.name(),
                source.radices()
            )));
        }

        let template_params = template.params();
        let expected = source.unitary(&[])?;
        if !template
            .unitary(&template_params)?
            .approx_eq_up_to_phase(&expected, TEMPLATE_TOLERANCE)
        {
            return Err(CompileError::InvalidConfiguration(format!(
                "rule '{name}': template '{}' does not implement '{}'",
                template.name(),
                source.name()
            )));
        }

        Ok(Self {
            name,
            source,
            template: Arc::new(Gate::from(template)),
            template_params,
        })
    }

    /// CZ → H(1) · CX(0, 1) · H(1).
    pub fn cz_to_cnot() -> CompileResult<Self> {
        let mut body = Circuit::new(2);
        body.h(QuditId(1))?
            .cx(QuditId(0), QuditId(1))?
            .h(QuditId(1))?;
        Self::new("cz_to_cnot", StandardGate::CZ, CircuitGate::new("h_cx_h", body))
    }

    /// SWAP → CX(0, 1) · CX(1, 0) · CX(0, 1).
    pub fn swap_to_cnot() -> CompileResult<Self> {
        let mut body = Circuit::new(2);
        body.cx(QuditId(0), QuditId(1))?
            .cx(QuditId(1), QuditId(0))?
            .cx(QuditId(0), QuditId(1))?;
        Self::new("swap_to_cnot", StandardGate::Swap, CircuitGate::new("cx_cx_cx", body))
    }

    /// Gate this rule eliminates.
    pub fn source(&self) -> &Gate {
        &self.source
    }

    /// The shared replacement gate.
    pub fn template(&self) -> &Arc<Gate> {
        &self.template
    }

    fn matches(&self, op: &Operation) -> bool {
        **op.gate() == self.source
    }

    /// Every matching operation, in schedule order.
    pub fn find_matches(&self, circuit: &Circuit) -> Vec<RewriteSite> {
        circuit
            .operations_with_cycles()
            .filter(|(_, op)| self.matches(op))
            .map(|(cycle, op)| RewriteSite {
                point: CircuitPoint::new(cycle, op.location()[0]),
                location: op.location().to_vec(),
            })
            .collect()
    }

    /// One template operation per site, placed on the matched location.
    pub fn build_replacements(&self, sites: &[RewriteSite]) -> CompileResult<Vec<Operation>> {
        sites
            .iter()
            .map(|site| {
                let op = Operation::new(
                    Arc::clone(&self.template),
                    site.location.iter().copied(),
                    self.template_params.clone(),
                )?;
                Ok(op)
            })
            .collect()
    }

    /// Swap every site for a template operation in one atomic step.
    ///
    /// Fails without touching the circuit if any site no longer holds a
    /// matching operation on the scanned wires. Returns the number of sites
    /// replaced.
    pub fn substitute(&self, circuit: &mut Circuit, sites: &[RewriteSite]) -> CompileResult<usize> {
        let replacements = self.build_replacements(sites)?;
        let points: Vec<CircuitPoint> = sites.iter().map(|site| site.point).collect();
        circuit.batch_replace_if(&points, replacements, |op| self.matches(op))?;
        Ok(sites.len())
    }
}

impl Pass for GateRewritePass {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let sites = self.find_matches(circuit);
        debug!("{}: found {} '{}' operations", self.name, sites.len(), self.source.name());
        for site in &sites {
            trace!("{}: match at {}", self.name, site.point);
        }

        let replaced = if sites.is_empty() {
            0
        } else {
            self.substitute(circuit, &sites)?
        };

        let expanded = circuit.unfold_all();
        debug!(
            "{}: replaced {}, expanded {} compound operations, ops: {}",
            self.name,
            replaced,
            expanded,
            circuit.num_operations()
        );

        match properties.get_mut::<RewriteStats>() {
            Some(stats) => stats.record(&self.name, replaced),
            None => {
                let mut stats = RewriteStats::default();
                stats.record(&self.name, replaced);
                properties.insert(stats);
            }
        }
        Ok(())
    }
}
