//! Pass manager for running passes in sequence.

use tracing::{debug, info, instrument};

use qrew_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::property::PropertySet;

/// Manages and executes a sequence of compilation passes.
///
/// Passes run strictly one after another on the same circuit. The first
/// failing pass stops the run and its error is returned unchanged.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Add a pass, builder style.
    #[must_use]
    pub fn with_pass(mut self, pass: impl Pass + 'static) -> Self {
        self.add_pass(pass);
        self
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qudits",
            self.passes.len(),
            circuit.num_qudits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!(
                    "Pass {} completed, ops: {}",
                    pass.name(),
                    circuit.num_operations()
                );
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.num_operations()
        );

        Ok(())
    }

    /// Names of the passes in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}
