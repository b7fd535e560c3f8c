//! Pass trait and types for compilation passes.

use qrew_ir::Circuit;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the circuit.
    Analysis,
    /// Transformation pass that modifies the circuit.
    Transformation,
}

/// A compilation pass that operates on a circuit in place.
///
/// Passes are the unit of work in qrew. A pass either completes and leaves
/// the circuit in canonical form, or returns an error; it never hands back
/// a partially rewritten circuit.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given circuit.
    ///
    /// For analysis passes, this should not modify the circuit but may
    /// write to the `PropertySet`.
    ///
    /// For transformation passes, this modifies the circuit and may record
    /// what it did in the `PropertySet`.
    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    ///
    /// This can be overridden to skip passes that are not needed.
    fn should_run(&self, _circuit: &Circuit, _properties: &PropertySet) -> bool {
        true
    }
}
