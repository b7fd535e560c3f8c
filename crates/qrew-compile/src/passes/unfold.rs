//! Compound gate expansion pass.

use tracing::debug;

use qrew_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Expands every compound operation into primitive operations.
///
/// Skipped when the circuit holds no compound operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnfoldPass;

impl Pass for UnfoldPass {
    fn name(&self) -> &'static str {
        "unfold"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, _properties: &mut PropertySet) -> CompileResult<()> {
        let expanded = circuit.unfold_all();
        debug!(
            "Expanded {} compound operations, ops: {}, cycles: {}",
            expanded,
            circuit.num_operations(),
            circuit.num_cycles()
        );
        Ok(())
    }

    fn should_run(&self, circuit: &Circuit, _properties: &PropertySet) -> bool {
        circuit.num_compound() > 0
    }
}
