//! Qrew Rewrite Passes
//!
//! This crate provides the pass infrastructure that rewrites qudit circuits
//! built with [`qrew_ir`]. Passes run in sequence under a [`PassManager`]
//! and share state through a [`PropertySet`].
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       |
//!       v
//! +-------------+
//! | PassManager | <-- PropertySet (RewriteStats, custom data)
//! +-------------+
//!       |
//!       |-- GateRewritePass (cz_to_cnot, swap_to_cnot, custom rules)
//!       `-- UnfoldPass
//!       |
//!       v
//! Output Circuit (no compound operations)
//! ```
//!
//! A [`GateRewritePass`] scans for one gate type, swaps every occurrence for
//! a shared compound template in a single atomic batch, and unfolds the
//! result back to primitive operations.
//!
//! # Example: Eliminating CZ
//!
//! ```rust
//! use qrew_compile::{GateRewritePass, Pass, PropertySet};
//! use qrew_ir::{Circuit, QuditId};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.cz(QuditId(0), QuditId(1)).unwrap();
//!
//! let pass = GateRewritePass::cz_to_cnot().unwrap();
//! pass.run(&mut circuit, &mut PropertySet::new()).unwrap();
//!
//! let names: Vec<_> = circuit.operations().map(|op| op.name()).collect();
//! assert_eq!(names, ["h", "cx", "h"]);
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to create custom passes:
//!
//! ```rust
//! use qrew_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use qrew_ir::Circuit;
//!
//! struct MyCustomPass;
//!
//! impl Pass for MyCustomPass {
//!     fn name(&self) -> &str { "my_custom_pass" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!
//!     fn run(&self, circuit: &mut Circuit, props: &mut PropertySet) -> CompileResult<()> {
//!         // Your pass logic here
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod property;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::PassManager;
pub use pass::{Pass, PassKind};
pub use passes::{GateRewritePass, RewriteSite, UnfoldPass};
pub use property::{PropertySet, RewriteRecord, RewriteStats};
