//! Built-in compilation passes.
//!
//! - [`GateRewritePass`]: replace every operation of one gate type with a
//!   fixed equivalent sub-circuit, then flatten
//! - [`UnfoldPass`]: expand compound operations into primitive ones

mod rewrite;
mod unfold;

pub use rewrite::{GateRewritePass, RewriteSite};
pub use unfold::UnfoldPass;
