//! Inlining infrastructure: block transforms and the IR scope adapter

mod block_transforms;
pub mod ir_scope;

pub use ir_scope::{IrScope, ScopeKind};
