//! Inlining Ports
//!
//! The inliner allocates variables, labels and blocks through `HostScope`
//! and never depends on a concrete scope type.

pub mod host_scope;

pub use host_scope::HostScope;
