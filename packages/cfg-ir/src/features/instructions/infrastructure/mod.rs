//! Clone capabilities of `Instr` (inherent methods, no re-exports needed)

mod clone_capabilities;
