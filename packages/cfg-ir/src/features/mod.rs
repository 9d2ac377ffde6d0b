//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (as needed):
//! - domain/     - Pure model and algorithms
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Implementations of ports and helpers built on external crates

pub mod flow_graph;
pub mod inlining;
pub mod instructions;

// Per-execution-context literal values, keyed by operand id
pub mod literal_cache;
