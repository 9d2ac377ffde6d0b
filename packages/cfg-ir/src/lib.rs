/*
 * cfg-ir - Control flow graph layer of a compiler IR
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (ids, variables, labels, literals)
 * - features/    : Vertical slices (instructions → flow_graph → inlining, literal_cache)
 * - config/      : Inlining limits (presets + versioned YAML)
 *
 * Graphs own their blocks in an arena addressed by `BlockId`; blocks carry
 * the id of their graph instead of a back-pointer. All transformations are
 * synchronous and single-threaded per graph.
 */

#![allow(clippy::should_implement_trait)] // Preset::from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{InlineConfig, Preset};
pub use errors::{CfgError, Result};
pub use features::flow_graph::{BasicBlock, Cfg, DataIterator, Edge, EdgeKind, SplitPlacement};
pub use features::inlining::{
    HostScope, InlineOutcome, InlinerInfo, InliningUseCase, InliningUseCaseImpl, IrScope,
};
pub use features::instructions::Instr;
pub use features::literal_cache::LiteralCache;
pub use shared::models::{BlockId, CfgId, Label, Literal, LiteralKind, Operand, Variable};
