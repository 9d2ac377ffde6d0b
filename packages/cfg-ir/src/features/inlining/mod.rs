//! Inlining feature module
//!
//! Method inlining, closure cloning and closure inlining over `Cfg`s.
//!
//! # Architecture (Hexagonal)
//!
//! ```text
//! application/ (InliningUseCase) ← Entry Point
//!           ↓
//! infrastructure/ (block transforms, IrScope)
//!           ↓
//! domain/ (InlinerInfo, RenameMap)
//!           ↓
//! ports/ (HostScope)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use cfg_ir::features::inlining::{InliningUseCase, InliningUseCaseImpl};
//!
//! let usecase = InliningUseCaseImpl::new(config)?;
//! let outcome = usecase.inline_method(&mut host, callee.cfg(), call_block, &call)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    CloneReport, InlineOutcome, InlineReport, InliningUseCase, InliningUseCaseImpl,
};
pub use domain::{CallBinding, InlinerInfo, RenameMap, TransformKind, YieldBinding};
pub use infrastructure::{IrScope, ScopeKind};
pub use ports::HostScope;
