//! Inlining Application Layer (UseCase)
//!
//! External callers go through `InliningUseCase`; the block transforms and
//! the transformation context are building blocks, not entry points.

mod inlining_usecase;

pub use inlining_usecase::{
    CloneReport, InlineOutcome, InlineReport, InliningUseCase, InliningUseCaseImpl,
};
