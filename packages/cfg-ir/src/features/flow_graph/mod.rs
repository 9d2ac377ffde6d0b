//! Flow graph feature: basic blocks, edges and the per-unit CFG arena

pub mod domain;
pub mod infrastructure;

pub use domain::{BasicBlock, Cfg, Edge, EdgeKind, SplitPlacement};
pub use infrastructure::{prune_unreachable, reachable_blocks, DataIterator};
