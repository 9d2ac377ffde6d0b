mod basic_block;
pub mod cfg;
mod edge;

pub use basic_block::{BasicBlock, SplitPlacement};
pub use cfg::Cfg;
pub use edge::{Edge, EdgeKind};
