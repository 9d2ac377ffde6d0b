//! Flow Graph infrastructure

pub mod data_iterator;
pub mod reachability;

pub use data_iterator::DataIterator;
pub use reachability::{prune_unreachable, reachable_blocks};
