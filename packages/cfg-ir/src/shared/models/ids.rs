//! Graph and block identities
//!
//! A block never holds a pointer back to its graph. Instead every `BlockId`
//! carries the `CfgId` of the graph that allocated it, and the graph resolves
//! the handle through its own arena.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_CFG_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique handle of one control flow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CfgId(u32);

impl CfgId {
    /// Allocate a fresh graph handle
    pub fn fresh() -> Self {
        CfgId(NEXT_CFG_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CfgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cfg#{}", self.0)
    }
}

/// Basic block identity: the allocating graph plus the graph-local index
///
/// `index` is drawn from the graph's monotonic counter and is what dumps
/// print. Two ids from different graphs never compare equal, even when
/// their indices coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId {
    graph: CfgId,
    index: u32,
}

impl BlockId {
    pub(crate) fn new(graph: CfgId, index: u32) -> Self {
        Self { graph, index }
    }

    /// Graph that owns the block
    pub fn graph(&self) -> CfgId {
        self.graph
    }

    /// Graph-local numeric id
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}
