//! CFG edges
//!
//! Edges are immutable values. An edge set changes only by adding or removing
//! whole edges; at most one edge of each kind exists per ordered block pair.

use serde::{Deserialize, Serialize};

use crate::shared::models::{BlockId, Operand};

/// CFG edge kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Explicit jump or branch
    Regular,
    /// Fall-through to the next block
    FallThrough,
    /// Exception handler edge
    Exception,
    /// Edge into the exit block
    Exit,
    /// Closure invocation linkage discovered during inlining
    ClosureInvocation,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Regular => "REGULAR",
            EdgeKind::FallThrough => "FALL_THROUGH",
            EdgeKind::Exception => "EXCEPTION",
            EdgeKind::Exit => "EXIT",
            EdgeKind::ClosureInvocation => "CLOSURE_INVOCATION",
        }
    }
}

/// Directed, typed edge between two blocks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    source: BlockId,
    destination: BlockId,
    kind: EdgeKind,
    /// Optional attachment (branch condition, exception class, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Operand>,
}

impl Edge {
    pub fn new(source: BlockId, destination: BlockId, kind: EdgeKind) -> Self {
        Self {
            source,
            destination,
            kind,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Operand) -> Self {
        self.data = Some(data);
        self
    }

    pub fn source(&self) -> BlockId {
        self.source
    }

    pub fn destination(&self) -> BlockId {
        self.destination
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    pub fn data(&self) -> Option<&Operand> {
        self.data.as_ref()
    }

    /// Same endpoints and kind, ignoring the attachment
    pub fn same_link(&self, source: BlockId, destination: BlockId, kind: EdgeKind) -> bool {
        self.source == source && self.destination == destination && self.kind == kind
    }

    /// Copy of this edge with new endpoints, keeping kind and attachment
    pub(crate) fn relinked(&self, source: BlockId, destination: BlockId) -> Self {
        Self {
            source,
            destination,
            kind: self.kind,
            data: self.data.clone(),
        }
    }
}
