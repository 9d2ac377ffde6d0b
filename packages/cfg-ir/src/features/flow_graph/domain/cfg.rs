//! Control Flow Graph domain model
//!
//! The graph is the sole owner of its blocks: an arena keyed by the
//! graph-local block index, a label index, and an ordered edge set. Block ids
//! come from one monotonic counter per graph and are never reused, even after
//! a block is removed or migrated away.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::basic_block::{BasicBlock, SplitPlacement};
use super::edge::{Edge, EdgeKind};
use crate::errors::{CfgError, Result};
use crate::features::flow_graph::infrastructure::DataIterator;
use crate::features::instructions::domain::Instr;
use crate::shared::models::{BlockId, CfgId, Label, Operand};

/// Control flow graph of one compiled unit
#[derive(Debug)]
pub struct Cfg {
    id: CfgId,
    next_block_index: u32,
    blocks: BTreeMap<u32, BasicBlock>,
    labels: FxHashMap<Label, BlockId>,
    edges: Vec<Edge>,
    entry: Option<BlockId>,
    exit: Option<BlockId>,
}

impl Default for Cfg {
    fn default() -> Self {
        Self::new()
    }
}

impl Cfg {
    pub fn new() -> Self {
        Self {
            id: CfgId::fresh(),
            next_block_index: 0,
            blocks: BTreeMap::new(),
            labels: FxHashMap::default(),
            edges: Vec::new(),
            entry: None,
            exit: None,
        }
    }

    pub fn id(&self) -> CfgId {
        self.id
    }

    fn next_block_id(&mut self) -> BlockId {
        let id = BlockId::new(self.id, self.next_block_index);
        self.next_block_index += 1;
        id
    }

    fn check_owned(&self, id: BlockId) -> Result<()> {
        if id.graph() != self.id {
            return Err(CfgError::ForeignBlock {
                block: id,
                graph: self.id,
            });
        }
        if !self.blocks.contains_key(&id.index()) {
            return Err(CfgError::BlockNotFound(id));
        }
        Ok(())
    }

    /// Create an empty block bound to `label`
    pub fn create_block(&mut self, label: Label) -> Result<BlockId> {
        if self.labels.contains_key(&label) {
            return Err(CfgError::DuplicateLabel(label));
        }
        let id = self.next_block_id();
        self.labels.insert(label.clone(), id);
        self.blocks.insert(id.index(), BasicBlock::new(id, label));
        Ok(id)
    }

    /// Register a block coming from another graph
    ///
    /// The block receives a fresh id from this graph's counter; its old id is
    /// meaningless afterwards.
    pub fn add_basic_block(&mut self, mut block: BasicBlock) -> Result<BlockId> {
        if self.labels.contains_key(block.label()) {
            return Err(CfgError::DuplicateLabel(block.label().clone()));
        }
        let old = block.id();
        let id = self.next_block_id();
        block.set_id(id);
        self.labels.insert(block.label().clone(), id);
        self.blocks.insert(id.index(), block);
        debug!("Block {} of {} registered as {} in {}", old, old.graph(), id, self.id);
        Ok(id)
    }

    pub fn block(&self, id: BlockId) -> Result<&BasicBlock> {
        self.check_owned(id)?;
        self.blocks.get(&id.index()).ok_or(CfgError::BlockNotFound(id))
    }

    pub fn block_mut(&mut self, id: BlockId) -> Result<&mut BasicBlock> {
        self.check_owned(id)?;
        self.blocks
            .get_mut(&id.index())
            .ok_or(CfgError::BlockNotFound(id))
    }

    pub fn contains_block(&self, id: BlockId) -> bool {
        self.check_owned(id).is_ok()
    }

    /// All blocks in id order
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.values()
    }

    pub fn live_blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.values().filter(|bb| bb.is_live())
    }

    pub fn live_block_ids(&self) -> Vec<BlockId> {
        self.live_blocks().map(|bb| bb.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Instruction count over live blocks
    pub fn live_instr_count(&self) -> usize {
        self.live_blocks().map(|bb| bb.len()).sum()
    }

    pub fn block_by_label(&self, label: &Label) -> Option<BlockId> {
        self.labels.get(label).copied()
    }

    pub fn entry(&self) -> Option<BlockId> {
        self.entry
    }

    pub fn set_entry(&mut self, id: BlockId) -> Result<()> {
        self.check_owned(id)?;
        self.entry = Some(id);
        Ok(())
    }

    pub fn exit(&self) -> Option<BlockId> {
        self.exit
    }

    pub fn set_exit(&mut self, id: BlockId) -> Result<()> {
        self.check_owned(id)?;
        self.exit = Some(id);
        Ok(())
    }

    /// Detach a block from the graph, dropping its edges and label binding
    pub fn remove_block(&mut self, id: BlockId) -> Result<BasicBlock> {
        self.check_owned(id)?;
        let block = self
            .blocks
            .remove(&id.index())
            .ok_or(CfgError::BlockNotFound(id))?;
        self.labels.remove(block.label());
        self.edges
            .retain(|e| e.source() != id && e.destination() != id);
        if self.entry == Some(id) {
            self.entry = None;
        }
        if self.exit == Some(id) {
            self.exit = None;
        }
        Ok(block)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edges
    // ═══════════════════════════════════════════════════════════════════════

    /// Add an edge; returns false if an edge of that kind already links the pair
    pub fn add_edge(&mut self, source: BlockId, destination: BlockId, kind: EdgeKind) -> Result<bool> {
        self.insert_edge(Edge::new(source, destination, kind))
    }

    pub fn add_edge_with_data(
        &mut self,
        source: BlockId,
        destination: BlockId,
        kind: EdgeKind,
        data: Operand,
    ) -> Result<bool> {
        self.insert_edge(Edge::new(source, destination, kind).with_data(data))
    }

    fn insert_edge(&mut self, edge: Edge) -> Result<bool> {
        self.check_owned(edge.source())?;
        self.check_owned(edge.destination())?;
        if self
            .edges
            .iter()
            .any(|e| e.same_link(edge.source(), edge.destination(), edge.kind()))
        {
            return Ok(false);
        }
        self.edges.push(edge);
        Ok(true)
    }

    pub fn remove_edge(&mut self, source: BlockId, destination: BlockId, kind: EdgeKind) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| !e.same_link(source, destination, kind));
        self.edges.len() != before
    }

    /// Remove every edge from `source` to `destination`, whatever its kind
    pub fn remove_edges_between(&mut self, source: BlockId, destination: BlockId) -> usize {
        let before = self.edges.len();
        self.edges
            .retain(|e| !(e.source() == source && e.destination() == destination));
        before - self.edges.len()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Successors of `id` reached through edges of `kind` (or not of `kind` when negated)
    pub fn outgoing_edges(
        &self,
        id: BlockId,
        kind: EdgeKind,
        negate: bool,
    ) -> DataIterator<'_, impl Iterator<Item = &Edge>> {
        DataIterator::new(
            self.edges.iter().filter(move |e| e.source() == id),
            kind,
            negate,
        )
    }

    /// Successor blocks of `id` through edges of `kind`, resolved in the arena
    pub fn successor_blocks(
        &self,
        id: BlockId,
        kind: EdgeKind,
    ) -> impl Iterator<Item = &BasicBlock> {
        self.outgoing_edges(id, kind, false)
            .filter_map(move |dest| self.blocks.get(&dest.index()))
    }

    pub fn successors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.source() == id)
            .map(|e| e.destination())
    }

    pub fn predecessors(&self, id: BlockId) -> impl Iterator<Item = BlockId> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.destination() == id)
            .map(|e| e.source())
    }

    /// Move every outgoing edge of `from` so that it leaves `to` instead
    ///
    /// Returns the number of edges added to `to`; an edge `to` already has
    /// is dropped and not counted.
    pub fn retarget_outgoing(&mut self, from: BlockId, to: BlockId) -> Result<usize> {
        self.check_owned(from)?;
        self.check_owned(to)?;

        let (moved, kept): (Vec<Edge>, Vec<Edge>) =
            std::mem::take(&mut self.edges)
                .into_iter()
                .partition(|e| e.source() == from);
        self.edges = kept;

        let mut inserted = 0;
        for edge in moved {
            if self.insert_edge(edge.relinked(to, edge.destination()))? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Structural transformations
    // ═══════════════════════════════════════════════════════════════════════

    /// Split block `id` at `point` into a new block labelled `new_label`
    ///
    /// The new block receives the tail of the original sequence. No edge is
    /// added between the two halves. When `point` is not in the block the
    /// split is treated as happening after the last instruction, leaving the
    /// new block empty.
    pub fn split_block(
        &mut self,
        id: BlockId,
        point: &Instr,
        new_label: Label,
        placement: SplitPlacement,
    ) -> Result<BlockId> {
        self.check_owned(id)?;
        let new_id = self.create_block(new_label)?;

        let tail = match self.block_mut(id)?.split_off_at(point, placement) {
            Some(tail) => tail,
            None => {
                warn!("Split point '{}' not found in block {}; splitting at end", point, id);
                Vec::new()
            }
        };
        self.block_mut(new_id)?.replace_instrs(tail);
        Ok(new_id)
    }

    /// Merge `donor` into `into`
    ///
    /// Appends the donor's instructions to `into`, removes the donor and moves
    /// its outgoing edges to `into`. The donor may only be reached from `into`.
    pub fn merge_blocks(&mut self, into: BlockId, donor: BlockId) -> Result<()> {
        self.check_owned(into)?;
        self.check_owned(donor)?;
        if into == donor {
            return Err(CfgError::invalid_transform("cannot merge a block into itself"));
        }
        if self.predecessors(donor).any(|p| p != into) {
            return Err(CfgError::invalid_transform(format!(
                "block {} has predecessors other than {}",
                donor, into
            )));
        }

        let outgoing: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| e.source() == donor && e.destination() != donor)
            .cloned()
            .collect();
        let food = self.remove_block(donor)?;
        self.block_mut(into)?.swallow_bb(&food);
        for edge in outgoing {
            self.insert_edge(edge.relinked(into, edge.destination()))?;
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Dumps
    // ═══════════════════════════════════════════════════════════════════════

    /// Textual dump of every live block, in id order
    pub fn to_dump(&self) -> String {
        self.live_blocks().map(|bb| bb.to_string_instrs()).collect()
    }

    /// JSON export for tooling
    pub fn to_json(&self) -> Result<String> {
        let export = CfgExport {
            id: self.id,
            entry: self.entry,
            exit: self.exit,
            blocks: self
                .blocks
                .values()
                .map(|bb| BlockExport {
                    id: bb.id().index(),
                    label: bb.label().name(),
                    live: bb.is_live(),
                    instrs: bb.instrs().iter().map(|i| i.to_string()).collect(),
                })
                .collect(),
            edges: &self.edges,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

#[derive(Serialize)]
struct CfgExport<'a> {
    id: CfgId,
    entry: Option<BlockId>,
    exit: Option<BlockId>,
    blocks: Vec<BlockExport<'a>>,
    edges: &'a [Edge],
}

#[derive(Serialize)]
struct BlockExport<'a> {
    id: u32,
    label: &'a str,
    live: bool,
    instrs: Vec<String>,
}
