//! Basic block domain model
//!
//! A block is an ordered instruction container. It is always owned by the
//! arena of one `Cfg`; the owning graph is recoverable from its `BlockId`.
//! Operations that need the graph (splitting into a new block, migration)
//! live on `Cfg` and in the inlining feature; this type only manipulates its
//! own instruction sequence.

use std::fmt;
use std::fmt::Write as _;

use crate::features::instructions::domain::Instr;
use crate::shared::models::{BlockId, CfgId, Label};

/// Where the split instruction lands when a block is split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPlacement {
    /// Split instruction becomes the first instruction of the new block
    MoveToNew,
    /// Split instruction stays as the last instruction of the original block
    KeepInOriginal,
}

/// Basic block
#[derive(Debug, Clone)]
pub struct BasicBlock {
    id: BlockId,
    label: Label,
    instrs: Vec<Instr>,
    is_live: bool,
}

impl BasicBlock {
    pub(crate) fn new(id: BlockId, label: Label) -> Self {
        Self {
            id,
            label,
            instrs: Vec::new(),
            is_live: true,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Handle of the owning graph
    pub fn cfg_id(&self) -> CfgId {
        self.id.graph()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub(crate) fn set_id(&mut self, id: BlockId) {
        self.id = id;
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    pub(crate) fn take_instrs(&mut self) -> Vec<Instr> {
        std::mem::take(&mut self.instrs)
    }

    pub(crate) fn replace_instrs(&mut self, instrs: Vec<Instr>) {
        self.instrs = instrs;
    }

    /// Append an instruction
    pub fn add_instr(&mut self, instr: Instr) {
        self.instrs.push(instr);
    }

    /// Prepend an instruction
    pub fn insert_instr(&mut self, instr: Instr) {
        self.instrs.insert(0, instr);
    }

    pub fn last_instr(&self) -> Option<&Instr> {
        self.instrs.last()
    }

    /// Remove the first instruction equal to `instr`
    ///
    /// Returns false when no such instruction exists.
    pub fn remove_instr(&mut self, instr: &Instr) -> bool {
        match self.instrs.iter().position(|i| i == instr) {
            Some(pos) => {
                self.instrs.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains_instr(&self, instr: &Instr) -> bool {
        self.instrs.contains(instr)
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }

    pub fn mark_dead(&mut self) {
        self.is_live = false;
    }

    pub fn mark_live(&mut self) {
        self.is_live = true;
    }

    /// Detach the instructions from `point` onward
    ///
    /// Returns the detached tail in order, which the caller places into a new
    /// block. With `KeepInOriginal` the split instruction stays behind as this
    /// block's last instruction. If `point` is absent the split happens after
    /// the last instruction: nothing is detached and `None` is returned, so
    /// callers can tell the fallback from a split that moved zero instructions.
    pub fn split_off_at(&mut self, point: &Instr, placement: SplitPlacement) -> Option<Vec<Instr>> {
        let pos = self.instrs.iter().position(|i| i == point)?;
        let at = match placement {
            SplitPlacement::MoveToNew => pos,
            SplitPlacement::KeepInOriginal => pos + 1,
        };
        Some(self.instrs.split_off(at))
    }

    /// Append `food`'s instructions, in order, to this block
    ///
    /// The donor keeps its id, label, instructions and edges; detaching it
    /// from the graph is the caller's job.
    pub fn swallow_bb(&mut self, food: &BasicBlock) {
        self.instrs.extend(food.instrs.iter().cloned());
    }

    /// Debug dump: header line followed by one tab-indented line per instruction
    pub fn to_string_instrs(&self) -> String {
        let mut buf = format!("{}\n", self);
        for instr in &self.instrs {
            let _ = writeln!(buf, "\t{}", instr);
        }
        buf
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BB [{}:{}]", self.id, self.label)
    }
}
