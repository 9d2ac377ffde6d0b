//! Custom assertions for graph verification

use cfg_ir::{BlockId, Cfg, Instr};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

/// Assert that no two blocks of `cfg` share an id and all belong to it
pub fn assert_ids_unique(cfg: &Cfg) {
    let mut seen = HashSet::new();
    for bb in cfg.blocks() {
        assert_eq!(bb.cfg_id(), cfg.id(), "block {} belongs to another graph", bb.id());
        assert!(seen.insert(bb.id()), "duplicate block id {}", bb.id());
    }
}

/// Assert the exact instruction sequence of a block
pub fn assert_instrs(cfg: &Cfg, id: BlockId, expected: &[Instr]) {
    let actual = cfg.block(id).unwrap().instrs();
    assert_eq!(actual, expected, "instructions of block {}", id);
}

/// Assert that every edge of `cfg` links two blocks of `cfg`
pub fn assert_edges_internal(cfg: &Cfg) {
    for edge in cfg.edges() {
        assert!(
            cfg.contains_block(edge.source()) && cfg.contains_block(edge.destination()),
            "dangling edge {:?}",
            edge
        );
    }
}
