//! Integration tests for blocks, edges and the filtered edge view
//!
//! Covers:
//! - split partition and split/merge inverse
//! - split at an absent instruction (end-of-block fallback)
//! - filtered successor iteration and its usage errors
//! - graph-level merge, pruning and export

mod common;

use cfg_ir::features::flow_graph::prune_unreachable;
use cfg_ir::{Cfg, CfgError, EdgeKind, Label, SplitPlacement};
use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn graph_with(count: u32) -> (Cfg, cfg_ir::BlockId) {
    let mut cfg = Cfg::new();
    let id = cfg.create_block(Label::new("_LABEL_0")).unwrap();
    for i in instrs(count) {
        cfg.block_mut(id).unwrap().add_instr(i);
    }
    (cfg, id)
}

// ═══════════════════════════════════════════════════════════════════════════
// Split / merge
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_split_partition_of_four() {
    let (mut cfg, id) = graph_with(4);
    let point = instr(2);

    let new_id = cfg
        .split_block(id, &point, Label::new("_LABEL_1"), SplitPlacement::MoveToNew)
        .unwrap();

    assert_instrs(&cfg, id, &[instr(0), instr(1)]);
    assert_instrs(&cfg, new_id, &[instr(2), instr(3)]);
    assert!(cfg.edges().is_empty());
}

#[test]
fn test_split_keep_in_original() {
    let (mut cfg, id) = graph_with(4);

    let new_id = cfg
        .split_block(id, &instr(2), Label::new("_LABEL_1"), SplitPlacement::KeepInOriginal)
        .unwrap();

    assert_instrs(&cfg, id, &[instr(0), instr(1), instr(2)]);
    assert_instrs(&cfg, new_id, &[instr(3)]);
}

#[test]
fn test_split_at_absent_instruction_splits_at_end() {
    let (mut cfg, id) = graph_with(3);

    let new_id = cfg
        .split_block(id, &instr(99), Label::new("_LABEL_1"), SplitPlacement::MoveToNew)
        .unwrap();

    assert_instrs(&cfg, id, &instrs(3));
    assert!(cfg.block(new_id).unwrap().is_empty());
    assert_ids_unique(&cfg);
}

#[test]
fn test_split_rejects_taken_label() {
    let (mut cfg, id) = graph_with(2);
    let err = cfg
        .split_block(id, &instr(1), Label::new("_LABEL_0"), SplitPlacement::MoveToNew)
        .unwrap_err();
    assert!(matches!(err, CfgError::DuplicateLabel(_)));
}

#[test]
fn test_merge_blocks_moves_edges() {
    let (mut cfg, id) = graph_with(4);
    let tail = cfg
        .split_block(id, &instr(2), Label::new("_LABEL_1"), SplitPlacement::MoveToNew)
        .unwrap();
    let after = cfg.create_block(Label::new("_LABEL_2")).unwrap();
    cfg.add_edge(id, tail, EdgeKind::FallThrough).unwrap();
    cfg.add_edge(tail, after, EdgeKind::Regular).unwrap();

    cfg.merge_blocks(id, tail).unwrap();

    assert_instrs(&cfg, id, &instrs(4));
    assert!(!cfg.contains_block(tail));
    assert_eq!(cfg.successors(id).collect::<Vec<_>>(), vec![after]);
    assert_edges_internal(&cfg);
}

#[test]
fn test_merge_refuses_shared_donor() {
    let mut cfg = Cfg::new();
    let a = cfg.create_block(Label::new("a")).unwrap();
    let b = cfg.create_block(Label::new("b")).unwrap();
    let donor = cfg.create_block(Label::new("c")).unwrap();
    cfg.add_edge(a, donor, EdgeKind::Regular).unwrap();
    cfg.add_edge(b, donor, EdgeKind::Regular).unwrap();

    assert!(cfg.merge_blocks(a, donor).is_err());
    assert!(cfg.contains_block(donor));
}

#[test]
fn test_block_ids_never_reused() {
    let mut cfg = Cfg::new();
    let a = cfg.create_block(Label::new("a")).unwrap();
    cfg.remove_block(a).unwrap();
    let b = cfg.create_block(Label::new("a")).unwrap();

    assert_ne!(a, b);
    assert!(b.index() > a.index());
}

#[test]
fn test_foreign_block_rejected() {
    let mut first = Cfg::new();
    let second = Cfg::new();
    let id = first.create_block(Label::new("a")).unwrap();

    assert!(matches!(second.block(id), Err(CfgError::ForeignBlock { .. })));
}

proptest! {
    #[test]
    fn prop_split_then_swallow_is_identity(len in 1u32..24, point in 0u32..24) {
        let point = point % len;
        let (mut cfg, id) = graph_with(len);

        let new_id = cfg
            .split_block(id, &instr(point), Label::new("_LABEL_1"), SplitPlacement::KeepInOriginal)
            .unwrap();
        cfg.merge_blocks(id, new_id).unwrap();

        prop_assert_eq!(cfg.block(id).unwrap().instrs(), &instrs(len)[..]);
    }

    #[test]
    fn prop_both_placements_partition(len in 1u32..24, point in 0u32..24) {
        let point = point % len;
        for placement in [SplitPlacement::MoveToNew, SplitPlacement::KeepInOriginal] {
            let (mut cfg, id) = graph_with(len);
            let new_id = cfg
                .split_block(id, &instr(point), Label::new("_LABEL_1"), placement)
                .unwrap();

            let mut joined = cfg.block(id).unwrap().instrs().to_vec();
            joined.extend_from_slice(cfg.block(new_id).unwrap().instrs());
            prop_assert_eq!(joined, instrs(len));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Filtered edge iteration
// ═══════════════════════════════════════════════════════════════════════════

/// Source with five successors through edges of kinds A, A, B, A, B
fn fan_out() -> (Cfg, cfg_ir::BlockId, Vec<cfg_ir::BlockId>) {
    let mut cfg = Cfg::new();
    let source = cfg.create_block(Label::new("src")).unwrap();
    let kinds = [
        EdgeKind::Regular,
        EdgeKind::Regular,
        EdgeKind::Exception,
        EdgeKind::Regular,
        EdgeKind::Exception,
    ];
    let mut targets = Vec::new();
    for (i, kind) in kinds.into_iter().enumerate() {
        let dst = cfg.create_block(Label::new(&format!("t{}", i))).unwrap();
        cfg.add_edge(source, dst, kind).unwrap();
        targets.push(dst);
    }
    (cfg, source, targets)
}

#[test]
fn test_filter_by_kind_preserves_order() {
    let (cfg, source, t) = fan_out();

    let regular: Vec<_> = cfg.outgoing_edges(source, EdgeKind::Regular, false).collect();
    let others: Vec<_> = cfg.outgoing_edges(source, EdgeKind::Regular, true).collect();

    assert_eq!(regular, vec![t[0], t[1], t[3]]);
    assert_eq!(others, vec![t[2], t[4]]);
}

#[test]
fn test_has_next_is_idempotent() {
    let (cfg, source, t) = fan_out();
    let mut iter = cfg.outgoing_edges(source, EdgeKind::Exception, false);

    assert!(iter.has_next());
    assert!(iter.has_next());
    assert!(iter.has_next());
    assert_eq!(iter.next_data().unwrap(), t[2]);
    assert_eq!(iter.next_data().unwrap(), t[4]);
    assert!(!iter.has_next());
}

#[test]
fn test_exhausted_and_remove_are_distinct_errors() {
    let (cfg, source, _) = fan_out();
    let mut iter = cfg.outgoing_edges(source, EdgeKind::ClosureInvocation, false);

    let exhausted = iter.next_data().unwrap_err();
    let removal = iter.remove().unwrap_err();

    assert!(matches!(exhausted, CfgError::NoSuchElement));
    assert!(matches!(removal, CfgError::UnsupportedOperation(_)));
    assert!(exhausted.is_usage_error() && removal.is_usage_error());
}

// ═══════════════════════════════════════════════════════════════════════════
// Pruning and export
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_prune_marks_unreachable_dead() {
    let (scope, blocks) = ScopeBuilder::method("m")
        .block(instrs(1))
        .block(instrs(2))
        .block(instrs(3))
        .edge(0, 1, EdgeKind::Regular)
        .entry(0)
        .build();
    let mut cfg = scope.into_cfg();

    assert_eq!(prune_unreachable(&mut cfg), 1);
    assert!(!cfg.block(blocks[2]).unwrap().is_live());
    assert_eq!(cfg.live_block_ids(), vec![blocks[0], blocks[1]]);
    assert_eq!(cfg.live_instr_count(), 3);
}

#[test]
fn test_dump_and_json() {
    let (cfg, id) = graph_with(2);

    assert_eq!(
        cfg.to_dump(),
        format!("BB [{}:_LABEL_0]\n\t%v_0 = copy(a(1))\n\t%v_1 = copy(a(1))\n", id.index())
    );

    let json: serde_json::Value = serde_json::from_str(&cfg.to_json().unwrap()).unwrap();
    assert_eq!(json["blocks"][0]["label"], "_LABEL_0");
    assert_eq!(json["blocks"][0]["instrs"].as_array().unwrap().len(), 2);
}
