//! Reachability over the block graph
//!
//! Builds a petgraph view of the live blocks and marks everything the entry
//! block cannot reach as not live. Dead blocks stay in the arena (their ids
//! remain allocated) but traversals skip them.

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::features::flow_graph::domain::Cfg;
use crate::shared::models::BlockId;

/// Live blocks reachable from the entry block (empty when there is no entry)
pub fn reachable_blocks(cfg: &Cfg) -> FxHashSet<BlockId> {
    let mut reachable = FxHashSet::default();
    let Some(entry) = cfg.entry() else {
        return reachable;
    };

    let mut graph: DiGraphMap<BlockId, ()> = DiGraphMap::new();
    for bb in cfg.live_blocks() {
        graph.add_node(bb.id());
    }
    for edge in cfg.edges() {
        if graph.contains_node(edge.source()) && graph.contains_node(edge.destination()) {
            graph.add_edge(edge.source(), edge.destination(), ());
        }
    }
    if !graph.contains_node(entry) {
        return reachable;
    }

    let mut dfs = Dfs::new(&graph, entry);
    while let Some(id) = dfs.next(&graph) {
        reachable.insert(id);
    }
    reachable
}

/// Mark live blocks unreachable from the entry as dead; returns how many
///
/// A graph without an entry block is left untouched.
pub fn prune_unreachable(cfg: &mut Cfg) -> usize {
    if cfg.entry().is_none() {
        return 0;
    }

    let reachable = reachable_blocks(cfg);
    let dead: Vec<BlockId> = cfg
        .live_block_ids()
        .into_iter()
        .filter(|id| !reachable.contains(id))
        .collect();

    for id in &dead {
        if let Ok(bb) = cfg.block_mut(*id) {
            bb.mark_dead();
        }
    }
    if !dead.is_empty() {
        debug!("Pruned {} unreachable blocks from {}", dead.len(), cfg.id());
    }
    dead.len()
}
