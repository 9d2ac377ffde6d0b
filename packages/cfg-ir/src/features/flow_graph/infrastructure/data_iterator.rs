/*
 * Filtered Edge Iterator
 *
 * Read-only, lazy view over an edge set that yields the destination of each
 * edge whose kind matches (or, negated, does not match) a requested kind.
 *
 * - Preserves the edge set's iteration order
 * - `has_next` may be called any number of times without consuming
 * - `next_data` on an exhausted view and `remove` are distinct usage errors
 */

use crate::errors::{CfgError, Result};
use crate::features::flow_graph::domain::{Edge, EdgeKind};
use crate::shared::models::BlockId;

/// Filtered view over edges, yielding destination blocks
pub struct DataIterator<'a, I>
where
    I: Iterator<Item = &'a Edge>,
{
    edges: I,
    kind: EdgeKind,
    negate: bool,
    next_edge: Option<&'a Edge>,
}

impl<'a, I> DataIterator<'a, I>
where
    I: Iterator<Item = &'a Edge>,
{
    pub fn new(edges: I, kind: EdgeKind, negate: bool) -> Self {
        Self {
            edges,
            kind,
            negate,
            next_edge: None,
        }
    }

    fn matches(&self, edge: &Edge) -> bool {
        (edge.kind() == self.kind) != self.negate
    }

    /// True if another matching edge remains
    pub fn has_next(&mut self) -> bool {
        if self.next_edge.is_some() {
            return true;
        }

        while let Some(edge) = self.edges.next() {
            if self.matches(edge) {
                self.next_edge = Some(edge);
                return true;
            }
        }

        false
    }

    /// Destination of the next matching edge
    ///
    /// # Errors
    /// `CfgError::NoSuchElement` once the view is exhausted.
    pub fn next_data(&mut self) -> Result<BlockId> {
        if self.has_next() {
            if let Some(edge) = self.next_edge.take() {
                return Ok(edge.destination());
            }
        }
        Err(CfgError::NoSuchElement)
    }

    /// Removal through a filtered view is not supported
    pub fn remove(&mut self) -> Result<()> {
        Err(CfgError::UnsupportedOperation(
            "remove through a filtered edge view",
        ))
    }
}

impl<'a, I> Iterator for DataIterator<'a, I>
where
    I: Iterator<Item = &'a Edge>,
{
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        self.next_data().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::CfgId;

    fn edges(kinds: &[EdgeKind]) -> Vec<Edge> {
        let graph = CfgId::fresh();
        let source = BlockId::new(graph, 0);
        kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Edge::new(source, BlockId::new(graph, i as u32 + 1), *kind))
            .collect()
    }

    fn indices(iter: impl Iterator<Item = BlockId>) -> Vec<u32> {
        iter.map(|id| id.index()).collect()
    }

    #[test]
    fn test_filter_matching_kind() {
        use EdgeKind::{Exception as B, Regular as A};
        let set = edges(&[A, A, B, A, B]);

        assert_eq!(indices(DataIterator::new(set.iter(), A, false)), vec![1, 2, 4]);
        assert_eq!(indices(DataIterator::new(set.iter(), A, true)), vec![3, 5]);
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let set = edges(&[EdgeKind::Exit, EdgeKind::Regular, EdgeKind::Regular]);
        let mut iter = DataIterator::new(set.iter(), EdgeKind::Regular, false);

        assert!(iter.has_next());
        assert!(iter.has_next());
        assert!(iter.has_next());
        assert_eq!(iter.next_data().unwrap().index(), 2);
        assert_eq!(iter.next_data().unwrap().index(), 3);
        assert!(!iter.has_next());
    }

    #[test]
    fn test_exhausted_and_remove_are_distinct_errors() {
        let set = edges(&[EdgeKind::Regular]);
        let mut iter = DataIterator::new(set.iter(), EdgeKind::Exception, false);

        assert!(matches!(iter.next_data(), Err(CfgError::NoSuchElement)));
        assert!(matches!(iter.remove(), Err(CfgError::UnsupportedOperation(_))));
    }

    #[test]
    fn test_empty_edge_set() {
        let set: Vec<Edge> = Vec::new();
        let mut iter = DataIterator::new(set.iter(), EdgeKind::Regular, true);
        assert!(!iter.has_next());
        assert_eq!(iter.next(), None);
    }
}
