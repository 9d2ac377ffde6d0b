//! Inlining UseCase Implementation
//!
//! Entry point for the three graph-level transformations:
//!
//! ```text
//! inline_method   host block ──split──► [pre] → callee clone → [continuation]
//! inline_closure  host block ──split──► [pre] → migrated closure → [continuation]
//! clone_closure   closure body ──────► copy in another closure scope
//! ```
//!
//! A failed transformation leaves the host graph partially rewritten. There
//! is no rollback; callers treat an error as fatal to the compilation unit.

use tracing::{debug, info};

use crate::config::InlineConfig;
use crate::errors::{CfgError, Result};
use crate::features::flow_graph::domain::{Cfg, Edge, EdgeKind, SplitPlacement};
use crate::features::flow_graph::infrastructure::prune_unreachable;
use crate::features::inlining::domain::{CallBinding, InlinerInfo, YieldBinding};
use crate::features::inlining::ports::HostScope;
use crate::features::instructions::domain::Instr;
use crate::shared::models::BlockId;

/// Result of an inlining request
#[derive(Debug, Clone)]
pub enum InlineOutcome {
    Inlined(InlineReport),
    /// Callee left alone; the host graph is unchanged
    Skipped { reason: String },
}

impl InlineOutcome {
    pub fn is_inlined(&self) -> bool {
        matches!(self, InlineOutcome::Inlined(_))
    }

    pub fn report(&self) -> Option<&InlineReport> {
        match self {
            InlineOutcome::Inlined(report) => Some(report),
            InlineOutcome::Skipped { .. } => None,
        }
    }
}

/// Where the inlined body landed in the host graph
#[derive(Debug, Clone)]
pub struct InlineReport {
    /// Block holding the instructions that followed the call site
    pub continuation: BlockId,
    /// Renamed entry of the inlined body
    pub entry: BlockId,
    /// Renamed exit of the inlined body
    pub exit: BlockId,
    /// Every block added to the host, in source id order
    pub blocks: Vec<BlockId>,
    /// Closure invocations found in the inlined body
    pub yield_sites: Vec<(BlockId, Instr)>,
    /// Host blocks marked dead afterwards
    pub pruned: usize,
}

/// Result of duplicating a closure body
#[derive(Debug, Clone)]
pub struct CloneReport {
    pub blocks: Vec<BlockId>,
    pub entry: Option<BlockId>,
    pub exit: Option<BlockId>,
    pub pruned: usize,
}

/// Inlining UseCase trait
pub trait InliningUseCase {
    /// Inline `callee` at `call`, which must sit in `call_block` of the host
    fn inline_method(
        &self,
        host: &mut dyn HostScope,
        callee: &Cfg,
        call_block: BlockId,
        call: &Instr,
    ) -> Result<InlineOutcome>;

    /// Duplicate every live block of `source` into `target`
    fn clone_closure(&self, source: &Cfg, target: &mut dyn HostScope) -> Result<CloneReport>;

    /// Move the body of `closure` into the host at `yield_instr`
    fn inline_closure(
        &self,
        host: &mut dyn HostScope,
        closure: Cfg,
        yield_block: BlockId,
        yield_instr: &Instr,
    ) -> Result<InlineOutcome>;
}

/// Inlining UseCase implementation
#[derive(Debug, Clone, Default)]
pub struct InliningUseCaseImpl {
    config: InlineConfig,
}

impl InliningUseCaseImpl {
    pub fn new(config: InlineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InlineConfig {
        &self.config
    }

    fn exceeds_limits(&self, callee: &Cfg) -> Option<String> {
        let blocks = callee.live_blocks().count();
        if blocks > self.config.max_callee_blocks {
            return Some(format!(
                "{} live blocks exceed the limit of {}",
                blocks, self.config.max_callee_blocks
            ));
        }
        let instrs = callee.live_instr_count();
        if instrs > self.config.max_callee_instructions {
            return Some(format!(
                "{} instructions exceed the limit of {}",
                instrs, self.config.max_callee_instructions
            ));
        }
        None
    }

    fn prune(&self, cfg: &mut Cfg) -> usize {
        if self.config.prune_unreachable {
            prune_unreachable(cfg)
        } else {
            0
        }
    }
}

impl InliningUseCase for InliningUseCaseImpl {
    fn inline_method(
        &self,
        host: &mut dyn HostScope,
        callee: &Cfg,
        call_block: BlockId,
        call: &Instr,
    ) -> Result<InlineOutcome> {
        let binding = CallBinding::from_call(call)
            .ok_or_else(|| CfgError::invalid_transform(format!("'{}' is not a call", call)))?;
        let (callee_entry, callee_exit) = entry_and_exit(callee)?;
        if let Some(reason) = self.exceeds_limits(callee) {
            debug!("Not inlining {}: {}", callee.id(), reason);
            return Ok(InlineOutcome::Skipped { reason });
        }

        let continuation = split_at_site(host, call_block, call)?;

        let mut ii = InlinerInfo::for_method(&mut *host, binding)
            .with_yield_site_recording(self.config.record_yield_sites);
        let mut blocks = Vec::new();
        for bb in callee.live_blocks() {
            blocks.push(bb.clone_for_inlined_method(&mut ii)?);
        }
        copy_edges(&mut ii, callee.edges())?;
        let entry = renamed(&ii, callee_entry)?;
        let exit = renamed(&ii, callee_exit)?;
        let yield_sites = ii.into_yield_sites();

        link_body(host.cfg_mut(), call_block, entry, exit, continuation)?;
        let pruned = self.prune(host.cfg_mut());

        info!(
            "Inlined {} at block {}: {} blocks, {} yield sites",
            callee.id(),
            call_block,
            blocks.len(),
            yield_sites.len()
        );
        Ok(InlineOutcome::Inlined(InlineReport {
            continuation,
            entry,
            exit,
            blocks,
            yield_sites,
            pruned,
        }))
    }

    fn clone_closure(&self, source: &Cfg, target: &mut dyn HostScope) -> Result<CloneReport> {
        let mut ii = InlinerInfo::for_closure_clone(&mut *target);
        let mut blocks = Vec::new();
        for bb in source.live_blocks() {
            blocks.push(bb.clone_for_block_cloning(&mut ii)?);
        }
        copy_edges(&mut ii, source.edges())?;
        let entry = source.entry().and_then(|id| ii.renamed_block(id));
        let exit = source.exit().and_then(|id| ii.renamed_block(id));
        drop(ii);

        let cfg = target.cfg_mut();
        if let Some(entry) = entry {
            cfg.set_entry(entry)?;
        }
        if let Some(exit) = exit {
            cfg.set_exit(exit)?;
        }
        let pruned = self.prune(cfg);

        debug!("Cloned {} blocks of {} into {}", blocks.len(), source.id(), cfg.id());
        Ok(CloneReport {
            blocks,
            entry,
            exit,
            pruned,
        })
    }

    fn inline_closure(
        &self,
        host: &mut dyn HostScope,
        mut closure: Cfg,
        yield_block: BlockId,
        yield_instr: &Instr,
    ) -> Result<InlineOutcome> {
        let binding = YieldBinding::from_yield(yield_instr).ok_or_else(|| {
            CfgError::invalid_transform(format!("'{}' is not a closure invocation", yield_instr))
        })?;
        let (closure_entry, closure_exit) = entry_and_exit(&closure)?;
        if let Some(reason) = self.exceeds_limits(&closure) {
            debug!("Not inlining closure {}: {}", closure.id(), reason);
            return Ok(InlineOutcome::Skipped { reason });
        }

        let continuation = split_at_site(host, yield_block, yield_instr)?;

        let edges = closure.edges().to_vec();
        let closure_id = closure.id();
        let mut ii = InlinerInfo::for_closure_inline(&mut *host, binding);
        let mut blocks = Vec::new();
        for id in closure.live_block_ids() {
            let bb = closure.remove_block(id)?;
            blocks.push(bb.migrate_to_host_scope(&mut ii)?);
        }
        copy_edges(&mut ii, &edges)?;
        let entry = renamed(&ii, closure_entry)?;
        let exit = renamed(&ii, closure_exit)?;
        drop(ii);

        link_body(host.cfg_mut(), yield_block, entry, exit, continuation)?;
        let pruned = self.prune(host.cfg_mut());

        info!(
            "Inlined closure {} at block {}: {} blocks migrated",
            closure_id,
            yield_block,
            blocks.len()
        );
        Ok(InlineOutcome::Inlined(InlineReport {
            continuation,
            entry,
            exit,
            blocks,
            yield_sites: Vec::new(),
            pruned,
        }))
    }
}

fn entry_and_exit(cfg: &Cfg) -> Result<(BlockId, BlockId)> {
    let entry = cfg
        .entry()
        .ok_or_else(|| CfgError::invalid_transform(format!("graph {} has no entry block", cfg.id())))?;
    let exit = cfg
        .exit()
        .ok_or_else(|| CfgError::invalid_transform(format!("graph {} has no exit block", cfg.id())))?;
    Ok((entry, exit))
}

fn renamed(ii: &InlinerInfo<'_>, source: BlockId) -> Result<BlockId> {
    ii.renamed_block(source).ok_or_else(|| {
        CfgError::invalid_transform(format!("block {} of the inlined body is not live", source))
    })
}

/// Split `block` at `site` and drop the site itself
///
/// Returns the continuation block, which takes over `block`'s outgoing edges
/// (and its role as exit block).
fn split_at_site(host: &mut dyn HostScope, block: BlockId, site: &Instr) -> Result<BlockId> {
    if !host.cfg().block(block)?.contains_instr(site) {
        return Err(CfgError::InstructionNotFound { block });
    }
    let label = host.new_label();
    let cfg = host.cfg_mut();
    let continuation = cfg.split_block(block, site, label, SplitPlacement::MoveToNew)?;
    cfg.block_mut(continuation)?.remove_instr(site);
    cfg.retarget_outgoing(block, continuation)?;
    if cfg.exit() == Some(block) {
        cfg.set_exit(continuation)?;
    }
    Ok(continuation)
}

/// Copy edges whose endpoints were both carried over
fn copy_edges(ii: &mut InlinerInfo<'_>, edges: &[Edge]) -> Result<()> {
    for edge in edges {
        let (Some(source), Some(destination)) = (
            ii.renamed_block(edge.source()),
            ii.renamed_block(edge.destination()),
        ) else {
            continue;
        };
        match edge.data() {
            Some(data) => {
                let data = ii.rename_operand(data)?;
                ii.host_cfg_mut()
                    .add_edge_with_data(source, destination, edge.kind(), data)?;
            }
            None => {
                ii.host_cfg_mut().add_edge(source, destination, edge.kind())?;
            }
        }
    }
    Ok(())
}

/// Jump from the site block into the body, and from the body's exit onward
fn link_body(
    cfg: &mut Cfg,
    site_block: BlockId,
    entry: BlockId,
    exit: BlockId,
    continuation: BlockId,
) -> Result<()> {
    let entry_label = cfg.block(entry)?.label().clone();
    cfg.block_mut(site_block)?.add_instr(Instr::jump(entry_label));
    cfg.add_edge(site_block, entry, EdgeKind::Regular)?;

    let continuation_label = cfg.block(continuation)?.label().clone();
    cfg.block_mut(exit)?.add_instr(Instr::jump(continuation_label));
    cfg.add_edge(exit, continuation, EdgeKind::Regular)?;
    Ok(())
}
