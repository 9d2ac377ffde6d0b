/*
 * Block-level transformations driven by an InlinerInfo
 *
 * - clone_for_inlined_method: copy a callee block into the host (call-site inlining)
 * - clone_for_block_cloning:  copy a closure block into another closure
 * - migrate_to_host_scope:    move a closure block into the host, one scope shallower
 *
 * The cloning forms leave the source block untouched. Migration consumes the
 * block: after it returns, the block lives in the host graph under a fresh id.
 */

use tracing::debug;

use crate::errors::Result;
use crate::features::flow_graph::domain::BasicBlock;
use crate::features::inlining::domain::InlinerInfo;
use crate::shared::models::{BlockId, Operand};

impl BasicBlock {
    /// Clone into the renamed target block for method inlining
    ///
    /// Instructions whose clone is dropped do not appear in the target. Cloned
    /// closure invocations are logged as linkage sites.
    pub fn clone_for_inlined_method(&self, ii: &mut InlinerInfo<'_>) -> Result<BlockId> {
        let target = ii.get_or_create_renamed_bb(self)?;
        for instr in self.instrs() {
            let Some(cloned) = instr.clone_for_inlined_scope(ii)? else {
                continue;
            };
            if cloned.is_closure_invocation() {
                ii.record_yield_site(target, cloned.clone());
            }
            ii.host_cfg_mut().block_mut(target)?.add_instr(cloned);
        }
        Ok(target)
    }

    /// Clone into the renamed target block for closure duplication
    pub fn clone_for_block_cloning(&self, ii: &mut InlinerInfo<'_>) -> Result<BlockId> {
        let target = ii.get_or_create_renamed_bb(self)?;
        for instr in self.instrs() {
            if let Some(cloned) = instr.clone_for_block_cloning(ii)? {
                ii.host_cfg_mut().block_mut(target)?.add_instr(cloned);
            }
        }
        Ok(target)
    }

    /// Move this block into the host graph and rewrite it for the host scope
    ///
    /// The block gets a fresh id from the host graph and a label allocated by
    /// the host. Every variable it mentions is renamed before any instruction
    /// is cloned, so all references agree on one target.
    pub fn migrate_to_host_scope(mut self, ii: &mut InlinerInfo<'_>) -> Result<BlockId> {
        let source = self.id();
        let label = ii.rename_label(self.label())?;
        let instrs = self.take_instrs();
        self.set_label(label);

        let target = ii.host_cfg_mut().add_basic_block(self)?;
        ii.record_migrated_block(source, target)?;

        for instr in &instrs {
            for operand in instr.operands() {
                if let Operand::Variable(var) = operand {
                    ii.rename_variable(&var)?;
                }
            }
            if let Some(result) = instr.result() {
                ii.rename_variable(result)?;
            }
        }

        let mut migrated = Vec::with_capacity(instrs.len());
        for instr in &instrs {
            if let Some(cloned) = instr.clone_for_inlined_closure(ii)? {
                migrated.push(cloned);
            }
        }
        debug!(
            "Migrated block {} as {}: {} of {} instructions kept",
            source,
            target,
            migrated.len(),
            instrs.len()
        );
        ii.host_cfg_mut().block_mut(target)?.replace_instrs(migrated);
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::domain::Cfg;
    use crate::features::inlining::domain::{CallBinding, YieldBinding};
    use crate::features::inlining::infrastructure::IrScope;
    use crate::features::inlining::ports::HostScope;
    use crate::features::instructions::domain::Instr;
    use crate::shared::models::{Label, Variable};

    fn call_binding() -> CallBinding {
        CallBinding {
            receiver: Variable::local("obj", 1).into(),
            args: Vec::new(),
            closure: None,
            result: None,
        }
    }

    #[test]
    fn test_dropped_clones_leave_survivors_in_order() {
        let mut callee = Cfg::new();
        let id = callee.create_block(Label::new("_LABEL_0")).unwrap();
        {
            let bb = callee.block_mut(id).unwrap();
            bb.add_instr(Instr::copy(Variable::temporary(0), Variable::local("a", 1)));
            bb.add_instr(Instr::Nop);
            bb.add_instr(Instr::copy(Variable::temporary(1), Variable::local("b", 1)));
            bb.add_instr(Instr::Nop);
            bb.add_instr(Instr::copy(Variable::temporary(2), Variable::local("c", 1)));
        }

        let mut host = IrScope::method("host");
        let mut ii = InlinerInfo::for_method(&mut host, call_binding());
        let target = callee.block(id).unwrap().clone_for_inlined_method(&mut ii).unwrap();

        let expected: Vec<Variable> = (0..3)
            .map(|n| ii.renamed_variable(&Variable::temporary(n)).unwrap().clone())
            .collect();
        let cloned = ii.host_cfg().block(target).unwrap();
        let results: Vec<Variable> = cloned.instrs().iter().filter_map(|i| i.result().cloned()).collect();
        assert_eq!(cloned.len(), 3);
        assert_eq!(results, expected);
        assert_eq!(callee.block(id).unwrap().len(), 5);
    }

    #[test]
    fn test_closure_invocations_are_recorded() {
        let mut callee = Cfg::new();
        let id = callee.create_block(Label::new("_LABEL_0")).unwrap();
        callee.block_mut(id).unwrap().add_instr(Instr::Yield {
            result: None,
            block: Variable::local("blk", 1).into(),
            arg: None,
        });

        let mut host = IrScope::method("host");
        let mut ii = InlinerInfo::for_method(&mut host, call_binding());
        let target = callee.block(id).unwrap().clone_for_inlined_method(&mut ii).unwrap();

        assert_eq!(ii.yield_sites().len(), 1);
        assert_eq!(ii.yield_sites()[0].0, target);
    }

    #[test]
    fn test_block_cloning_records_no_sites() {
        let mut source = Cfg::new();
        let id = source.create_block(Label::new("_LABEL_0")).unwrap();
        source.block_mut(id).unwrap().add_instr(Instr::Yield {
            result: None,
            block: Variable::local("blk", 2).into(),
            arg: None,
        });

        let mut host = IrScope::closure("copy");
        let mut ii = InlinerInfo::for_closure_clone(&mut host);
        let target = source.block(id).unwrap().clone_for_block_cloning(&mut ii).unwrap();

        assert!(ii.yield_sites().is_empty());
        assert_eq!(ii.host_cfg().block(target).unwrap().len(), 1);
    }

    #[test]
    fn test_migration_renumbers_and_shifts_depth() {
        let mut closure = Cfg::new();
        let _filler = closure.create_block(Label::new("_LABEL_0")).unwrap();
        let id = closure.create_block(Label::new("_LABEL_1")).unwrap();
        closure
            .block_mut(id)
            .unwrap()
            .add_instr(Instr::copy(Variable::local("a", 3), Variable::local("b", 1)));

        let mut host = IrScope::method("host");
        let existing = host.cfg_mut().create_block(Label::new("_host_entry")).unwrap();
        let mut ii = InlinerInfo::for_closure_inline(
            &mut host,
            YieldBinding {
                arg: None,
                result: None,
            },
        );

        let bb = closure.remove_block(id).unwrap();
        let target = bb.migrate_to_host_scope(&mut ii).unwrap();

        assert_eq!(target.graph(), ii.host_cfg().id());
        assert_ne!(target, existing);
        assert_eq!(ii.renamed_block(id), Some(target));
        assert_eq!(
            ii.host_cfg().block(target).unwrap().instrs(),
            &[Instr::copy(Variable::local("a", 2), Variable::local("b", 1))]
        );
    }
}
