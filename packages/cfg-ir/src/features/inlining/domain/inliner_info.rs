/*
 * Transformation Context (InlinerInfo)
 *
 * State of one inlining / cloning pass:
 * - host scope and its graph (where new blocks and variables are allocated)
 * - block, variable and label rename maps (get-or-create, injective, append-only)
 * - call / yield bindings used to rewrite scope-entry and return instructions
 * - log of closure-invocation sites discovered while cloning
 *
 * A context must not outlive its pass: reusing the maps for an unrelated
 * pass would silently resolve to stale targets.
 */

use tracing::trace;

use super::rename_map::RenameMap;
use crate::errors::Result;
use crate::features::flow_graph::domain::{BasicBlock, Cfg};
use crate::features::inlining::ports::HostScope;
use crate::features::instructions::domain::Instr;
use crate::shared::models::{BlockId, Label, Operand, Variable};

/// Which transformation the context drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// Called method body inlined at a call site
    InlineMethod,
    /// Closure body duplicated into another closure of the same nesting
    CloneClosure,
    /// Closure body migrated into the scope that invokes it
    InlineClosure,
}

/// Operands of the call being inlined, in host terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallBinding {
    pub receiver: Operand,
    pub args: Vec<Operand>,
    pub closure: Option<Operand>,
    pub result: Option<Variable>,
}

impl CallBinding {
    /// Binding for a `Call` instruction, `None` for anything else
    pub fn from_call(instr: &Instr) -> Option<Self> {
        match instr {
            Instr::Call {
                result,
                receiver,
                args,
                closure,
                ..
            } => Some(Self {
                receiver: receiver.clone(),
                args: args.clone(),
                closure: closure.clone(),
                result: result.clone(),
            }),
            _ => None,
        }
    }
}

/// Operands of the yield whose closure is being inlined, in host terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldBinding {
    pub arg: Option<Operand>,
    pub result: Option<Variable>,
}

impl YieldBinding {
    /// Binding for a `Yield` instruction, `None` for anything else
    pub fn from_yield(instr: &Instr) -> Option<Self> {
        match instr {
            Instr::Yield { result, arg, .. } => Some(Self {
                arg: arg.clone(),
                result: result.clone(),
            }),
            _ => None,
        }
    }
}

/// Transformation context for one pass
pub struct InlinerInfo<'h> {
    host: &'h mut dyn HostScope,
    kind: TransformKind,
    call: Option<CallBinding>,
    yield_binding: Option<YieldBinding>,
    record_yield_sites: bool,
    bb_rename_map: RenameMap<BlockId, BlockId>,
    var_rename_map: RenameMap<Variable, Variable>,
    label_rename_map: RenameMap<Label, Label>,
    yield_sites: Vec<(BlockId, Instr)>,
}

impl<'h> InlinerInfo<'h> {
    fn new(host: &'h mut dyn HostScope, kind: TransformKind) -> Self {
        Self {
            host,
            kind,
            call: None,
            yield_binding: None,
            record_yield_sites: true,
            bb_rename_map: RenameMap::new(),
            var_rename_map: RenameMap::new(),
            label_rename_map: RenameMap::new(),
            yield_sites: Vec::new(),
        }
    }

    /// Context for inlining a called method at `call`
    pub fn for_method(host: &'h mut dyn HostScope, call: CallBinding) -> Self {
        let mut ii = Self::new(host, TransformKind::InlineMethod);
        ii.call = Some(call);
        ii
    }

    /// Context for duplicating a closure body into `host`
    pub fn for_closure_clone(host: &'h mut dyn HostScope) -> Self {
        Self::new(host, TransformKind::CloneClosure)
    }

    /// Context for migrating a closure body into the scope that yields to it
    pub fn for_closure_inline(host: &'h mut dyn HostScope, binding: YieldBinding) -> Self {
        let mut ii = Self::new(host, TransformKind::InlineClosure);
        ii.yield_binding = Some(binding);
        ii
    }

    pub fn with_yield_site_recording(mut self, enabled: bool) -> Self {
        self.record_yield_sites = enabled;
        self
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }

    pub fn call_binding(&self) -> Option<&CallBinding> {
        self.call.as_ref()
    }

    pub fn yield_binding(&self) -> Option<&YieldBinding> {
        self.yield_binding.as_ref()
    }

    pub fn inline_host_scope(&mut self) -> &mut dyn HostScope {
        &mut *self.host
    }

    pub fn host_cfg(&self) -> &Cfg {
        self.host.cfg()
    }

    pub fn host_cfg_mut(&mut self) -> &mut Cfg {
        self.host.cfg_mut()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Blocks
    // ═══════════════════════════════════════════════════════════════════════

    /// Target block for `source`, created in the host graph on first request
    pub fn get_or_create_renamed_bb(&mut self, source: &BasicBlock) -> Result<BlockId> {
        if let Some(target) = self.bb_rename_map.get(&source.id()) {
            return Ok(*target);
        }
        let label = self.rename_label(source.label())?;
        let target = self.host.cfg_mut().create_block(label)?;
        self.bb_rename_map.insert(source.id(), target)?;
        trace!("Block {} renamed to {}", source.id(), target);
        Ok(target)
    }

    /// Record a block that moved into the host graph under a new id
    pub fn record_migrated_block(&mut self, source: BlockId, target: BlockId) -> Result<()> {
        self.bb_rename_map.insert(source, target)
    }

    pub fn renamed_block(&self, source: BlockId) -> Option<BlockId> {
        self.bb_rename_map.get(&source).copied()
    }

    pub fn block_rename_map(&self) -> &RenameMap<BlockId, BlockId> {
        &self.bb_rename_map
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Variables, labels, operands
    // ═══════════════════════════════════════════════════════════════════════

    fn create_renamed_variable(&mut self, var: &Variable) -> Variable {
        match (self.kind, var) {
            (TransformKind::InlineClosure, Variable::Local(local)) => {
                let depth = if local.scope_depth() > 1 {
                    local.scope_depth() - 1
                } else {
                    1
                };
                self.host.local_variable(local.name(), depth)
            }
            (TransformKind::CloneClosure, Variable::Local(_)) => var.clone(),
            // Temporaries of different scopes never denote the same storage,
            // and a method's locals must not alias the caller's.
            _ => self.host.new_temporary_variable(),
        }
    }

    /// Target variable for `var`; the first reference decides it
    pub fn rename_variable(&mut self, var: &Variable) -> Result<Variable> {
        if let Some(target) = self.var_rename_map.get(var) {
            return Ok(target.clone());
        }
        let target = self.create_renamed_variable(var);
        self.var_rename_map.insert(var.clone(), target.clone())?;
        trace!("Variable {} renamed to {}", var, target);
        Ok(target)
    }

    pub fn renamed_variable(&self, var: &Variable) -> Option<&Variable> {
        self.var_rename_map.get(var)
    }

    pub fn var_rename_map(&self) -> &RenameMap<Variable, Variable> {
        &self.var_rename_map
    }

    /// Target label for `label`, freshly allocated by the host on first request
    pub fn rename_label(&mut self, label: &Label) -> Result<Label> {
        if let Some(target) = self.label_rename_map.get(label) {
            return Ok(target.clone());
        }
        let target = self.host.new_label();
        self.label_rename_map.insert(label.clone(), target.clone())?;
        Ok(target)
    }

    /// Rename variables and labels; literals are shared unchanged
    pub fn rename_operand(&mut self, operand: &Operand) -> Result<Operand> {
        Ok(match operand {
            Operand::Variable(var) => Operand::Variable(self.rename_variable(var)?),
            Operand::Label(label) => Operand::Label(self.rename_label(label)?),
            Operand::Literal(literal) => Operand::Literal(literal.clone()),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Linkage sites
    // ═══════════════════════════════════════════════════════════════════════

    /// Log a cloned closure invocation and the target block holding it
    pub fn record_yield_site(&mut self, block: BlockId, instr: Instr) {
        if self.record_yield_sites {
            self.yield_sites.push((block, instr));
        }
    }

    pub fn yield_sites(&self) -> &[(BlockId, Instr)] {
        &self.yield_sites
    }

    pub fn into_yield_sites(self) -> Vec<(BlockId, Instr)> {
        self.yield_sites
    }
}
