//! IR scope: a method or closure body together with its CFG
//!
//! Implements the `HostScope` allocation port. Temporaries and labels come
//! from per-scope counters; a label already bound in the scope's graph is
//! skipped.

use rustc_hash::FxHashSet;

use crate::features::flow_graph::domain::Cfg;
use crate::features::inlining::ports::HostScope;
use crate::shared::models::{Label, LocalVariable, Variable};

/// Kind of compiled unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Method,
    Closure,
}

#[derive(Debug)]
pub struct IrScope {
    name: String,
    kind: ScopeKind,
    cfg: Cfg,
    locals: FxHashSet<LocalVariable>,
    next_temp: u32,
    next_label: u32,
}

impl IrScope {
    pub fn new(name: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            cfg: Cfg::new(),
            locals: FxHashSet::default(),
            next_temp: 0,
            next_label: 0,
        }
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, ScopeKind::Method)
    }

    pub fn closure(name: impl Into<String>) -> Self {
        Self::new(name, ScopeKind::Closure)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Locals referenced through `local_variable`, in no particular order
    pub fn local_variables(&self) -> impl Iterator<Item = &LocalVariable> {
        self.locals.iter()
    }

    pub fn into_cfg(self) -> Cfg {
        self.cfg
    }
}

impl HostScope for IrScope {
    fn local_variable(&mut self, name: &str, depth: u32) -> Variable {
        let local = LocalVariable::new(name, depth);
        self.locals.insert(local.clone());
        Variable::Local(local)
    }

    fn new_temporary_variable(&mut self) -> Variable {
        let var = Variable::temporary(self.next_temp);
        self.next_temp += 1;
        var
    }

    fn new_label(&mut self) -> Label {
        loop {
            let label = Label::new(&format!("_LABEL_{}", self.next_label));
            self.next_label += 1;
            // skip labels already bound by blocks created outside the allocator
            if self.cfg.block_by_label(&label).is_none() {
                return label;
            }
        }
    }

    fn cfg(&self) -> &Cfg {
        &self.cfg
    }

    fn cfg_mut(&mut self) -> &mut Cfg {
        &mut self.cfg
    }
}
