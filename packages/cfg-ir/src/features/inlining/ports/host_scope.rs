use crate::features::flow_graph::domain::Cfg;
use crate::shared::models::{Label, Variable};

/// Allocation interface of the scope that receives transformed code
pub trait HostScope {
    /// Local variable `name` as seen `depth` scopes out from this scope
    fn local_variable(&mut self, name: &str, depth: u32) -> Variable;

    /// Fresh temporary, never handed out before by this scope
    fn new_temporary_variable(&mut self) -> Variable;

    /// Fresh label, never handed out before by this scope
    fn new_label(&mut self) -> Label;

    fn cfg(&self) -> &Cfg;

    fn cfg_mut(&mut self) -> &mut Cfg;
}
