//! Test data builders

use cfg_ir::{BlockId, EdgeKind, HostScope, Instr, IrScope};

/// Builder for a scope with a hand-written block graph
///
/// Blocks are referred to by their position in the builder; labels come
/// from the scope so later allocations never collide with them.
#[derive(Debug)]
pub struct ScopeBuilder {
    scope: IrScope,
    blocks: Vec<BlockId>,
}

impl ScopeBuilder {
    pub fn method(name: &str) -> Self {
        Self {
            scope: IrScope::method(name),
            blocks: Vec::new(),
        }
    }

    pub fn closure(name: &str) -> Self {
        Self {
            scope: IrScope::closure(name),
            blocks: Vec::new(),
        }
    }

    /// Add a block holding `instrs`
    pub fn block(mut self, instrs: Vec<Instr>) -> Self {
        let label = self.scope.new_label();
        let id = self.scope.cfg_mut().create_block(label).unwrap();
        for instr in instrs {
            self.scope.cfg_mut().block_mut(id).unwrap().add_instr(instr);
        }
        self.blocks.push(id);
        self
    }

    pub fn edge(mut self, from: usize, to: usize, kind: EdgeKind) -> Self {
        let (source, destination) = (self.blocks[from], self.blocks[to]);
        self.scope
            .cfg_mut()
            .add_edge(source, destination, kind)
            .unwrap();
        self
    }

    pub fn entry(mut self, index: usize) -> Self {
        let id = self.blocks[index];
        self.scope.cfg_mut().set_entry(id).unwrap();
        self
    }

    pub fn exit(mut self, index: usize) -> Self {
        let id = self.blocks[index];
        self.scope.cfg_mut().set_exit(id).unwrap();
        self
    }

    /// Finish; block ids are returned in insertion order
    pub fn build(self) -> (IrScope, Vec<BlockId>) {
        (self.scope, self.blocks)
    }
}
