//! Operand model: variables, labels and literals referenced by instructions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::literal::Literal;

/// Named local variable
///
/// `scope_depth` counts the lexical scopes between the use site and the
/// declaring scope, starting at 1 for the variable's own scope. The same
/// name at two depths names two distinct variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalVariable {
    name: Arc<str>,
    scope_depth: u32,
}

impl LocalVariable {
    pub fn new(name: &str, scope_depth: u32) -> Self {
        Self {
            name: Arc::from(name),
            scope_depth: scope_depth.max(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope_depth(&self) -> u32 {
        self.scope_depth
    }
}

/// Compiler-introduced storage, unique within the scope that allocated it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporaryVariable {
    index: u32,
}

impl TemporaryVariable {
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Variable operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    Local(LocalVariable),
    Temporary(TemporaryVariable),
}

impl Variable {
    pub fn local(name: &str, scope_depth: u32) -> Self {
        Variable::Local(LocalVariable::new(name, scope_depth))
    }

    pub fn temporary(index: u32) -> Self {
        Variable::Temporary(TemporaryVariable::new(index))
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Variable::Local(_))
    }

    pub fn as_local(&self) -> Option<&LocalVariable> {
        match self {
            Variable::Local(local) => Some(local),
            Variable::Temporary(_) => None,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Local(local) => write!(f, "{}({})", local.name, local.scope_depth),
            Variable::Temporary(temp) => write!(f, "%v_{}", temp.index),
        }
    }
}

/// Jump target, bound to exactly one basic block of a graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(Arc<str>);

impl Label {
    pub fn new(name: &str) -> Self {
        Label(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Instruction operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    Variable(Variable),
    Label(Label),
    Literal(Literal),
}

impl Operand {
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Operand::Variable(var) => Some(var),
            _ => None,
        }
    }
}

impl From<Variable> for Operand {
    fn from(var: Variable) -> Self {
        Operand::Variable(var)
    }
}

impl From<Label> for Operand {
    fn from(label: Label) -> Self {
        Operand::Label(label)
    }
}

impl From<Literal> for Operand {
    fn from(literal: Literal) -> Self {
        Operand::Literal(literal)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Variable(var) => var.fmt(f),
            Operand::Label(label) => label.fmt(f),
            Operand::Literal(literal) => literal.fmt(f),
        }
    }
}
