//! Shared models

mod ids;
mod literal;
mod operand;

pub use ids::{BlockId, CfgId};
pub use literal::{Literal, LiteralKind, OperandId};
pub use operand::{Label, LocalVariable, Operand, TemporaryVariable, Variable};
