//! IR instruction set
//!
//! A closed sum type: every consumer matches exhaustively, so adding a variant
//! forces each clone capability to say what happens to it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::{Label, Operand, Variable};

/// IR instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instr {
    /// `result = source`
    Copy { result: Variable, source: Operand },

    /// Method call, optionally passing a closure
    Call {
        result: Option<Variable>,
        receiver: Operand,
        method: String,
        args: Vec<Operand>,
        closure: Option<Operand>,
    },

    /// Closure invocation
    Yield {
        result: Option<Variable>,
        block: Operand,
        arg: Option<Operand>,
    },

    /// Binds `self` on scope entry
    ReceiveSelf { result: Variable },

    /// Binds positional argument `index` on scope entry
    ReceiveArgument { result: Variable, index: usize },

    /// Binds the passed closure on scope entry
    ReceiveClosure { result: Variable },

    /// Method return
    Return { value: Operand },

    /// Closure return (value of the yield that invoked the closure)
    ClosureReturn { value: Operand },

    Jump { target: Label },

    /// Jump to `target` when `condition` is truthy, fall through otherwise
    Branch { condition: Operand, target: Label },

    Nop,
}

impl Instr {
    pub fn copy(result: Variable, source: impl Into<Operand>) -> Self {
        Instr::Copy {
            result,
            source: source.into(),
        }
    }

    pub fn jump(target: Label) -> Self {
        Instr::Jump { target }
    }

    /// Operands read by this instruction, in order
    pub fn operands(&self) -> Vec<Operand> {
        match self {
            Instr::Copy { source, .. } => vec![source.clone()],
            Instr::Call {
                receiver,
                args,
                closure,
                ..
            } => {
                let mut operands = Vec::with_capacity(args.len() + 2);
                operands.push(receiver.clone());
                operands.extend(args.iter().cloned());
                operands.extend(closure.iter().cloned());
                operands
            }
            Instr::Yield { block, arg, .. } => {
                let mut operands = vec![block.clone()];
                operands.extend(arg.iter().cloned());
                operands
            }
            Instr::ReceiveSelf { .. }
            | Instr::ReceiveArgument { .. }
            | Instr::ReceiveClosure { .. }
            | Instr::Nop => Vec::new(),
            Instr::Return { value } | Instr::ClosureReturn { value } => vec![value.clone()],
            Instr::Jump { target } => vec![Operand::Label(target.clone())],
            Instr::Branch { condition, target } => {
                vec![condition.clone(), Operand::Label(target.clone())]
            }
        }
    }

    /// Destination variable of result-producing instructions
    pub fn result(&self) -> Option<&Variable> {
        match self {
            Instr::Copy { result, .. }
            | Instr::ReceiveSelf { result }
            | Instr::ReceiveArgument { result, .. }
            | Instr::ReceiveClosure { result } => Some(result),
            Instr::Call { result, .. } | Instr::Yield { result, .. } => result.as_ref(),
            Instr::Return { .. }
            | Instr::ClosureReturn { .. }
            | Instr::Jump { .. }
            | Instr::Branch { .. }
            | Instr::Nop => None,
        }
    }

    pub fn is_closure_invocation(&self) -> bool {
        matches!(self, Instr::Yield { .. })
    }

    /// Jump target of control transfer instructions
    pub fn jump_target(&self) -> Option<&Label> {
        match self {
            Instr::Jump { target } | Instr::Branch { target, .. } => Some(target),
            _ => None,
        }
    }
}

fn write_result(f: &mut fmt::Formatter<'_>, result: Option<&Variable>) -> fmt::Result {
    match result {
        Some(var) => write!(f, "{} = ", var),
        None => Ok(()),
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_result(f, self.result())?;
        match self {
            Instr::Copy { source, .. } => write!(f, "copy({})", source),
            Instr::Call {
                receiver,
                method,
                args,
                closure,
                ..
            } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "call({}, {}, [{}]", method, receiver, args.join(", "))?;
                if let Some(closure) = closure {
                    write!(f, ", &{}", closure)?;
                }
                f.write_str(")")
            }
            Instr::Yield { block, arg, .. } => match arg {
                Some(arg) => write!(f, "yield({}, {})", block, arg),
                None => write!(f, "yield({})", block),
            },
            Instr::ReceiveSelf { .. } => f.write_str("recv_self"),
            Instr::ReceiveArgument { index, .. } => write!(f, "recv_arg({})", index),
            Instr::ReceiveClosure { .. } => f.write_str("recv_closure"),
            Instr::Return { value } => write!(f, "return({})", value),
            Instr::ClosureReturn { value } => write!(f, "closure_return({})", value),
            Instr::Jump { target } => write!(f, "jump {}", target),
            Instr::Branch { condition, target } => write!(f, "b_true({}, {})", condition, target),
            Instr::Nop => f.write_str("nop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Literal;

    #[test]
    fn test_call_operands_in_order() {
        let call = Instr::Call {
            result: Some(Variable::temporary(0)),
            receiver: Variable::local("recv", 1).into(),
            method: "foo".to_string(),
            args: vec![Variable::local("a", 1).into(), Variable::local("b", 1).into()],
            closure: Some(Variable::temporary(3).into()),
        };

        let names: Vec<String> = call.operands().iter().map(|o| o.to_string()).collect();
        assert_eq!(names, vec!["recv(1)", "a(1)", "b(1)", "%v_3"]);
        assert_eq!(call.result(), Some(&Variable::temporary(0)));
    }

    #[test]
    fn test_display() {
        let copy = Instr::copy(Variable::local("x", 1), Literal::fixnum(5));
        assert_eq!(copy.to_string(), "x(1) = copy(5:fixnum)");

        let yield_instr = Instr::Yield {
            result: None,
            block: Variable::temporary(1).into(),
            arg: None,
        };
        assert_eq!(yield_instr.to_string(), "yield(%v_1)");
        assert!(yield_instr.is_closure_invocation());
    }

    #[test]
    fn test_jump_targets() {
        let label = Label::new("_LABEL_2");
        assert_eq!(Instr::jump(label.clone()).jump_target(), Some(&label));
        assert_eq!(Instr::Nop.jump_target(), None);
    }
}
