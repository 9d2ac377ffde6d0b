/*
 * Instruction clone capabilities
 *
 * Three ways to copy an instruction into another scope, all driven by an
 * InlinerInfo:
 * - inlined scope:   method body inlined at a call site
 * - block cloning:   closure body duplicated into another closure
 * - inlined closure: closure body migrated into the scope that yields to it
 *
 * `Ok(None)` drops the instruction from the target: scaffolding such as
 * scope-entry bookkeeping that has no meaning once the scope boundary is gone.
 */

use crate::errors::{CfgError, Result};
use crate::features::inlining::domain::{CallBinding, InlinerInfo, YieldBinding};
use crate::features::instructions::domain::Instr;
use crate::shared::models::{Literal, Operand, Variable};

fn rename_opt_var(ii: &mut InlinerInfo<'_>, var: &Option<Variable>) -> Result<Option<Variable>> {
    var.as_ref().map(|v| ii.rename_variable(v)).transpose()
}

fn rename_opt_operand(ii: &mut InlinerInfo<'_>, op: &Option<Operand>) -> Result<Option<Operand>> {
    op.as_ref().map(|o| ii.rename_operand(o)).transpose()
}

fn bound_call(ii: &InlinerInfo<'_>) -> Result<CallBinding> {
    ii.call_binding()
        .cloned()
        .ok_or_else(|| CfgError::invalid_transform("inlined-scope clone requires a call binding"))
}

fn bound_yield(ii: &InlinerInfo<'_>) -> Result<YieldBinding> {
    ii.yield_binding()
        .cloned()
        .ok_or_else(|| CfgError::invalid_transform("inlined-closure clone requires a yield binding"))
}

fn nil() -> Operand {
    Operand::Literal(Literal::nil())
}

impl Instr {
    /// Copy with every variable and label renamed through `ii`
    fn clone_renamed(&self, ii: &mut InlinerInfo<'_>) -> Result<Instr> {
        Ok(match self {
            Instr::Copy { result, source } => Instr::Copy {
                result: ii.rename_variable(result)?,
                source: ii.rename_operand(source)?,
            },
            Instr::Call {
                result,
                receiver,
                method,
                args,
                closure,
            } => Instr::Call {
                result: rename_opt_var(ii, result)?,
                receiver: ii.rename_operand(receiver)?,
                method: method.clone(),
                args: args
                    .iter()
                    .map(|a| ii.rename_operand(a))
                    .collect::<Result<Vec<_>>>()?,
                closure: rename_opt_operand(ii, closure)?,
            },
            Instr::Yield { result, block, arg } => Instr::Yield {
                result: rename_opt_var(ii, result)?,
                block: ii.rename_operand(block)?,
                arg: rename_opt_operand(ii, arg)?,
            },
            Instr::ReceiveSelf { result } => Instr::ReceiveSelf {
                result: ii.rename_variable(result)?,
            },
            Instr::ReceiveArgument { result, index } => Instr::ReceiveArgument {
                result: ii.rename_variable(result)?,
                index: *index,
            },
            Instr::ReceiveClosure { result } => Instr::ReceiveClosure {
                result: ii.rename_variable(result)?,
            },
            Instr::Return { value } => Instr::Return {
                value: ii.rename_operand(value)?,
            },
            Instr::ClosureReturn { value } => Instr::ClosureReturn {
                value: ii.rename_operand(value)?,
            },
            Instr::Jump { target } => Instr::Jump {
                target: ii.rename_label(target)?,
            },
            Instr::Branch { condition, target } => Instr::Branch {
                condition: ii.rename_operand(condition)?,
                target: ii.rename_label(target)?,
            },
            Instr::Nop => Instr::Nop,
        })
    }

    /// Clone for a method body inlined at the call recorded in `ii`
    ///
    /// Scope-entry receives become copies from the call's operands and
    /// returns become copies into the call's result.
    pub fn clone_for_inlined_scope(&self, ii: &mut InlinerInfo<'_>) -> Result<Option<Instr>> {
        match self {
            Instr::ReceiveSelf { result } => {
                let call = bound_call(ii)?;
                Ok(Some(Instr::Copy {
                    result: ii.rename_variable(result)?,
                    source: call.receiver,
                }))
            }
            Instr::ReceiveArgument { result, index } => {
                let call = bound_call(ii)?;
                Ok(Some(Instr::Copy {
                    result: ii.rename_variable(result)?,
                    source: call.args.get(*index).cloned().unwrap_or_else(nil),
                }))
            }
            Instr::ReceiveClosure { result } => {
                let call = bound_call(ii)?;
                Ok(Some(Instr::Copy {
                    result: ii.rename_variable(result)?,
                    source: call.closure.unwrap_or_else(nil),
                }))
            }
            Instr::Return { value } => match bound_call(ii)?.result {
                Some(result) => Ok(Some(Instr::Copy {
                    result,
                    source: ii.rename_operand(value)?,
                })),
                None => Ok(None),
            },
            Instr::Nop => Ok(None),
            Instr::Copy { .. }
            | Instr::Call { .. }
            | Instr::Yield { .. }
            | Instr::ClosureReturn { .. }
            | Instr::Jump { .. }
            | Instr::Branch { .. } => self.clone_renamed(ii).map(Some),
        }
    }

    /// Clone for duplicating a closure body
    pub fn clone_for_block_cloning(&self, ii: &mut InlinerInfo<'_>) -> Result<Option<Instr>> {
        match self {
            Instr::Nop => Ok(None),
            Instr::Copy { .. }
            | Instr::Call { .. }
            | Instr::Yield { .. }
            | Instr::ReceiveSelf { .. }
            | Instr::ReceiveArgument { .. }
            | Instr::ReceiveClosure { .. }
            | Instr::Return { .. }
            | Instr::ClosureReturn { .. }
            | Instr::Jump { .. }
            | Instr::Branch { .. } => self.clone_renamed(ii).map(Some),
        }
    }

    /// Clone for a closure body inlined at the yield recorded in `ii`
    ///
    /// The first positional receive takes the yield's argument, the closure
    /// return becomes a copy into the yield's result. A closure inlined at a
    /// yield is never passed a closure of its own, so its closure receive
    /// becomes nil.
    pub fn clone_for_inlined_closure(&self, ii: &mut InlinerInfo<'_>) -> Result<Option<Instr>> {
        match self {
            Instr::ReceiveArgument { result, index } => {
                let source = match (*index, bound_yield(ii)?.arg) {
                    (0, Some(arg)) => arg,
                    _ => nil(),
                };
                Ok(Some(Instr::Copy {
                    result: ii.rename_variable(result)?,
                    source,
                }))
            }
            Instr::ClosureReturn { value } => match bound_yield(ii)?.result {
                Some(result) => Ok(Some(Instr::Copy {
                    result,
                    source: ii.rename_operand(value)?,
                })),
                None => Ok(None),
            },
            Instr::ReceiveClosure { result } => Ok(Some(Instr::Copy {
                result: ii.rename_variable(result)?,
                source: nil(),
            })),
            Instr::Nop => Ok(None),
            // a closure's self is the host's self
            Instr::ReceiveSelf { .. }
            | Instr::Copy { .. }
            | Instr::Call { .. }
            | Instr::Yield { .. }
            | Instr::Return { .. }
            | Instr::Jump { .. }
            | Instr::Branch { .. } => self.clone_renamed(ii).map(Some),
        }
    }
}
