//! Test fixtures
//!
//! Small instruction sequences and scopes shared by the integration tests.

use cfg_ir::{EdgeKind, Instr, IrScope, Literal, Operand, Variable};

use super::builders::ScopeBuilder;

/// Distinct, comparable instruction number `n`
pub fn instr(n: u32) -> Instr {
    Instr::copy(Variable::temporary(n), Variable::local("a", 1))
}

pub fn instrs(count: u32) -> Vec<Instr> {
    (0..count).map(instr).collect()
}

/// `result = receiver.method(args)`
pub fn call(result: Option<Variable>, method: &str, args: Vec<Operand>) -> Instr {
    Instr::Call {
        result,
        receiver: Variable::local("recv", 1).into(),
        method: method.to_string(),
        args,
        closure: None,
    }
}

pub fn yield_to(block: &str, arg: Option<Operand>, result: Option<Variable>) -> Instr {
    Instr::Yield {
        result,
        block: Variable::local(block, 1).into(),
        arg,
    }
}

/// Host method: `[pre] call [post]` in one block that is both entry and exit
pub fn host_with_site(site: Instr) -> (IrScope, cfg_ir::BlockId) {
    let (scope, blocks) = ScopeBuilder::method("caller")
        .block(vec![
            Instr::copy(Variable::local("pre", 1), Literal::fixnum(1)),
            site,
            Instr::copy(Variable::local("post", 1), Variable::local("r", 1)),
        ])
        .entry(0)
        .exit(0)
        .build();
    (scope, blocks[0])
}

/// Callee `def add(x, y)`: entry receives, a body branching to two blocks, exit returns
pub fn add_method() -> IrScope {
    let sum = Variable::temporary(0);
    let (scope, _) = ScopeBuilder::method("add")
        .block(vec![
            Instr::ReceiveSelf {
                result: Variable::local("self", 1),
            },
            Instr::ReceiveArgument {
                result: Variable::local("x", 1),
                index: 0,
            },
            Instr::ReceiveArgument {
                result: Variable::local("y", 1),
                index: 1,
            },
        ])
        .block(vec![Instr::Call {
            result: Some(sum.clone()),
            receiver: Variable::local("x", 1).into(),
            method: "+".to_string(),
            args: vec![Variable::local("y", 1).into()],
            closure: None,
        }])
        .block(vec![Instr::Nop])
        .block(vec![Instr::Return { value: sum.into() }])
        .edge(0, 1, EdgeKind::FallThrough)
        .edge(1, 2, EdgeKind::Regular)
        .edge(1, 3, EdgeKind::Exception)
        .edge(2, 3, EdgeKind::Regular)
        .entry(0)
        .exit(3)
        .build();
    scope
}

/// Closure `{ |item| total = total + item }` nested one level inside its host
pub fn accumulate_closure() -> IrScope {
    let tmp = Variable::temporary(0);
    let (scope, _) = ScopeBuilder::closure("accumulate")
        .block(vec![Instr::ReceiveArgument {
            result: Variable::local("item", 1),
            index: 0,
        }])
        .block(vec![
            Instr::Call {
                result: Some(tmp.clone()),
                receiver: Variable::local("total", 2).into(),
                method: "+".to_string(),
                args: vec![Variable::local("item", 1).into()],
                closure: None,
            },
            Instr::copy(Variable::local("total", 2), tmp.clone()),
            Instr::ClosureReturn { value: tmp.into() },
        ])
        .edge(0, 1, EdgeKind::FallThrough)
        .entry(0)
        .exit(1)
        .build();
    scope
}
