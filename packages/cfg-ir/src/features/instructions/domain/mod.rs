mod instr;

pub use instr::Instr;
