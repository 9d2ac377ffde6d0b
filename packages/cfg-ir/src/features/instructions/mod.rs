//! Instruction set
//!
//! A closed sum type; the clone capabilities in `infrastructure` match it
//! exhaustively, so a new instruction kind cannot be added without deciding
//! how it is cloned.

pub mod domain;
pub mod infrastructure;

pub use domain::Instr;
