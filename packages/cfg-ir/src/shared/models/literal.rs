//! Literal operands
//!
//! Every literal carries an `OperandId` assigned at construction. Clones of a
//! literal (copy propagation, block cloning, serialization round trips) keep
//! the id, so per-context caches keyed by it treat them as the same literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OPERAND_ID: AtomicU64 = AtomicU64::new(1);

/// Stable structural identity of a literal operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperandId(u64);

impl OperandId {
    fn fresh() -> Self {
        OperandId(NEXT_OPERAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Literal value kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    Fixnum(i64),
    /// Arbitrary precision integer, kept as its decimal digits
    Bignum(String),
    Str(String),
    Symbol(String),
    Nil,
    True,
    False,
}

/// Immutable literal operand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    id: OperandId,
    kind: LiteralKind,
}

impl Literal {
    pub fn new(kind: LiteralKind) -> Self {
        Self {
            id: OperandId::fresh(),
            kind,
        }
    }

    pub fn fixnum(value: i64) -> Self {
        Self::new(LiteralKind::Fixnum(value))
    }

    pub fn bignum(digits: impl Into<String>) -> Self {
        Self::new(LiteralKind::Bignum(digits.into()))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(LiteralKind::Str(value.into()))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::new(LiteralKind::Symbol(name.into()))
    }

    pub fn nil() -> Self {
        Self::new(LiteralKind::Nil)
    }

    pub fn id(&self) -> OperandId {
        self.id
    }

    pub fn kind(&self) -> &LiteralKind {
        &self.kind
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LiteralKind::Fixnum(value) => write!(f, "{}:fixnum", value),
            LiteralKind::Bignum(digits) => write!(f, "{}:bignum", digits),
            LiteralKind::Str(value) => write!(f, "{:?}", value),
            LiteralKind::Symbol(name) => write!(f, ":{}", name),
            LiteralKind::Nil => f.write_str("nil"),
            LiteralKind::True => f.write_str("true"),
            LiteralKind::False => f.write_str("false"),
        }
    }
}
