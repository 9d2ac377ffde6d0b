//! Literal-operand cache keyed by stable operand ids

mod cache;

pub use cache::{LiteralCache, LiteralCacheStats};
