mod inliner_info;
mod rename_map;

pub use inliner_info::{CallBinding, InlinerInfo, TransformKind, YieldBinding};
pub use rename_map::RenameMap;
