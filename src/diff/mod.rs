pub mod engine;
pub mod types;

pub use engine::{DiffEngine, DEFAULT_CONTEXT_LINES};
pub use types::{concat, DiffDocument, DiffLine, DiffLineOrigin, FileDelta, FileStatus, Hunk};
