pub mod export;
pub mod types;

pub use export::{parse_export, workspaces};
pub use types::{ResourceNode, ResourceType};
