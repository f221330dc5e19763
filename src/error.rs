use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a diff action.
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("at least two folders are needed to compare, found {found}")]
    EmptyFolderSet { found: usize },

    #[error("folder selection was cancelled")]
    PromptCancelled,

    #[error("no folder named {name:?} in this workspace")]
    FolderNotFound { name: String },

    #[error("both selections resolve to the same folder {name:?}")]
    SameFolderSelected { name: String },

    #[error("request {name:?} has no counterpart in the second folder")]
    UnmatchedRequest { name: String },

    #[error("request {name:?} failed: {message}")]
    RequestExecution { name: String, message: String },

    #[error("could not read response body of {name:?} from {}", path.display())]
    BodyRead {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("exactly two requests must be selected, got {found}")]
    RequestCountMismatch { found: usize },

    #[error("no request pairs left to compare")]
    NothingToCompare,

    #[error("workspace export failed: {message}")]
    Export { message: String },

    #[error("prompt failed: {message}")]
    Prompt { message: String },

    #[error("could not open report window: {message}")]
    Window { message: String },

    #[error("export is not valid JSON")]
    ExportParse(#[from] serde_json::Error),

    #[error("resource #{index} is invalid: {reason}")]
    InvalidResource { index: usize, reason: String },

    #[error("resource id {id:?} appears more than once")]
    DuplicateId { id: String },

    #[error("resource {id:?} points at missing parent {parent_id:?}")]
    DanglingParent { id: String, parent_id: String },
}

impl DiffError {
    /// True when the user backed out; callers abort without reporting a fault.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, DiffError::PromptCancelled)
    }
}

pub type Result<T, E = DiffError> = std::result::Result<T, E>;
