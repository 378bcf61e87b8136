use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Branch '{0}' not found")]
    BranchNotFound(String),

    #[error("Branch '{0}' is not fully merged")]
    NotMerged(String),

    #[error("Cannot delete '{0}': it is the current branch")]
    CurrentBranch(String),

    #[error("Remote '{remote}' rejected deletion of '{branch}': {reason}")]
    RemoteRejected {
        remote: String,
        branch: String,
        reason: String,
    },

    #[error("Selection failed: {0}")]
    Selection(String),

    #[error("{0} branch(es) could not be deleted")]
    Incomplete(usize),
}

pub type Result<T> = std::result::Result<T, SweepError>;
