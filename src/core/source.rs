use crate::errors::Result;

/// Everything the reconciliation core needs from the version-control tool.
///
/// Remote-tracking branches are reported by `list_all_refs` in the
/// `remotes/<remote>/<branch>` form.
pub trait BranchSource {
    fn list_local_branches(&self) -> Result<Vec<String>>;
    fn list_all_refs(&self) -> Result<Vec<String>>;
    fn list_remotes(&self) -> Result<Vec<String>>;
    /// Non-forced: fails when the branch is not fully merged.
    fn delete_local_branch(&self, name: &str) -> Result<()>;
    fn delete_remote_branch(&self, remote: &str, name: &str) -> Result<()>;
    /// Must run once before the inventory is built so stale refs are gone.
    fn fetch_and_prune(&self, remote: &str) -> Result<()>;
}

#[cfg(test)]
pub use mock::{Call, MockBranchSource};
