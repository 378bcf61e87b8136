use super::inventory::{inventory, remote_namespace, Correlation};
use super::source::BranchSource;
use crate::errors::Result;
use serde::Serialize;

/// What deleting one identifier will do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DeletionPlan {
    /// Delete `branch` on the remote only.
    Remote { branch: String },
    /// Delete the local `branch`, then its remote counterpart if one exists.
    Local { branch: String },
}

pub fn plan(identifier: &str, remote: &str) -> DeletionPlan {
    match identifier.strip_prefix(&remote_namespace(remote)) {
        Some(tail) => DeletionPlan::Remote {
            branch: tail.to_string(),
        },
        None => DeletionPlan::Local {
            branch: identifier.to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionOutcome {
    pub branch: String,
    pub locally_deleted: bool,
    pub remotely_deleted: bool,
    pub error: Option<String>,
}

impl DeletionOutcome {
    fn pending(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            locally_deleted: false,
            remotely_deleted: false,
            error: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Delete one branch, never returning an error: failures end up in the outcome.
pub fn delete_one<S: BranchSource + ?Sized>(
    source: &S,
    identifier: &str,
    remote: &str,
    correlation: Correlation,
) -> DeletionOutcome {
    let mut outcome = DeletionOutcome::pending(identifier);

    if let Err(e) = execute(source, identifier, remote, correlation, &mut outcome) {
        log::warn!("Failed to delete '{}': {}", identifier, e);
        outcome.error = Some(e.to_string());
    }

    outcome
}

fn execute<S: BranchSource + ?Sized>(
    source: &S,
    identifier: &str,
    remote: &str,
    correlation: Correlation,
    outcome: &mut DeletionOutcome,
) -> Result<()> {
    match plan(identifier, remote) {
        DeletionPlan::Remote { branch } => {
            log::info!("Deleting remote branch {}/{}", remote, branch);
            source.delete_remote_branch(remote, &branch)?;
            outcome.remotely_deleted = true;
        }
        DeletionPlan::Local { branch } => {
            log::info!("Deleting local branch {}", branch);
            source.delete_local_branch(&branch)?;
            outcome.locally_deleted = true;

            // Deleting the local branch leaves the remote ref in place.
            let counterpart = format!("{}{}", remote_namespace(remote), branch);
            let fresh = inventory(source, remote, correlation)?;
            if fresh.iter().any(|record| record.name == counterpart) {
                log::info!("Cascading to remote branch {}/{}", remote, branch);
                source.delete_remote_branch(remote, &branch)?;
                outcome.remotely_deleted = true;
            } else {
                log::debug!("{} has no remote counterpart", branch);
            }
        }
    }
    Ok(())
}

/// Delete every identifier in order, one at a time.
pub fn delete_many<S: BranchSource + ?Sized>(
    source: &S,
    identifiers: &[String],
    remote: &str,
    correlation: Correlation,
) -> Vec<DeletionOutcome> {
    identifiers.iter().fold(Vec::new(), |mut outcomes, identifier| {
        outcomes.push(delete_one(source, identifier, remote, correlation));
        outcomes
    })
}
