use super::source::BranchSource;
use crate::errors::Result;
use serde::Serialize;
use std::str::FromStr;

/// One entry of the reconciled inventory.
///
/// `name` is a bare local branch name, or the fully-qualified
/// `remotes/<remote>/<branch>` form when the branch only exists on the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRecord {
    pub name: String,
    pub is_remote_tracked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    Local,
    Tracked,
    Remote,
}

impl BranchRecord {
    pub fn locality(&self, remote: &str) -> Locality {
        if self.name.starts_with(&remote_namespace(remote)) {
            Locality::Remote
        } else if self.is_remote_tracked {
            Locality::Tracked
        } else {
            Locality::Local
        }
    }
}

/// How a local branch is matched against remote-tracking refs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Correlation {
    /// The remote ref ends with the local name. `x/bar` matches
    /// `remotes/origin/foo/x/bar`, and `bar` matches `remotes/origin/foobar`.
    #[default]
    Suffix,
    /// The remote ref is exactly `remotes/<remote>/<local>`.
    Exact,
}

impl Correlation {
    pub fn matches(&self, namespace: &str, remote_ref: &str, local: &str) -> bool {
        match self {
            Correlation::Suffix => remote_ref.ends_with(local),
            Correlation::Exact => remote_ref
                .strip_prefix(namespace)
                .is_some_and(|tail| tail == local),
        }
    }
}

impl FromStr for Correlation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suffix" => Ok(Correlation::Suffix),
            "exact" => Ok(Correlation::Exact),
            other => Err(format!("unknown correlation mode '{}'", other)),
        }
    }
}

pub fn remote_namespace(remote: &str) -> String {
    format!("remotes/{}/", remote)
}

/// Correlate local names with the refs of one remote.
///
/// Local records come first in input order, followed by the remote refs that
/// matched no local name, also in input order.
pub fn build_inventory(
    remote: &str,
    local_names: &[String],
    remote_refs: &[String],
    correlation: Correlation,
) -> Vec<BranchRecord> {
    let namespace = remote_namespace(remote);
    let namespace_refs: Vec<&String> = remote_refs
        .iter()
        .filter(|reference| reference.starts_with(&namespace))
        .collect();

    let mut records: Vec<BranchRecord> = local_names
        .iter()
        .map(|local| BranchRecord {
            name: local.clone(),
            is_remote_tracked: namespace_refs
                .iter()
                .any(|reference| correlation.matches(&namespace, reference, local)),
        })
        .collect();

    for reference in namespace_refs {
        let has_local = local_names
            .iter()
            .any(|local| correlation.matches(&namespace, reference, local));
        if !has_local {
            log::debug!("{} has no local counterpart", reference);
            records.push(BranchRecord {
                name: reference.clone(),
                is_remote_tracked: true,
            });
        }
    }

    records
}

/// Query the source and build a fresh inventory for `remote`.
pub fn inventory<S: BranchSource + ?Sized>(
    source: &S,
    remote: &str,
    correlation: Correlation,
) -> Result<Vec<BranchRecord>> {
    let local = source.list_local_branches()?;
    let refs = source.list_all_refs()?;
    log::debug!("{} local branches, {} refs", local.len(), refs.len());
    Ok(build_inventory(remote, &local, &refs, correlation))
}
