// Git related

use crate::{
    config::SweepConfig,
    core::BranchSource,
    errors::{Result, SweepError},
};
use auth_git2::GitAuthenticator;
use git2::{
    BranchType, ErrorCode, FetchOptions, FetchPrune, PushOptions, ReferenceType, RemoteCallbacks,
    Repository,
};
use std::path::Path;

pub struct Git {
    pub repo: Repository,
    pub config: SweepConfig,
    auth: GitAuthenticator,
}

impl Git {
    /// Open the repository containing `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let config = SweepConfig::from_git_config(&repo.config()?);
        log::debug!("opened {} with {:?}", repo.path().display(), config);
        Ok(Self {
            repo,
            config,
            auth: GitAuthenticator::default(),
        })
    }

    fn remote_callbacks<'a>(&'a self, config: &'a git2::Config) -> RemoteCallbacks<'a> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(self.auth.credentials(config));
        callbacks
    }
}

impl BranchSource for Git {
    fn list_local_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn list_all_refs(&self) -> Result<Vec<String>> {
        let mut refs = Vec::new();
        for branch in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = branch?;
            // origin/HEAD points at another branch, it is not one itself
            if branch.get().kind() == Some(ReferenceType::Symbolic) {
                continue;
            }
            if let Some(name) = branch.name()? {
                refs.push(format!("remotes/{}", name));
            }
        }
        log::debug!("remote refs: {:?}", refs);
        Ok(refs)
    }

    fn list_remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes.iter().flatten().map(|name| name.to_string()).collect())
    }

    fn delete_local_branch(&self, name: &str) -> Result<()> {
        let mut branch = match self.repo.find_branch(name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(SweepError::BranchNotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        if branch.is_head() {
            return Err(SweepError::CurrentBranch(name.to_string()));
        }

        // Merged means reachable from HEAD
        let branch_commit = branch.get().peel_to_commit()?.id();
        let head_commit = self.repo.head()?.peel_to_commit()?.id();
        let is_merged = branch_commit == head_commit
            || self.repo.graph_descendant_of(head_commit, branch_commit)?;
        if !is_merged {
            return Err(SweepError::NotMerged(name.to_string()));
        }

        branch.delete()?;
        log::debug!("deleted refs/heads/{}", name);
        Ok(())
    }

    fn delete_remote_branch(&self, remote: &str, name: &str) -> Result<()> {
        let mut remote_handle = self.repo.find_remote(remote)?;
        let config = self.repo.config()?;
        let refspec = format!(":refs/heads/{}", name);

        let mut rejection: Option<String> = None;
        {
            let mut callbacks = self.remote_callbacks(&config);
            callbacks.push_update_reference(|_refname, status| {
                if let Some(status) = status {
                    rejection = Some(status.to_string());
                }
                Ok(())
            });
            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);

            log::debug!("pushing {} to {}", refspec, remote);
            remote_handle.push(&[refspec.as_str()], Some(&mut options))?;
        }

        if let Some(reason) = rejection {
            return Err(SweepError::RemoteRejected {
                remote: remote.to_string(),
                branch: name.to_string(),
                reason,
            });
        }

        // The push does not always drop the remote-tracking ref
        let tracking = format!("refs/remotes/{}/{}", remote, name);
        if let Ok(mut reference) = self.repo.find_reference(&tracking) {
            reference.delete()?;
            log::debug!("deleted {}", tracking);
        }

        Ok(())
    }

    fn fetch_and_prune(&self, remote: &str) -> Result<()> {
        let mut remote_handle = self.repo.find_remote(remote)?;
        let config = self.repo.config()?;

        let mut options = FetchOptions::new();
        options
            .remote_callbacks(self.remote_callbacks(&config))
            .prune(FetchPrune::On);

        log::info!("Fetching {} with prune", remote);
        remote_handle.fetch(&[] as &[&str], Some(&mut options), None)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{delete_many, inventory, BranchRecord, Correlation};
    use git2::{Oid, Signature};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Fixture {
        _remote_dir: TempDir,
        local_dir: TempDir,
        remote: Repository,
        main: String,
    }

    fn signature() -> Signature<'static> {
        Signature::now("Test User", "test@example.com").unwrap()
    }

    fn commit_on(repo: &Repository, reference: &str, message: &str, parent: Oid) -> Oid {
        let parent = repo.find_commit(parent).unwrap();
        let tree = parent.tree().unwrap();
        repo.commit(Some(reference), &signature(), &signature(), message, &tree, &[&parent])
            .unwrap()
    }

    /// A local repository with `origin` pointing at a bare repository.
    ///
    /// Branches `tmp` and `shared` are pushed, `solo` stays local and `wip`
    /// carries a commit that HEAD does not have.
    fn setup() -> Fixture {
        let remote_dir = TempDir::new().unwrap();
        let local_dir = TempDir::new().unwrap();
        let remote = Repository::init_bare(remote_dir.path()).unwrap();
        let repo = Repository::init(local_dir.path()).unwrap();

        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let root = repo
            .commit(Some("HEAD"), &signature(), &signature(), "Initial commit", &tree, &[])
            .unwrap();
        let main = repo.head().unwrap().shorthand().unwrap().to_string();

        let root_commit = repo.find_commit(root).unwrap();
        for name in ["tmp", "shared", "solo"] {
            repo.branch(name, &root_commit, false).unwrap();
        }
        commit_on(&repo, "refs/heads/wip", "Work in progress", root);

        let url = remote_dir.path().to_str().unwrap().to_string();
        let mut origin = repo.remote("origin", &url).unwrap();
        let refspecs: Vec<String> = [main.as_str(), "tmp", "shared", "wip"]
            .iter()
            .map(|name| format!("refs/heads/{0}:refs/heads/{0}", name))
            .collect();
        let refspecs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();
        origin.push(&refspecs, None).unwrap();

        Fixture {
            _remote_dir: remote_dir,
            local_dir,
            remote,
            main,
        }
    }

    fn open(fixture: &Fixture) -> Git {
        let git = Git::open(fixture.local_dir.path()).unwrap();
        git.fetch_and_prune("origin").unwrap();
        git
    }

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort();
        values
    }

    #[test]
    fn test_lists_local_branches_and_remote_refs() {
        let fixture = setup();
        let git = open(&fixture);

        assert_eq!(
            sorted(git.list_local_branches().unwrap()),
            sorted(vec![
                fixture.main.clone(),
                "shared".to_string(),
                "solo".to_string(),
                "tmp".to_string(),
                "wip".to_string(),
            ])
        );
        assert_eq!(
            sorted(git.list_all_refs().unwrap()),
            sorted(vec![
                format!("remotes/origin/{}", fixture.main),
                "remotes/origin/shared".to_string(),
                "remotes/origin/tmp".to_string(),
                "remotes/origin/wip".to_string(),
            ])
        );
        assert_eq!(git.list_remotes().unwrap(), vec!["origin".to_string()]);
    }

    #[test]
    fn test_delete_local_branch_refuses_unmerged() {
        let fixture = setup();
        let git = open(&fixture);

        let err = git.delete_local_branch("wip").unwrap_err();
        assert!(matches!(err, SweepError::NotMerged(ref name) if name == "wip"));
        assert!(git.list_local_branches().unwrap().contains(&"wip".to_string()));
    }

    #[test]
    fn test_delete_local_branch_errors() {
        let fixture = setup();
        let git = open(&fixture);

        assert!(matches!(
            git.delete_local_branch("nope").unwrap_err(),
            SweepError::BranchNotFound(_)
        ));
        assert!(matches!(
            git.delete_local_branch(&fixture.main).unwrap_err(),
            SweepError::CurrentBranch(_)
        ));
    }

    #[test]
    fn test_delete_local_branch_keeps_remote() {
        let fixture = setup();
        let git = open(&fixture);

        git.delete_local_branch("tmp").unwrap();

        assert!(!git.list_local_branches().unwrap().contains(&"tmp".to_string()));
        assert!(git
            .list_all_refs()
            .unwrap()
            .contains(&"remotes/origin/tmp".to_string()));
    }

    #[test]
    fn test_delete_remote_branch() {
        let fixture = setup();
        let git = open(&fixture);

        git.delete_remote_branch("origin", "shared").unwrap();

        assert!(fixture.remote.find_reference("refs/heads/shared").is_err());
        assert!(!git
            .list_all_refs()
            .unwrap()
            .contains(&"remotes/origin/shared".to_string()));
        assert!(git.list_local_branches().unwrap().contains(&"shared".to_string()));
    }

    #[test]
    fn test_fetch_and_prune_drops_stale_refs() {
        let fixture = setup();
        let git = open(&fixture);

        fixture
            .remote
            .find_reference("refs/heads/tmp")
            .unwrap()
            .delete()
            .unwrap();
        git.fetch_and_prune("origin").unwrap();

        assert!(!git
            .list_all_refs()
            .unwrap()
            .contains(&"remotes/origin/tmp".to_string()));
    }

    #[test]
    fn test_fetch_unknown_remote_fails() {
        let fixture = setup();
        let git = open(&fixture);

        assert!(git.fetch_and_prune("upstream").is_err());
    }

    #[test]
    fn test_delete_many_against_repository() {
        let fixture = setup();
        let git = open(&fixture);

        let outcomes = delete_many(
            &git,
            &[
                "tmp".to_string(),
                "solo".to_string(),
                "wip".to_string(),
                "remotes/origin/shared".to_string(),
            ],
            "origin",
            Correlation::Exact,
        );

        assert!(outcomes[0].locally_deleted && outcomes[0].remotely_deleted);
        assert!(outcomes[1].locally_deleted && !outcomes[1].remotely_deleted);
        assert!(outcomes[2].is_failure());
        assert!(!outcomes[3].locally_deleted && outcomes[3].remotely_deleted);
        assert!(fixture.remote.find_reference("refs/heads/tmp").is_err());
        assert!(fixture.remote.find_reference("refs/heads/wip").is_ok());

        let records = inventory(&git, "origin", Correlation::Exact).unwrap();
        assert_eq!(
            records,
            vec![
                BranchRecord {
                    name: fixture.main.clone(),
                    is_remote_tracked: true,
                },
                BranchRecord {
                    name: "shared".to_string(),
                    is_remote_tracked: false,
                },
                BranchRecord {
                    name: "wip".to_string(),
                    is_remote_tracked: true,
                },
            ]
        );
    }
}
