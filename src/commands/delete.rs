use super::Scope;
use crate::{
    config::SweepConfig,
    core::{delete_many, inventory, plan, BranchSource, DeletionOutcome, DeletionPlan},
    errors::{Result, SweepError},
    git::Git,
    report::{print_outcomes, print_plans},
    selection::{choose_remote, filter_by_keyword, restrict_to, select_branches, FzfSelector, Selector},
};
use clap::Args;

/// Pick branches and delete them locally, remotely, or both
#[derive(Debug, Args, Default)]
pub struct Delete {
    #[command(flatten)]
    pub scope: Scope,

    /// Delete these branches instead of prompting (repeatable)
    #[arg(long = "branch", short = 'b')]
    pub branches: Vec<String>,

    /// Show what would be deleted and stop
    #[arg(long)]
    pub dry_run: bool,

    /// Print the outcomes as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with an error when any branch could not be deleted
    #[arg(long)]
    pub strict: bool,
}

/// What a delete run ended with.
#[derive(Debug, Default)]
pub struct Sweep {
    pub remote: String,
    /// Set when the run stopped before deleting anything
    pub notice: Option<&'static str>,
    pub planned: Vec<DeletionPlan>,
    pub outcomes: Vec<DeletionOutcome>,
}

impl Delete {
    pub fn execute(&self, git: Git) -> Result<()> {
        let selector = FzfSelector::new();
        let sweep = self.run(&git, &selector, &git.config)?;

        if let Some(notice) = sweep.notice {
            // stdout carries only JSON with --json
            if self.json {
                eprintln!("{}", notice);
            } else {
                println!("{}", notice);
            }
        }

        if self.dry_run {
            return print_plans(&sweep.planned, &sweep.remote, self.json);
        }

        print_outcomes(&sweep.outcomes, &sweep.remote, self.json)?;

        self.check_strict(&sweep.outcomes)
    }

    fn check_strict(&self, outcomes: &[DeletionOutcome]) -> Result<()> {
        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        if self.strict && failed > 0 {
            return Err(SweepError::Incomplete(failed));
        }
        Ok(())
    }

    /// Everything up to and including the deletions; errors returned here are fatal.
    pub fn run<S: BranchSource + ?Sized, T: Selector + ?Sized>(
        &self,
        source: &S,
        selector: &T,
        config: &SweepConfig,
    ) -> Result<Sweep> {
        let remote = choose_remote(
            source,
            selector,
            self.scope.remote.as_deref(),
            &config.default_remote,
        )?;
        let correlation = self.scope.correlation(config);

        source.fetch_and_prune(&remote).map_err(|e| {
            log::error!("Cannot fetch {}: {}", remote, e);
            e
        })?;

        let records = filter_by_keyword(
            inventory(source, &remote, correlation)?,
            self.scope.keyword(),
        );
        if records.is_empty() {
            return Ok(Sweep {
                remote,
                notice: Some("No branches to choose from"),
                ..Sweep::default()
            });
        }

        let selected = if self.branches.is_empty() {
            select_branches(selector, &records)?
        } else {
            restrict_to(&records, self.branches.clone())
        };
        if selected.is_empty() {
            return Ok(Sweep {
                remote,
                notice: Some("Nothing selected"),
                ..Sweep::default()
            });
        }

        if self.dry_run {
            let planned = selected
                .iter()
                .map(|identifier| plan(identifier, &remote))
                .collect();
            return Ok(Sweep {
                remote,
                planned,
                ..Sweep::default()
            });
        }

        let outcomes = delete_many(source, &selected, &remote, correlation);
        Ok(Sweep {
            remote,
            outcomes,
            ..Sweep::default()
        })
    }
}
