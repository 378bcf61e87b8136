use super::Scope;
use crate::{
    config::SweepConfig,
    core::{inventory, BranchRecord, BranchSource},
    errors::Result,
    git::Git,
    report::print_inventory,
    selection::{choose_remote, filter_by_keyword, FzfSelector, Selector},
};
use clap::Args;

/// Show the reconciled branch list without deleting anything
#[derive(Debug, Args)]
pub struct List {
    #[command(flatten)]
    pub scope: Scope,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl List {
    pub fn execute(&self, git: Git) -> Result<()> {
        let (remote, records) = self.run(&git, &FzfSelector::new(), &git.config)?;
        print_inventory(&records, &remote, self.json)
    }

    pub fn run<S: BranchSource + ?Sized, T: Selector + ?Sized>(
        &self,
        source: &S,
        selector: &T,
        config: &SweepConfig,
    ) -> Result<(String, Vec<BranchRecord>)> {
        let remote = choose_remote(
            source,
            selector,
            self.scope.remote.as_deref(),
            &config.default_remote,
        )?;
        source.fetch_and_prune(&remote)?;

        let records = inventory(source, &remote, self.scope.correlation(config))?;
        Ok((remote, filter_by_keyword(records, self.scope.keyword())))
    }
}
