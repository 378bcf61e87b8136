pub mod delete;
pub mod list;

use crate::{config::SweepConfig, core::Correlation};
use clap::Args;

/// Which remote and which branches a command looks at.
#[derive(Debug, Args, Default)]
pub struct Scope {
    /// Remote to reconcile against, prompts when several exist
    #[arg(long, short)]
    pub remote: Option<String>,

    /// Only keep branches whose name contains this text
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Match remote refs on the full branch name instead of a suffix
    #[arg(long)]
    pub exact: bool,
}

impl Scope {
    pub fn correlation(&self, config: &SweepConfig) -> Correlation {
        if self.exact {
            Correlation::Exact
        } else {
            config.correlation
        }
    }

    pub fn keyword(&self) -> &str {
        self.filter.as_deref().unwrap_or_default()
    }
}
