use crate::{
    core::{BranchRecord, BranchSource},
    errors::{Result, SweepError},
};
use std::process::Command;

/// Interactive prompts, label and value are the same string.
pub trait Selector {
    fn select_many(&self, items: Vec<String>) -> Result<Vec<String>>;
    fn select_one(&self, prompt: &str, items: Vec<String>) -> Result<Option<String>>;
}

pub struct FzfSelector;

impl FzfSelector {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, items: Vec<String>, args: Vec<String>) -> Result<String> {
        // rust_fzf panics when it cannot spawn fzf
        ensure_available("fzf")?;
        Ok(rust_fzf::select(items, args))
    }
}

fn ensure_available(program: &str) -> Result<()> {
    let available = match Command::new(program).arg("--version").output() {
        Ok(output) => output.status.success(),
        Err(_) => false,
    };
    if !available {
        return Err(SweepError::Selection(format!(
            "{} not found, install it or pass --branch/--remote",
            program
        )));
    }
    Ok(())
}

/// fzf prints one pick per line, and nothing when the prompt is cancelled.
pub fn parse_picks(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

impl Selector for FzfSelector {
    fn select_many(&self, items: Vec<String>) -> Result<Vec<String>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let output = self.run(
            items,
            vec![
                "--multi".to_string(),
                "--prompt=delete> ".to_string(),
                "--header=TAB to mark, ENTER to confirm".to_string(),
            ],
        )?;
        Ok(parse_picks(&output))
    }

    fn select_one(&self, prompt: &str, items: Vec<String>) -> Result<Option<String>> {
        let output = self.run(items, vec![format!("--prompt={}> ", prompt)])?;
        Ok(parse_picks(&output).into_iter().next())
    }
}

/// Keep the records whose name contains `keyword` (case-sensitive).
pub fn filter_by_keyword(records: Vec<BranchRecord>, keyword: &str) -> Vec<BranchRecord> {
    records
        .into_iter()
        .filter(|record| record.name.contains(keyword))
        .collect()
}

/// Drop anything in `chosen` that is not a record name, keeping `chosen`'s order.
pub fn restrict_to(records: &[BranchRecord], chosen: Vec<String>) -> Vec<String> {
    chosen
        .into_iter()
        .filter(|name| {
            let known = records.iter().any(|record| &record.name == name);
            if !known {
                log::warn!("'{}' is not in the branch list, skipping", name);
            }
            known
        })
        .collect()
}

pub fn select_branches<T: Selector + ?Sized>(
    selector: &T,
    records: &[BranchRecord],
) -> Result<Vec<String>> {
    let names = records.iter().map(|record| record.name.clone()).collect();
    let chosen = selector.select_many(names)?;
    Ok(restrict_to(records, chosen))
}

/// Resolve which remote to work against.
///
/// An explicit remote wins, several configured remotes mean a prompt,
/// otherwise `default_remote` is used.
pub fn choose_remote<S: BranchSource + ?Sized, T: Selector + ?Sized>(
    source: &S,
    selector: &T,
    explicit: Option<&str>,
    default_remote: &str,
) -> Result<String> {
    if let Some(remote) = explicit {
        return Ok(remote.to_string());
    }

    let remotes = source.list_remotes()?;
    if remotes.len() > 1 {
        return selector
            .select_one("remote", remotes)?
            .ok_or_else(|| SweepError::Selection("no remote chosen".to_string()));
    }

    Ok(default_remote.to_string())
}

#[cfg(test)]
pub use mock::MockSelector;
