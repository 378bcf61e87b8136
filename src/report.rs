use crate::{
    core::{BranchRecord, DeletionOutcome, DeletionPlan, Locality},
    errors::Result,
};
use serde::Serialize;
use std::io::Write;

pub fn outcome_lines(outcome: &DeletionOutcome, remote: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let branch = match outcome.branch.strip_prefix(&format!("remotes/{}/", remote)) {
        Some(tail) => tail,
        None => outcome.branch.as_str(),
    };

    if outcome.locally_deleted {
        lines.push(format!("✅ Deleted local branch '{}'", branch));
    }
    if outcome.remotely_deleted {
        lines.push(format!("✅ Deleted remote branch '{}/{}'", remote, branch));
    }
    if let Some(error) = &outcome.error {
        lines.push(format!("❌ Failed to delete '{}': {}", outcome.branch, error));
    }
    lines
}

pub fn plan_line(plan: &DeletionPlan, remote: &str) -> String {
    match plan {
        DeletionPlan::Remote { branch } => format!("would delete remote branch '{}/{}'", remote, branch),
        DeletionPlan::Local { branch } => format!(
            "would delete local branch '{}' (and '{}/{}' if it exists)",
            branch, remote, branch
        ),
    }
}

#[derive(Debug, Serialize)]
struct InventoryEntry<'a> {
    name: &'a str,
    locality: Locality,
}

pub fn inventory_line(record: &BranchRecord, remote: &str) -> String {
    let locality = match record.locality(remote) {
        Locality::Local => "local",
        Locality::Tracked => "tracked",
        Locality::Remote => "remote",
    };
    format!("{:<8} {}", locality, record.name)
}

pub fn write_outcomes<W: Write>(
    out: &mut W,
    outcomes: &[DeletionOutcome],
    remote: &str,
    json: bool,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(outcomes)?)?;
        return Ok(());
    }
    for outcome in outcomes {
        for line in outcome_lines(outcome, remote) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

pub fn print_outcomes(outcomes: &[DeletionOutcome], remote: &str, json: bool) -> Result<()> {
    write_outcomes(&mut std::io::stdout().lock(), outcomes, remote, json)
}

pub fn print_plans(plans: &[DeletionPlan], remote: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plans)?);
        return Ok(());
    }
    for plan in plans {
        println!("{}", plan_line(plan, remote));
    }
    Ok(())
}

pub fn print_inventory(records: &[BranchRecord], remote: &str, json: bool) -> Result<()> {
    if json {
        let entries: Vec<InventoryEntry> = records
            .iter()
            .map(|record| InventoryEntry {
                name: &record.name,
                locality: record.locality(remote),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    for record in records {
        println!("{}", inventory_line(record, remote));
    }
    Ok(())
}
