use clap::Parser;
use clap::Subcommand;
use commands::delete::Delete;
use commands::list::List;
use git::Git;

mod commands;
mod config;
mod core;
mod errors;
mod git;
mod report;
mod selection;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "git-sweep")]
#[command(about = "Reconcile local and remote branches and delete the stale ones", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Delete(Delete),
    List(List),
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let result = Git::open(".").and_then(|git| match args.command {
        Commands::Delete(delete) => delete.execute(git),
        Commands::List(list) => list.execute(git),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
