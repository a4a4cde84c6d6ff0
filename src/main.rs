//! task-cli - Command-line task tracker backed by a JSON file

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use task_tracker::cli::{self, Cli, Commands};
use task_tracker::config::Config;
use task_tracker::task::TaskStatus;

fn main() -> Result<()> {
    if std::env::var("TASK_CLI_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("task_tracker=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    // Completions never touch the task file
    if let Commands::Completion { shell } = cli.command {
        generate(shell, &mut Cli::command(), "task-cli", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let store = cli::open_store(&config, cli.file)?;

    match cli.command {
        Commands::Add(args) => cli::add::run(&store, args),
        Commands::Delete(args) => cli::delete::run(&store, args),
        Commands::Update(args) => cli::update::run(&store, args),
        Commands::MarkInProgress(args) => cli::mark::run(&store, args, TaskStatus::InProgress),
        Commands::MarkDone(args) => cli::mark::run(&store, args, TaskStatus::Done),
        Commands::List(args) => cli::list::run(&store, args),
        Commands::Todo(args) => cli::list::run_status(&store, TaskStatus::Todo, args),
        Commands::InProgress(args) => cli::list::run_status(&store, TaskStatus::InProgress, args),
        Commands::Done(args) => cli::list::run_status(&store, TaskStatus::Done, args),
        Commands::Completion { .. } => Ok(()),
    }
}
