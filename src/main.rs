use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use mirrit::remote::fixture::FixtureRemote;
use mirrit::store::memory::{MemoryStore, SharedStore};
use mirrit::sync::synchronizer::CommitSynchronizer;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mirrit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Mirrors remote commit history into a local datastore",
    long_about = "mirrit keeps a local datastore in step with the commit history of \
    remote repositories, ingesting new commits, pruning commits that history \
    rewrites left behind, and reconciling the authoritative sort order.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "sync",
        about = "Synchronize every repository of a remote snapshot",
        long_about = "This command runs a full synchronization pass: every repository of the \
        remote snapshot is paged through, unknown commits are ingested, unreachable ones are \
        pruned, and the datastore is written back."
    )]
    Sync {
        #[arg(long, help = "Path to the remote snapshot file")]
        remote: PathBuf,
        #[arg(long, help = "Path to the datastore file")]
        store: PathBuf,
    },
    #[command(
        name = "status",
        about = "List the mirrored repositories and their commits",
        long_about = "This command lists every mirrored repository with its commits in \
        authoritative sort order, newest first."
    )]
    Status {
        #[arg(long, help = "Path to the datastore file")]
        store: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Sync { remote, store } => sync(remote, store).await,
        Commands::Status { store } => status(store),
    }
}

async fn sync(remote_path: &Path, store_path: &Path) -> Result<()> {
    let remote = FixtureRemote::load(remote_path)?;
    let store = SharedStore::new(MemoryStore::load(store_path)?);

    let mut synchronizer = CommitSynchronizer::new(
        remote.clone(),
        remote,
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    let report = synchronizer.synchronize().await?;

    store.lock().await.save(store_path)?;

    for outcome in &report.repositories {
        println!(
            "[{}] observed {}, created {}, pruned {}",
            outcome.repository.full_name().bold(),
            outcome.observed,
            outcome.created.to_string().green(),
            outcome.pruned.to_string().red(),
        );
    }

    Ok(())
}

fn status(store_path: &Path) -> Result<()> {
    let store = MemoryStore::load(store_path)?;

    for repository in store.repositories() {
        println!(
            "{} ({} commits)",
            repository.full_name().bold(),
            store.commit_count(repository.id()),
        );

        for record in store.sorted_commits(repository.id()) {
            println!(
                "  {:>4}  {}  {}",
                record.commit.sort_index,
                record.commit.id,
                record.commit.message.lines().next().unwrap_or_default(),
            );
        }
    }

    Ok(())
}
