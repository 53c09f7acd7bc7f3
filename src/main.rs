//! Sylva CLI: build and inspect workspace graph databases

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use sylva::import::GraphImporter;
use sylva::source::jsonl;
use sylva::store::Database;
use sylva::workspace::Workspace;
use tracing::{info, warn};

/// Exit code for a run that completed but encountered record-, property-
/// or index-level problems.
const EXIT_WITH_PROBLEMS: i32 = 2;

#[derive(Parser)]
#[command(name = "sylva", version, about = "Embedded property-graph database importer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recreate the database from the workspace source graph
    Create {
        /// Workspace directory
        workspace: PathBuf,
    },
    /// Inspect an existing workspace database
    Inspect {
        /// Workspace directory
        workspace: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    sylva::update::check_for_update().await;

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Create { workspace }) => create(&workspace),
        Some(Commands::Inspect { workspace }) => inspect(&workspace),
        None => {
            let _ = Cli::command().print_help();
            return;
        }
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn create(path: &PathBuf) -> anyhow::Result<i32> {
    let workspace = Workspace::open(path)?;
    workspace.delete_old_database()?;

    let graph = jsonl::load(workspace.graph_path())?;
    let mut db = Database::new();
    info!("Creating database...");
    let report = GraphImporter::new(&graph).run(&mut db)?;

    db.save_to(workspace.database_path())?;
    workspace.store_checksum()?;

    if report.has_problems() {
        warn!("Database created with {} problems", report.problem_count());
        return Ok(EXIT_WITH_PROBLEMS);
    }
    Ok(0)
}

fn inspect(path: &PathBuf) -> anyhow::Result<i32> {
    let workspace = Workspace::open(path)?;
    if !workspace.is_up_to_date() {
        warn!("The database is out-of-date and should be recreated with the create command");
    }

    let db = Database::load_from(workspace.database_path())
        .with_context(|| format!("no database snapshot in workspace '{}'", path.display()))?;

    println!("Classes:");
    for class in db.classes() {
        println!(
            "  {} ({}, {} properties, {} records)",
            class.name,
            class.kind,
            class.property_count(),
            db.record_count(&class.name)
        );
    }
    println!("Indices:");
    for index in db.indexes() {
        println!(
            "  {} ({}, {} records)",
            index.name(),
            if index.unique { "unique" } else { "non-unique" },
            index.len()
        );
    }
    println!(
        "{} vertices, {} edges total",
        db.vertex_count(),
        db.edge_count()
    );
    Ok(0)
}
