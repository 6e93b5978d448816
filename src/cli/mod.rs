//! Command-line interface for topicsplit.
//!
//! Provides the one-shot `run` command plus a read-only `plan` preview
//! and a `config` debug printout.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ResolvedConfig;
use crate::core::Orchestrator;
use crate::tables::COURSES;

/// topicsplit - split single-level courses into topic-based levels
#[derive(Parser, Debug)]
#[command(name = "topicsplit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Restructure all courses and write the progress migration map
    Run {
        /// Content tree root (one subdirectory per course)
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Output path for the consolidated migration map
        #[arg(short, long)]
        migration_out: Option<PathBuf>,
    },

    /// Preview the topic grouping without touching any file
    Plan {
        /// Content tree root
        #[arg(short, long)]
        content: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run {
                content,
                migration_out,
            } => run(content, migration_out).await,
            Commands::Plan { content } => plan(content).await,
            Commands::Config => show_config(),
        }
    }
}

async fn run(content: Option<PathBuf>, migration_out: Option<PathBuf>) -> Result<()> {
    let config = ResolvedConfig::resolve(content, migration_out)?;
    let orchestrator = Orchestrator::new(&config.content);

    println!("Restructuring courses into topic-based levels...");

    let report = orchestrator.run(COURSES, &config.migration_out).await?;

    for course in &report.courses {
        println!(
            "\n{}: {} topics from {} modules",
            course.course,
            course.topic_count(),
            course.original_module_count
        );
        for (topic, count) in &course.topics {
            println!("  {}: {} modules", topic, count);
        }
        for leftover in &course.leftovers_removed {
            println!("  Removed leftover: {}", leftover);
        }
        for warning in &course.warnings {
            println!("  WARNING: {}", warning);
        }
        println!(
            "  Result: {} levels, {} total entries (including indices)",
            course.topic_count(),
            course.entry_count
        );
    }

    println!(
        "\nWrote {} progress migration entries to {}",
        report.migration_entries,
        report.migration_path.display()
    );
    println!("Done!");

    Ok(())
}

async fn plan(content: Option<PathBuf>) -> Result<()> {
    let config = ResolvedConfig::resolve(content, None)?;
    let orchestrator = Orchestrator::new(&config.content);

    for course in COURSES {
        let topics = orchestrator.plan_course(course).await?;
        let total: usize = topics.iter().map(|(_, n)| n).sum();

        println!(
            "{}: {} topics, {} modules (overview excluded)",
            course.id,
            topics.len(),
            total
        );
        for (ordinal, (topic, count)) in topics.iter().enumerate() {
            println!("  level-{} <- {}: {} modules", ordinal + 1, topic, count);
        }
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let config = ResolvedConfig::resolve(None, None)?;

    println!("Resolved configuration:");
    println!("  content:       {}", config.content.display());
    println!("  migration_out: {}", config.migration_out.display());
    match &config.config_file {
        Some(path) => println!("  config_file:   {}", path.display()),
        None => println!("  config_file:   (none found)"),
    }
    println!("  courses:");
    for course in COURSES {
        println!("    {} (current level: {})", course.id, course.old_level);
    }

    Ok(())
}
