//! CLI entry point for inkpost

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(version)]
#[command(about = "Build a static blog from markdown posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static site
    #[command(alias = "b")]
    Build,

    /// Remove the generated public folder
    Clean,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug for the new post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List posts, newest first
    List,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "inkpost=debug,info"
    } else {
        "inkpost=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Build => {
            let blog = inkpost::Blog::new(&base_dir)?;
            tracing::info!("Building site in {:?}", blog.base_dir);
            blog.build()?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let blog = inkpost::Blog::new(&base_dir)?;
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::New { title, slug } => {
            let blog = inkpost::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List => {
            let blog = inkpost::Blog::new(&base_dir)?;
            inkpost::commands::list::run(&blog)?;
        }

        Commands::Version => {
            println!("inkpost version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
