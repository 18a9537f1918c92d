mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ssot",
    about = "Checks and staging for SSOT documentation trees",
    version,
    propagate_version = true
)]
struct Cli {
    /// Repository root (default: auto-detect from ssot.yaml or .git/)
    #[arg(long, global = true, env = "SSOT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify every Markdown file under the docs directory has the required frontmatter
    Check {
        /// Directory to scan, relative to the root (default: docs_dir from ssot.yaml, else docs)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Comma-separated required field names (overrides ssot.yaml)
        #[arg(long, value_delimiter = ',', conflicts_with = "field_set")]
        fields: Option<Vec<String>>,

        /// Named field set: default or template
        #[arg(long)]
        field_set: Option<String>,
    },

    /// Copy root-level Markdown into the site tree with links rewritten
    Site {
        /// Output directory, relative to the root (default: site.out_dir from ssot.yaml)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Report what would be staged without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect and validate ssot.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved root");

    let result = match cli.command {
        Commands::Check {
            dir,
            fields,
            field_set,
        } => cmd::check::run(
            &root,
            cmd::check::CheckArgs {
                dir,
                fields,
                field_set,
            },
            cli.json,
        ),
        Commands::Site { out, dry_run } => cmd::site::run(&root, out, dry_run, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
