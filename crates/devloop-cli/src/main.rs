mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "devloop",
    about = "Personal dev-workflow CLI — sync, install, build, run, and ship a web project",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .devloop/ or .git/)
    #[arg(long, global = true, env = "DEVLOOP_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold .devloop/config.yaml in the current project
    Init,

    /// Verify required tools and configured directories
    Doctor,

    /// Update the working tree from the remote branch
    Sync {
        /// Branch to sync (default: project.default_branch)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Install dependencies in the configured directories
    Install,

    /// Sync, install, and build the frontend bundle
    Build {
        /// Skip the sync pre-step
        #[arg(long)]
        no_sync: bool,

        /// Skip the dependency install pre-step
        #[arg(long)]
        no_install: bool,
    },

    /// Run the dev services under the session supervisor
    Dev {
        /// Branch to sync before launching
        #[arg(long)]
        branch: Option<String>,

        /// Skip the sync pre-step
        #[arg(long)]
        no_sync: bool,

        /// Skip the dependency install pre-step
        #[arg(long)]
        no_install: bool,

        /// Launch only the named service (repeatable)
        #[arg(long = "only", value_name = "NAME")]
        only: Vec<String>,

        /// Build the frontend bundle instead of starting the session
        #[arg(long)]
        build: bool,
    },

    /// Commit and push the working tree interactively
    Commit {
        /// Commit message (prompted for when omitted)
        #[arg(short, long)]
        message: Option<String>,

        /// Skip the push confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Run the configured smoke checks
    Check {
        /// Run only the named check
        name: Option<String>,
    },

    /// Inspect and validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Dev { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Doctor => cmd::doctor::run(&root, cli.json),
        Commands::Sync { branch } => cmd::sync::run(&root, branch.as_deref()),
        Commands::Install => cmd::install::run(&root),
        Commands::Build {
            no_sync,
            no_install,
        } => cmd::build::run(&root, no_sync, no_install),
        Commands::Dev {
            branch,
            no_sync,
            no_install,
            only,
            build,
        } => cmd::dev::run(
            &root,
            cmd::dev::DevOptions {
                branch,
                no_sync,
                no_install,
                only,
                build,
            },
        ),
        Commands::Commit { message, yes } => cmd::commit::run(&root, message.as_deref(), yes),
        Commands::Check { name } => cmd::check::run(&root, name.as_deref()),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
