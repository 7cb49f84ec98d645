use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "geosave")]
#[command(about = "Mirror your GeoGuessr game history to a local folder")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for destination and endpoint configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every game played since the last sync
    Sync {
        /// Destination folder (overrides the profile)
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,
        /// Stop after this many feed pages
        #[arg(long, value_name = "N")]
        max_pages: Option<u32>,
        /// Skip the pauses between requests
        #[arg(long)]
        no_delay: bool,
    },
    /// Show the destination folder and last saved game
    Status {
        /// Destination folder (overrides the profile)
        #[arg(long, value_name = "PATH")]
        dir: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Manage the GeoGuessr session cookie
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update profile config
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Folder receiving latest.txt and the game records
        #[arg(long, value_name = "PATH")]
        destination: Option<PathBuf>,
        /// GeoGuessr API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Game server API base URL
        #[arg(long, value_name = "URL")]
        game_server_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store the `_ncfa` session cookie in the OS keychain
    Login {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Value of the `_ncfa` cookie from a logged-in browser session
        #[arg(long, value_name = "VALUE")]
        cookie: String,
    },
    /// Show whether a session cookie is available
    Status {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
    /// Remove the stored session cookie
    Logout {
        /// Optional profile override
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
