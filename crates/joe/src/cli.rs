//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Joe - DNS Taxi: build and manage DNS zone files on remote DNS servers
#[derive(Parser, Debug)]
#[command(name = "joe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version(VersionArgs),

    /// DNS zone file management
    #[command(subcommand)]
    Zone(ZoneCommands),

    /// Check for updates and update the application
    Update(UpdateArgs),

    /// Display welcome message and tool overview
    Welcome,

    /// Output a hello world message
    Hello(HelloArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Zone commands
#[derive(Subcommand, Debug)]
pub enum ZoneCommands {
    /// Create a new DNS zone file
    Create(ZoneCreateArgs),

    /// List DNS zone files on a remote server
    List(ZoneListArgs),

    /// Deploy a DNS zone file to a remote server
    Deploy(ZoneDeployArgs),
}

#[derive(Args, Debug)]
pub struct ZoneCreateArgs {
    /// The domain name for the zone file
    pub domain: String,

    /// Nameserver(s) for the domain
    #[arg(long = "nameserver", short = 'n')]
    pub nameservers: Vec<String>,

    /// Admin email for the zone file
    #[arg(long, short = 'e', default_value = "admin@example.com")]
    pub admin_email: String,

    /// Default TTL for the zone file
    #[arg(long, short = 't', default_value_t = 3600)]
    pub ttl: u32,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ZoneListArgs {
    /// Remote DNS server to connect to
    #[arg(long, short = 's', default_value = "localhost")]
    pub server: String,

    /// Username for remote server authentication
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// SSH key file for authentication
    #[arg(long, short = 'k')]
    pub key: Option<PathBuf>,

    /// Filter zones by domain name pattern
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

#[derive(Args, Debug)]
pub struct ZoneDeployArgs {
    /// Path to the zone file to deploy
    pub file: PathBuf,

    /// Remote DNS server to deploy to
    #[arg(long, short = 's', default_value = "localhost")]
    pub server: String,

    /// Username for remote server authentication
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// SSH key file for authentication
    #[arg(long, short = 'k')]
    pub key: Option<PathBuf>,

    /// Reload DNS server after deployment
    #[arg(long, short = 'r')]
    pub reload: bool,

    /// Simulate deployment without making changes
    #[arg(long, short = 'd')]
    pub dry_run: bool,
}

// Update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Check for updates only
    #[arg(long)]
    pub check: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

// Hello command
#[derive(Args, Debug)]
pub struct HelloArgs {
    /// Who do you want to greet?
    #[arg(default_value = "World")]
    pub name: String,

    /// Uppercase the message
    #[arg(long, short = 'u')]
    pub uppercase: bool,
}

// Completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
