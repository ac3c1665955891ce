//! Clap derive structures for the `scom` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use scom_core::{HostBinding, SegmentType};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scom -- desired-state CLI for bare-metal hosting
#[derive(Debug, Parser)]
#[command(
    name = "scom",
    version,
    about = "Manage bare-metal servers, PTR records and L2 segments",
    long_about = "Converges declared bare-metal servers, reverse-DNS records and\n\
        layer-2 segments against the hosting control-plane API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "SCOM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Control-plane URL (overrides profile)
    #[arg(long, short = 'e', env = "SCOM_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Account email (overrides profile)
    #[arg(long, env = "SCOM_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password
    #[arg(long, env = "SCOM_PASSWORD", global = true, hide_env_values = true, hide = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SCOM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SCOM_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 60]
    #[arg(long, env = "SCOM_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Order, inspect and release bare-metal servers
    #[command(alias = "srv", alias = "s")]
    Servers(ServersArgs),

    /// Manage reverse-DNS (PTR) records
    Ptr(PtrArgs),

    /// Manage layer-2 segments
    #[command(alias = "segments")]
    L2(L2Args),

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Servers ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServersArgs {
    #[command(subcommand)]
    pub command: ServersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServersCommand {
    /// List active servers
    #[command(alias = "ls")]
    List,

    /// List servers still being provisioned
    Pending,

    /// List orders
    Orders,

    /// Show one active server
    #[command(alias = "get")]
    Show {
        /// Server hostname
        hostname: String,
    },

    /// Check whether a hostname is taken by a server or a live order
    InUse {
        /// Hostname to check
        hostname: String,
    },

    /// Order a new server
    Create {
        /// Hostname of the new server
        #[arg(long)]
        hostname: String,

        /// Cart template JSON with %s for the hostname, or @path to read it from a file
        #[arg(long)]
        config: String,
    },

    /// Release a server and order a replacement under a new hostname
    Rename {
        /// Current hostname
        old: String,

        /// New hostname
        new: String,

        /// Cart template for the replacement (JSON or @path)
        #[arg(long)]
        config: String,
    },

    /// Schedule the release of a server at the end of its lease
    #[command(alias = "rm")]
    Release {
        /// Server hostname
        hostname: String,
    },
}

// ── PTR records ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PtrArgs {
    #[command(subcommand)]
    pub command: PtrCommand,
}

#[derive(Debug, Subcommand)]
pub enum PtrCommand {
    /// List PTR records
    #[command(alias = "ls")]
    List,

    /// Show one PTR record
    #[command(alias = "get")]
    Show {
        /// Record ID
        id: u64,
    },

    /// Bind a PTR record to a server's public address
    Create {
        /// Server whose public address the record is for
        #[arg(long)]
        hostname: String,

        /// PTR target (e.g. web-01.example.com)
        #[arg(long)]
        ptr: String,
    },

    /// Replace a PTR record (delete, then create)
    Update {
        /// Record ID
        id: u64,

        #[arg(long)]
        hostname: String,

        #[arg(long)]
        ptr: String,
    },

    /// Delete a PTR record
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: u64,
    },
}

// ── L2 segments ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct L2Args {
    #[command(subcommand)]
    pub command: L2Command,
}

/// Declared segment fields shared by create and update.
#[derive(Debug, Args)]
pub struct SegmentDecl {
    /// Segment name
    #[arg(long)]
    pub name: String,

    /// Segment type: private or public
    #[arg(long = "type", value_parser = parse_segment_type)]
    pub segment_type: SegmentType,

    /// Member host as name[:mode] (mode defaults to native); repeatable
    #[arg(long = "host", required = true, value_parser = parse_host_binding)]
    pub hosts: Vec<HostBinding>,
}

#[derive(Debug, Subcommand)]
pub enum L2Command {
    /// List segments
    #[command(alias = "ls")]
    List,

    /// Show one segment
    #[command(alias = "get")]
    Show {
        /// Segment ID
        id: u64,
    },

    /// Create a segment
    Create(SegmentDecl),

    /// Replace the definition of an active segment
    Update {
        /// Segment ID
        id: u64,

        #[command(flatten)]
        decl: SegmentDecl,
    },

    /// Delete an active segment
    #[command(alias = "rm")]
    Delete {
        /// Segment ID
        id: u64,
    },
}

fn parse_segment_type(raw: &str) -> Result<SegmentType, String> {
    SegmentType::parse(raw).map_err(|e| e.to_string())
}

fn parse_host_binding(raw: &str) -> Result<HostBinding, String> {
    raw.parse().map_err(|e: scom_core::CoreError| e.to_string())
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display the current configuration (secrets masked)
    Show,

    /// Store the password of a profile in the system keyring
    SetPassword {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,

        /// Read the password from this file instead of SCOM_PASSWORD
        #[arg(long)]
        from_file: Option<PathBuf>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
