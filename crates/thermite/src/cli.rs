//! Clap derive structures for the `thermite` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// thermite -- batch network device automation
#[derive(Debug, Parser)]
#[command(
    name = "thermite",
    version,
    about = "Automate network devices from the command line",
    long_about = "Pull operational state and push candidate configurations across a\n\
        batch of routers and switches, one vendor driver per platform.\n\n\
        Devices are processed independently: one device failing never aborts\n\
        its siblings, and every outcome is reported per device.",
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
    /// Inventory file (defaults to the per-user config path)
    #[arg(long, short = 'i', env = "THERMITE_INVENTORY", global = true)]
    pub inventory: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "THERMITE_OUTPUT",
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
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed text (default, interactive)
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
    /// List the action catalog
    Actions,

    /// Write a starter inventory file
    Init,

    /// List inventory devices
    #[command(alias = "inv")]
    Inventory,

    /// Pull operational data from devices
    #[command(alias = "up")]
    Update(UpdateArgs),

    /// Candidate configuration lifecycle (load, commit, discard, rollback)
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Reachability probe from a device
    Ping(ProbeArgs),

    /// Path-trace probe from a device
    #[command(alias = "trace")]
    Traceroute(ProbeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Update ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Devices to update (default: every inventory device)
    pub devices: Vec<String>,

    /// Comma-separated action names (default: the full catalog).
    /// Example: --actions "ARP table,Facts,LLDP neighbors"
    #[arg(long, short = 'a')]
    pub actions: Option<String>,
}

// ── Config lifecycle ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Commit the pending candidate
    Commit(ConfigTargetArgs),

    /// Discard the pending candidate
    Discard(ConfigTargetArgs),

    /// Revert to the previous committed configuration
    Rollback(ConfigTargetArgs),

    /// Render each device's candidate and merge-load it
    LoadMerge(LoadArgs),

    /// Render each device's candidate and replace-load it
    LoadReplace(LoadArgs),
}

#[derive(Debug, Args)]
pub struct ConfigTargetArgs {
    /// Devices to operate on (default: every inventory device)
    pub devices: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Devices to operate on (default: every inventory device)
    pub devices: Vec<String>,

    /// Candidate template file, overriding each device's candidate_file
    #[arg(long, short = 'c')]
    pub candidate: Option<PathBuf>,

    /// Commit immediately after a successful load
    #[arg(long)]
    pub commit: bool,
}

// ── Probes ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Source device (inventory name)
    pub device: String,

    /// Probe target address
    #[arg(long, short = 'd')]
    pub destination: String,

    /// Source address to emit from
    #[arg(long)]
    pub source: Option<String>,

    /// Time-to-live
    #[arg(long)]
    pub ttl: Option<u32>,

    /// Per-probe timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Payload size in bytes
    #[arg(long)]
    pub size: Option<u32>,

    /// Number of probes
    #[arg(long)]
    pub count: Option<u32>,

    /// VRF to probe within
    #[arg(long)]
    pub vrf: Option<String>,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
