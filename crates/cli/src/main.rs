mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use lastmod_core::CommandId;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lastmod",
    version,
    about = "Keep a last-updated field in markdown frontmatter current"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths and settings
    Doctor,

    /// Write the current timestamp into a note's frontmatter
    Update(FileArgs),

    /// Toggle auto-update for a single note
    Toggle(FileArgs),

    /// Toggle auto-update for the whole vault
    ToggleGlobal,

    /// Run a palette command by id (lists commands when no id is given)
    Exec(ExecArgs),

    /// Show or change settings
    Settings(SettingsArgs),

    /// Watch the vault and update notes as they are saved
    Watch,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Note to act on (relative paths also resolve against the vault root)
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Command id, e.g. "update-last-modified"
    pub id: Option<String>,

    /// Active note for commands that need one
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Enable or disable auto-update on save
    #[arg(long, value_name = "BOOL")]
    pub auto_update: Option<bool>,

    /// Frontmatter field to write the timestamp into
    #[arg(long, value_name = "NAME")]
    pub field_name: Option<String>,

    /// Timestamp format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub date_format: Option<cmd::settings::DateFormatArg>,

    /// Update notes that have no auto-update-last-modified flag
    #[arg(long, value_name = "BOOL")]
    pub enabled_by_default: Option<bool>,

    /// Print settings as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Update(args) => {
            cmd::palette::run(config, profile, CommandId::UpdateLastModified, Some(&args.file));
        }
        Commands::Toggle(args) => {
            cmd::palette::run(config, profile, CommandId::ToggleAutoUpdate, Some(&args.file));
        }
        Commands::ToggleGlobal => {
            cmd::palette::run(config, profile, CommandId::ToggleAutoUpdateGlobally, None);
        }
        Commands::Exec(args) => cmd::palette::run_by_id(config, profile, args),
        Commands::Settings(args) => cmd::settings::run(config, profile, args),
        Commands::Watch => cmd::watch::run(config, profile),
    }
}
