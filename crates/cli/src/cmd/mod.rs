//! Subcommand implementations.
//!
//! The terminal stands in for the editor: subcommands are the command
//! palette, `settings` is the settings tab, `watch` is the file-modified
//! subscription, and notices print to stdout.

pub mod doctor;
pub mod palette;
pub mod settings;
pub mod watch;

use std::path::{Path, PathBuf};

use lastmod_core::config::loader::ConfigLoader;
use lastmod_core::config::types::ResolvedConfig;
use lastmod_core::host::{DocumentStore, FsVault, Notifier};
use lastmod_core::settings::JsonSettingsStore;
use lastmod_core::timestamp::SystemClock;
use lastmod_core::{CommandOutcome, CommandRunner};

use crate::logging;

/// Prints notices to stdout.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Collaborators backing a [`CommandRunner`] in the terminal.
pub struct Host<D: DocumentStore = FsVault> {
    pub documents: D,
    pub settings: JsonSettingsStore,
    pub notifier: ConsoleNotifier,
    pub clock: SystemClock,
}

impl Host {
    pub fn new(cfg: &ResolvedConfig) -> Self {
        Self::with_documents(cfg, FsVault::new(&cfg.vault_root))
    }
}

impl<D: DocumentStore> Host<D> {
    pub fn with_documents(cfg: &ResolvedConfig, documents: D) -> Self {
        Self {
            documents,
            settings: JsonSettingsStore::new(&cfg.settings_file),
            notifier: ConsoleNotifier,
            clock: SystemClock,
        }
    }

    /// Build a runner, exiting if the settings cannot be loaded.
    pub fn runner(&self) -> CommandRunner<'_> {
        match CommandRunner::new(&self.documents, &self.notifier, &self.settings, &self.clock) {
            Ok(runner) => runner,
            Err(e) => {
                eprintln!("Failed to load settings from {}: {e}", self.settings.path().display());
                std::process::exit(1);
            }
        }
    }
}

/// Load configuration and install logging, exiting on failure.
pub fn load_config(config_path: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    let cfg = match ConfigLoader::load(config_path, profile) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };
    init_logging(&cfg);
    cfg
}

pub fn init_logging(cfg: &ResolvedConfig) {
    if let Err(e) = logging::init(&cfg.logging) {
        eprintln!("Failed to initialise logging: {e}");
        std::process::exit(1);
    }
}

/// Resolve a note argument: paths that exist as given win, anything else is
/// taken relative to the vault root.
pub fn resolve_document(cfg: &ResolvedConfig, file: &Path) -> PathBuf {
    if file.is_absolute() {
        return file.to_path_buf();
    }
    if file.exists() {
        return std::env::current_dir()
            .map(|cwd| cwd.join(file))
            .unwrap_or_else(|_| file.to_path_buf());
    }
    cfg.vault_root.join(file)
}

/// Process exit code for a command outcome.
pub fn exit_code(outcome: CommandOutcome) -> i32 {
    match outcome {
        CommandOutcome::Updated | CommandOutcome::Unchanged | CommandOutcome::Toggled(_) => 0,
        CommandOutcome::NoActiveDocument
        | CommandOutcome::NoFrontmatter
        | CommandOutcome::Failed => 1,
    }
}
