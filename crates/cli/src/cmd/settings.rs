//! Settings command: the terminal version of the settings tab.
//!
//! Each control maps to one field of the settings record and is saved as
//! soon as it changes.

use std::path::Path;

use clap::ValueEnum;
use lastmod_core::settings::Settings;
use lastmod_core::timestamp::DateFormat;

use super::{Host, load_config};
use crate::SettingsArgs;

/// Date formats accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateFormatArg {
    #[value(name = "YYYY-MM-DD", alias = "date")]
    Date,
    #[value(name = "YYYY-MM-DD HH:mm", alias = "minutes")]
    Minutes,
    #[value(name = "YYYY-MM-DD HH:mm:ss", alias = "seconds")]
    Seconds,
    #[value(name = "ISO", alias = "iso")]
    Iso,
}

impl From<DateFormatArg> for DateFormat {
    fn from(arg: DateFormatArg) -> Self {
        match arg {
            DateFormatArg::Date => DateFormat::Date,
            DateFormatArg::Minutes => DateFormat::DateTimeMinutes,
            DateFormatArg::Seconds => DateFormat::DateTimeSeconds,
            DateFormatArg::Iso => DateFormat::Iso,
        }
    }
}

pub fn run(config_path: Option<&Path>, profile: Option<&str>, args: SettingsArgs) {
    let cfg = load_config(config_path, profile);
    let host = Host::new(&cfg);
    let mut runner = host.runner();

    let mut changes: Vec<Box<dyn FnOnce(&mut Settings)>> = Vec::new();
    if let Some(enabled) = args.auto_update {
        changes.push(Box::new(move |s: &mut Settings| s.auto_update_enabled = enabled));
    }
    if let Some(name) = args.field_name {
        changes.push(Box::new(move |s: &mut Settings| s.set_field_name(&name)));
    }
    if let Some(format) = args.date_format {
        changes.push(Box::new(move |s: &mut Settings| s.date_format = format.into()));
    }
    if let Some(enabled) = args.enabled_by_default {
        changes.push(Box::new(move |s: &mut Settings| s.enabled_by_default = enabled));
    }

    let changed = !changes.is_empty();
    for change in changes {
        if let Err(e) = runner.update_settings(change) {
            eprintln!("Failed to save settings: {e}");
            std::process::exit(1);
        }
    }
    if changed {
        tracing::info!(path = %host.settings.path().display(), "settings updated");
    }

    let settings = runner.settings();
    if args.json {
        match serde_json::to_string_pretty(settings) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize settings: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render(settings));
    }
}

/// Human-readable listing, one control per line.
pub fn render(settings: &Settings) -> String {
    format!(
        "autoUpdateEnabled: {}\nfieldName: {}\ndateFormat: {} ({})\nenabledByDefault: {}\n",
        settings.auto_update_enabled,
        settings.field_name(),
        settings.date_format,
        settings.date_format.example(),
        settings.enabled_by_default,
    )
}
