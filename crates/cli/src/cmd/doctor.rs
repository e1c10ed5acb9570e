use lastmod_core::config::loader::{ConfigLoader, default_config_path};
use lastmod_core::settings::{JsonSettingsStore, SettingsStore};
use std::path::Path;

use super::init_logging;

pub fn run(config_path: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config_path, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL lastmod doctor");
            println!("{e}");
            if config_path.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    init_logging(&rc);

    let store = JsonSettingsStore::new(&rc.settings_file);
    let settings = match store.load() {
        Ok(s) => s,
        Err(e) => {
            println!("FAIL lastmod doctor");
            println!("settings_file: {}", rc.settings_file.display());
            println!("{e}");
            std::process::exit(1);
        }
    };

    tracing::debug!(profile = %rc.active_profile, "doctor ok");
    println!("OK   lastmod doctor");
    println!(
        "path: {}",
        config_path.map_or_else(
            || default_config_path().display().to_string(),
            |p| p.display().to_string()
        )
    );
    println!("profile: {}", rc.active_profile);
    println!("vault_root: {}", rc.vault_root.display());
    println!("settings_file: {}", rc.settings_file.display());
    println!("debounce_ms: {}", rc.debounce.as_millis());
    println!("extensions: {}", rc.extensions.join(", "));
    println!("auto_update_enabled: {}", settings.auto_update_enabled);
    println!("field_name: {}", settings.field_name());
    println!("date_format: {}", settings.date_format);
    println!("enabled_by_default: {}", settings.enabled_by_default);
}
