use lastmod_core::config::loader::ConfigLoader;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_default_profile_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/vault"
"#;

    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.active_profile, "default");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/vault");
    assert!(rc.settings_file.ends_with(".lastmod/settings.json"));
    assert!(rc.settings_file.starts_with("/tmp/vault"));
    assert_eq!(rc.debounce, Duration::from_millis(100));
    assert_eq!(rc.extensions, ["md"]);
    assert_eq!(rc.logging.level, "info");
}

#[test]
fn load_with_profile_override_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("lastmod/config.toml");
    let toml = r#"
version = 1
profile = "default"

[profiles.default]
vault_root = "/tmp/def"

[profiles.work]
vault_root = "/tmp/work"
settings_file = "{{vault_root}}/conf/lastmod.json"
debounce_ms = 250
extensions = [".md", "markdown"]
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), Some("work")).expect("should load");
    assert_eq!(rc.active_profile, "work");
    assert_eq!(rc.vault_root.display().to_string(), "/tmp/work");
    assert_eq!(rc.settings_file, Path::new("/tmp/work/conf/lastmod.json"));
    assert_eq!(rc.debounce, Duration::from_millis(250));
    assert_eq!(rc.extensions, ["md", "markdown"]);
    assert!(rc.is_watched(Path::new("/tmp/work/a.MD")));
    assert!(rc.is_watched(Path::new("notes/b.markdown")));
    assert!(!rc.is_watched(Path::new("image.png")));
}

#[test]
fn log_file_expands_vault_root() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1

[profiles.default]
vault_root = "/tmp/vault"

[logging]
level = "debug"
file = "{{vault_root}}/.lastmod/lastmod.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path), None).expect("should load");
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(
        rc.logging.file.as_deref(),
        Some(Path::new("/tmp/vault/.lastmod/lastmod.log"))
    );
}
