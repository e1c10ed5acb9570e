#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary vault with a config file pointing at it.
pub struct Vault {
    pub dir: TempDir,
    pub root: PathBuf,
    pub config: PathBuf,
}

impl Vault {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("vault");
        fs::create_dir_all(&root).unwrap();
        let config = dir.path().join("config.toml");
        fs::write(
            &config,
            format!("version = 1\n\n[profiles.default]\nvault_root = \"{}\"\n", root.display()),
        )
        .unwrap();
        Self { dir, root, config }
    }

    pub fn note(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root.join(name)).unwrap()
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(".lastmod").join("settings.json")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lastmod"));
        cmd.arg("--config").arg(&self.config);
        cmd.current_dir(self.dir.path());
        cmd
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}
