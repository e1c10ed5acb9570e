//! Watch command: auto-update notes after they are saved.
//!
//! File events arrive on a channel and pass through the auto-update gate.
//! Accepted notes wait on a [`DeferredQueue`] for the configured delay and
//! are then updated on this same thread.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::Instant;

use lastmod_core::CommandRunner;
use lastmod_core::config::types::ResolvedConfig;
use lastmod_core::gate::{self, DeferredQueue, GateDecision, RecentWrites};
use lastmod_core::host::{DocumentStore, FsVault};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::{Host, load_config};

/// Vault wrapper that remembers its own writes so their events are ignored.
pub struct EchoGuard {
    inner: FsVault,
    writes: RefCell<RecentWrites>,
}

impl EchoGuard {
    pub fn new(inner: FsVault) -> Self {
        Self { inner, writes: RefCell::new(RecentWrites::default()) }
    }

    pub fn is_echo(&self, doc: &Path, content: &str) -> bool {
        self.writes.borrow().is_echo(doc, content)
    }

    /// Drop the remembered write once the file has moved on without us.
    pub fn forget(&self, doc: &Path) {
        self.writes.borrow_mut().forget(doc);
    }
}

impl DocumentStore for EchoGuard {
    fn read(&self, doc: &Path) -> io::Result<String> {
        self.inner.read(doc)
    }

    fn write(&self, doc: &Path, content: &str) -> io::Result<()> {
        self.inner.write(doc, content)?;
        self.writes.borrow_mut().record(doc, content);
        Ok(())
    }
}

pub fn run(config_path: Option<&Path>, profile: Option<&str>) {
    let cfg = load_config(config_path, profile);
    let host = Host::with_documents(&cfg, EchoGuard::new(FsVault::new(&cfg.vault_root)));
    let runner = host.runner();

    if !runner.settings().auto_update_enabled {
        println!("Auto-update is disabled; enable it with 'lastmod toggle-global'.");
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = match RecommendedWatcher::new(tx, Config::default()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Failed to start watcher: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = watcher.watch(&cfg.vault_root, RecursiveMode::Recursive) {
        eprintln!("Failed to watch {}: {e}", cfg.vault_root.display());
        std::process::exit(1);
    }

    let mut queue = DeferredQueue::new(cfg.debounce);
    println!("Watching {} (Ctrl-C to stop)", cfg.vault_root.display());
    tracing::info!(
        vault = %cfg.vault_root.display(),
        delay_ms = queue.delay().as_millis() as u64,
        "watching"
    );

    loop {
        let received = match queue.next_deadline() {
            Some(deadline) => {
                rx.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Ok(event)) => on_event(&cfg, &runner, &host.documents, &mut queue, event),
            Ok(Err(e)) => tracing::warn!("watch error: {e}"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        for doc in queue.take_due(Instant::now()) {
            runner.update_last_modified(Some(&doc));
        }
    }
}

fn on_event(
    cfg: &ResolvedConfig,
    runner: &CommandRunner<'_>,
    guard: &EchoGuard,
    queue: &mut DeferredQueue<PathBuf>,
    event: Event,
) {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => {}
        EventKind::Remove(_) => {
            for path in &event.paths {
                guard.forget(path);
            }
            return;
        }
        _ => return,
    }

    for path in event.paths {
        if !path.is_file() || !cfg.is_watched(&path) || is_hidden(&cfg.vault_root, &path) {
            continue;
        }
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(path = %path.display(), "unreadable: {e}");
                continue;
            }
        };
        if guard.is_echo(&path, &content) {
            tracing::trace!(path = %path.display(), "ignoring own write");
            continue;
        }
        guard.forget(&path);

        match gate::evaluate(runner.settings(), &content) {
            GateDecision::Schedule => {
                if queue.schedule(path.clone(), Instant::now()) {
                    tracing::debug!(path = %path.display(), "update scheduled");
                }
            }
            decision => tracing::trace!(path = %path.display(), ?decision, "not scheduled"),
        }
    }
}

/// Whether `path` sits in a dot-directory (or is a dotfile) inside the vault.
fn is_hidden(vault_root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(vault_root).unwrap_or(path);
    rel.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lastmod_core::config::types::LoggingConfig;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
    use std::time::Duration;
    use tempfile::tempdir;

    fn cfg(root: &Path) -> ResolvedConfig {
        ResolvedConfig {
            active_profile: "default".into(),
            vault_root: root.to_path_buf(),
            settings_file: root.join(".lastmod/settings.json"),
            debounce: Duration::from_millis(100),
            extensions: vec!["md".into()],
            logging: LoggingConfig::default(),
        }
    }

    fn enable_auto_update(cfg: &ResolvedConfig) {
        fs::create_dir_all(cfg.settings_file.parent().unwrap()).unwrap();
        fs::write(&cfg.settings_file, r#"{"autoUpdateEnabled": true}"#).unwrap();
    }

    fn modified(paths: &[&Path]) -> Event {
        paths.iter().fold(
            Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            |event, p| event.add_path(p.to_path_buf()),
        )
    }

    #[test]
    fn echo_guard_recognises_its_own_writes() {
        let tmp = tempdir().unwrap();
        let guard = EchoGuard::new(FsVault::new(tmp.path()));
        let doc = tmp.path().join("note.md");

        guard.write(&doc, "---\na: 1\n---\n").unwrap();
        assert!(guard.is_echo(&doc, "---\na: 1\n---\n"));
        assert!(!guard.is_echo(&doc, "---\na: 2\n---\n"));
        assert_eq!(guard.read(&doc).unwrap(), "---\na: 1\n---\n");

        guard.forget(&doc);
        assert!(!guard.is_echo(&doc, "---\na: 1\n---\n"));
    }

    #[test]
    fn only_eligible_notes_reach_the_queue() {
        let tmp = tempdir().unwrap();
        let cfg = cfg(tmp.path());
        enable_auto_update(&cfg);

        let note = tmp.path().join("note.md");
        let plain = tmp.path().join("plain.md");
        let text = tmp.path().join("note.txt");
        let hidden = tmp.path().join(".obsidian/workspace.md");
        fs::create_dir_all(hidden.parent().unwrap()).unwrap();
        fs::write(&note, "---\ntitle: X\n---\nBody").unwrap();
        fs::write(&plain, "no frontmatter").unwrap();
        fs::write(&text, "---\ntitle: X\n---\n").unwrap();
        fs::write(&hidden, "---\ntitle: X\n---\n").unwrap();

        let host = Host::with_documents(&cfg, EchoGuard::new(FsVault::new(&cfg.vault_root)));
        let runner = host.runner();
        let mut queue = DeferredQueue::new(cfg.debounce);

        let event = modified(&[&note, &plain, &text, &hidden, &tmp.path().join("gone.md")]);
        on_event(&cfg, &runner, &host.documents, &mut queue, event);
        on_event(&cfg, &runner, &host.documents, &mut queue, modified(&[&note]));

        assert_eq!(queue.len(), 1);
        assert!(queue.is_pending(&note));
    }

    #[test]
    fn own_writes_are_dropped_before_the_queue() {
        let tmp = tempdir().unwrap();
        let cfg = cfg(tmp.path());
        enable_auto_update(&cfg);

        let host = Host::with_documents(&cfg, EchoGuard::new(FsVault::new(&cfg.vault_root)));
        let runner = host.runner();
        let mut queue = DeferredQueue::new(cfg.debounce);

        let note = tmp.path().join("note.md");
        host.documents.write(&note, "---\ntitle: X\n---\n").unwrap();
        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(note.clone());
        on_event(&cfg, &runner, &host.documents, &mut queue, created);
        assert!(queue.is_empty());

        // An edit by someone else is scheduled and clears the remembered write.
        fs::write(&note, "---\ntitle: Y\n---\n").unwrap();
        on_event(&cfg, &runner, &host.documents, &mut queue, modified(&[&note]));
        assert!(queue.is_pending(&note));
        assert!(!host.documents.is_echo(&note, "---\ntitle: X\n---\n"));
    }

    #[test]
    fn removal_forgets_the_document() {
        let tmp = tempdir().unwrap();
        let cfg = cfg(tmp.path());
        let host = Host::with_documents(&cfg, EchoGuard::new(FsVault::new(&cfg.vault_root)));
        let runner = host.runner();
        let mut queue = DeferredQueue::new(cfg.debounce);

        let note = tmp.path().join("note.md");
        host.documents.write(&note, "text").unwrap();
        fs::remove_file(&note).unwrap();

        let removed = Event::new(EventKind::Remove(RemoveKind::File)).add_path(note.clone());
        on_event(&cfg, &runner, &host.documents, &mut queue, removed);
        assert!(!host.documents.is_echo(&note, "text"));
        assert!(queue.is_empty());
    }

    #[test]
    fn dot_directories_are_hidden() {
        let root = Path::new("/vault");
        assert!(is_hidden(root, Path::new("/vault/.obsidian/workspace.md")));
        assert!(is_hidden(root, Path::new("/vault/notes/.draft.md")));
        assert!(!is_hidden(root, Path::new("/vault/notes/today.md")));
    }
}
