//! Capabilities supplied by the editor hosting the updater.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read and write documents by reference.
pub trait DocumentStore {
    fn read(&self, doc: &Path) -> io::Result<String>;
    fn write(&self, doc: &Path, content: &str) -> io::Result<()>;
}

/// Display a transient message to the user.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Documents stored as files under a vault directory.
///
/// Relative references resolve against the vault root.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, doc: &Path) -> PathBuf {
        if doc.is_absolute() { doc.to_path_buf() } else { self.root.join(doc) }
    }
}

impl DocumentStore for FsVault {
    fn read(&self, doc: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(doc))
    }

    fn write(&self, doc: &Path, content: &str) -> io::Result<()> {
        fs::write(self.resolve(doc), content)
    }
}

/// Notifier that keeps every message, for hosts that render them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
