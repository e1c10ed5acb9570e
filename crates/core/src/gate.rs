//! Auto-update gate and the deferred run that follows a save.
//!
//! Every file-modified event goes through [`evaluate`]. Documents that pass
//! are put on a [`DeferredQueue`] and updated once the delay has elapsed, so
//! the write does not race the save that triggered it.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde_yaml::Value;

use crate::frontmatter::{Frontmatter, parse_lenient};
use crate::settings::{OVERRIDE_FLAG, Settings};

/// Default delay between a save and the follow-up update.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Why a modified document was or was not scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// `autoUpdateEnabled` is off.
    GloballyDisabled,
    NoFrontmatter,
    /// Disabled by the override flag or by `enabledByDefault`.
    OptedOut,
    Schedule,
}

/// Decide whether a modified document should be auto-updated.
pub fn evaluate(settings: &Settings, content: &str) -> GateDecision {
    if !settings.auto_update_enabled {
        return GateDecision::GloballyDisabled;
    }

    let doc = parse_lenient(content);
    let Some(fm) = doc.frontmatter else {
        return GateDecision::NoFrontmatter;
    };

    if effective_enabled(settings, &fm) { GateDecision::Schedule } else { GateDecision::OptedOut }
}

/// The override flag if present, else `enabledByDefault`.
pub fn effective_enabled(settings: &Settings, fm: &Frontmatter) -> bool {
    match fm.get(OVERRIDE_FLAG) {
        None => settings.enabled_by_default,
        Some(Value::Bool(enabled)) => *enabled,
        Some(other) => {
            tracing::warn!(
                flag = OVERRIDE_FLAG,
                value = ?other,
                "override flag is not a boolean, using default"
            );
            settings.enabled_by_default
        }
    }
}

/// Runs keyed tasks once a fixed delay has passed.
///
/// The queue is driven by the host's own loop: ask for
/// [`next_deadline`](Self::next_deadline), wait, then
/// [`take_due`](Self::take_due). A key that is already pending is not
/// scheduled twice.
#[derive(Debug)]
pub struct DeferredQueue<K> {
    delay: Duration,
    pending: VecDeque<(Instant, K)>,
}

impl<K: PartialEq> DeferredQueue<K> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: VecDeque::new() }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `key` to run `delay` after `now`.
    ///
    /// Returns `false` if the key was already pending.
    pub fn schedule(&mut self, key: K, now: Instant) -> bool {
        if self.is_pending(&key) {
            return false;
        }
        // Constant delay keeps the queue sorted by due time.
        self.pending.push_back((now + self.delay, key));
        true
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.iter().any(|(_, k)| k == key)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.front().map(|(due, _)| *due)
    }

    /// Remove and return every task due at `now`, oldest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|(at, _)| *at <= now) {
            if let Some((_, key)) = self.pending.pop_front() {
                due.push(key);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K: PartialEq> Default for DeferredQueue<K> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

/// Remembers what the host last wrote to each document.
///
/// A modified event whose text matches is the echo of our own write and is
/// ignored, so an update never re-triggers itself.
#[derive(Debug, Default)]
pub struct RecentWrites {
    written: HashMap<PathBuf, u64>,
}

impl RecentWrites {
    pub fn record(&mut self, doc: &Path, content: &str) {
        self.written.insert(doc.to_path_buf(), fingerprint(content));
    }

    pub fn is_echo(&self, doc: &Path, content: &str) -> bool {
        self.written.get(doc).is_some_and(|f| *f == fingerprint(content))
    }

    pub fn forget(&mut self, doc: &Path) {
        self.written.remove(doc);
    }
}

fn fingerprint(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}
