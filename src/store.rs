//! Loaded-batch store: owns the current snapshot and serves derived views.

use crate::config::RadarConfig;
use crate::contacts::{aggregate_contacts, AddressBook};
use crate::filter::{filter_moments, Selection};
use crate::identity::{resolve_name, IdentityIndex};
use crate::normalize::normalize_batch;
use crate::types::{ContactSummary, Moment};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default)]
struct Snapshot {
    moments: Vec<Moment>,
    index: IdentityIndex,
}

/// In-memory store over one loaded feed batch.
///
/// [`RadarStore::load`] replaces the whole snapshot under a single write
/// lock, so concurrent readers never observe a half-rebuilt index. Every
/// view is a pure projection of the current snapshot and selector state;
/// there is no incremental update or deletion path.
pub struct RadarStore {
    book: Arc<dyn AddressBook>,
    config: RadarConfig,
    snapshot: RwLock<Snapshot>,
    selection: RwLock<Selection>,
}

impl RadarStore {
    pub fn new(book: Arc<dyn AddressBook>) -> Self {
        Self::with_config(book, RadarConfig::default())
    }

    pub fn with_config(book: Arc<dyn AddressBook>, config: RadarConfig) -> Self {
        Self {
            book,
            config,
            snapshot: RwLock::new(Snapshot::default()),
            selection: RwLock::new(Selection::default()),
        }
    }

    /// Normalize a raw batch and replace all prior state with it.
    ///
    /// The export is newest-first, so the configured cap keeps the newest
    /// records. Loading the same batch twice yields identical views.
    pub fn load(&self, raw: &[Value]) {
        let mut moments = normalize_batch(raw);
        if self.config.max_moments > 0 && moments.len() > self.config.max_moments {
            moments.truncate(self.config.max_moments);
        }
        let index = IdentityIndex::build(&moments);
        info!(
            "Loaded batch: {} moments, {} indexed identities",
            moments.len(),
            index.len()
        );
        *self.snapshot.write() = Snapshot { moments, index };
    }

    /// Best display name for a handle under the current snapshot.
    pub fn resolve(&self, handle: &str) -> String {
        let snapshot = self.snapshot.read();
        resolve_name(self.book.as_ref(), &snapshot.index, handle)
    }

    /// Directory view over the current batch.
    pub fn contacts(&self) -> Vec<ContactSummary> {
        let snapshot = self.snapshot.read();
        aggregate_contacts(&snapshot.moments, self.book.as_ref(), &snapshot.index)
    }

    /// Current feed view, reactive to the selector slots.
    pub fn filtered_moments(&self) -> Vec<Moment> {
        let selection = self.selection.read().clone();
        let snapshot = self.snapshot.read();
        filter_moments(&snapshot.moments, &selection)
    }

    /// Full normalized batch in input order.
    pub fn moments(&self) -> Vec<Moment> {
        self.snapshot.read().moments.clone()
    }

    pub fn select_author(&self, handle: Option<String>) {
        self.selection.write().selected_author = handle;
    }

    pub fn set_radar_target(&self, handle: Option<String>) {
        self.selection.write().radar_target = handle;
    }

    pub fn clear_selection(&self) {
        *self.selection.write() = Selection::default();
    }

    pub fn selection(&self) -> Selection {
        self.selection.read().clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot.read().moments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.read().moments.is_empty()
    }
}
