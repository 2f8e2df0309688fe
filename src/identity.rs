//! Global identity index and the display-name resolution chain.

use crate::contacts::{AddressBook, UNKNOWN_CONTACT};
use crate::types::Moment;
use std::collections::HashMap;
use tracing::debug;

/// Handle → best-known snapshot name, harvested from every like and comment
/// in the batch.
///
/// Rebuilt wholesale on every load and never patched in place. Later
/// occurrences overwrite earlier ones in batch order; within a moment, likes
/// are visited before comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityIndex {
    names: HashMap<String, String>,
}

impl IdentityIndex {
    /// Single pass over the normalized batch. Interactions without a usable
    /// handle or without a snapshot name are left unindexed; the resolver
    /// falls through to the raw handle for those.
    pub fn build(moments: &[Moment]) -> Self {
        let mut names = HashMap::new();
        for moment in moments {
            for interaction in moment.likes.iter().chain(moment.comments.iter()) {
                if interaction.handle.is_empty() || interaction.snapshot_name.is_empty() {
                    continue;
                }
                names.insert(interaction.handle.clone(), interaction.snapshot_name.clone());
            }
        }
        debug!("Identity index rebuilt: {} handles", names.len());
        Self { names }
    }

    pub fn snapshot_name(&self, handle: &str) -> Option<&str> {
        self.names.get(handle).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolve the best display name for a handle. Total function; never fails.
///
/// Priority, first match wins:
/// 1. address-book override, unless it is the unknown sentinel or merely
///    echoes the raw handle;
/// 2. harvested snapshot name from the index;
/// 3. the raw handle verbatim.
pub fn resolve_name(book: &dyn AddressBook, index: &IdentityIndex, handle: &str) -> String {
    let override_name = book.display_name(handle);
    if !override_name.is_empty() && override_name != UNKNOWN_CONTACT && override_name != handle {
        return override_name;
    }
    if let Some(name) = index.snapshot_name(handle) {
        return name.to_string();
    }
    handle.to_string()
}
