//! Address-book collaborators and the contact directory view.
//!
//! The address book is an external override source: it maps handles to
//! remarks/nicknames maintained outside the feed. The directory view
//! aggregates the batch per author and resolves each name through the
//! standard chain.

use crate::identity::{resolve_name, IdentityIndex};
use crate::types::{ContactSummary, Moment};
use rusqlite::{Connection, OpenFlags};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Sentinel returned by an address book that has no entry for a handle.
pub const UNKNOWN_CONTACT: &str = "unknown";

/// External identity-override lookup (remarks / nicknames).
pub trait AddressBook: Send + Sync {
    /// Best override name for a handle, or [`UNKNOWN_CONTACT`] when the book
    /// has no entry.
    fn display_name(&self, handle: &str) -> String;
}

/// Address book with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyAddressBook;

impl AddressBook for EmptyAddressBook {
    fn display_name(&self, _handle: &str) -> String {
        UNKNOWN_CONTACT.to_string()
    }
}

/// In-memory address book for embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAddressBook {
    entries: HashMap<String, String>,
}

impl StaticAddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handle: impl Into<String>, name: impl Into<String>) {
        self.entries.insert(handle.into(), name.into());
    }
}

impl AddressBook for StaticAddressBook {
    fn display_name(&self, handle: &str) -> String {
        self.entries
            .get(handle)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_CONTACT.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AddressBookError {
    #[error("failed to open contact database: {0}")]
    Open(#[source] rusqlite::Error),
    #[error("failed to read contact rows: {0}")]
    Query(#[source] rusqlite::Error),
}

struct ContactRow {
    remark: String,
    nickname: String,
}

/// Address book backed by the collaborator's contact database.
///
/// Rows are loaded once at open; lookups never touch the database again.
/// Chatroom and service accounts are skipped, as they are not people.
pub struct SqliteAddressBook {
    entries: HashMap<String, ContactRow>,
}

impl SqliteAddressBook {
    pub fn open(path: &Path) -> Result<Self, AddressBookError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(AddressBookError::Open)?;
        Self::load(&conn)
    }

    fn load(conn: &Connection) -> Result<Self, AddressBookError> {
        let mut stmt = conn
            .prepare(
                "SELECT UserName, Remark, NickName
                 FROM Contact
                 WHERE UserName NOT LIKE '%@chatroom'
                 AND UserName NOT LIKE 'gh_%'",
            )
            .map_err(AddressBookError::Query)?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1).unwrap_or_default(),
                    row.get::<_, String>(2).unwrap_or_default(),
                ))
            })
            .map_err(AddressBookError::Query)?;

        let mut entries = HashMap::new();
        for row in rows {
            let (username, remark, nickname) = row.map_err(AddressBookError::Query)?;
            if username.is_empty() {
                continue;
            }
            entries.insert(username, ContactRow { remark, nickname });
        }

        info!("Loaded {} contacts from address book", entries.len());
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AddressBook for SqliteAddressBook {
    /// Remark outranks nickname; a contact with neither is still unknown.
    fn display_name(&self, handle: &str) -> String {
        match self.entries.get(handle) {
            Some(row) if !row.remark.is_empty() => row.remark.clone(),
            Some(row) if !row.nickname.is_empty() => row.nickname.clone(),
            _ => UNKNOWN_CONTACT.to_string(),
        }
    }
}

/// Build the directory view: one row per distinct non-empty author handle.
///
/// Ordered by descending moment count, ties broken by ascending handle so
/// the output is stable. Latest activity is chosen by numeric timestamp,
/// never by comparing display strings.
pub fn aggregate_contacts(
    moments: &[Moment],
    book: &dyn AddressBook,
    index: &IdentityIndex,
) -> Vec<ContactSummary> {
    struct Entry {
        count: usize,
        latest_timestamp: i64,
        latest_date: String,
    }

    let mut by_handle: HashMap<&str, Entry> = HashMap::new();
    for moment in moments {
        if !moment.has_author() {
            continue;
        }
        let entry = by_handle
            .entry(moment.author_handle.as_str())
            .or_insert(Entry {
                count: 0,
                latest_timestamp: i64::MIN,
                latest_date: String::new(),
            });
        entry.count += 1;
        if moment.timestamp >= entry.latest_timestamp {
            entry.latest_timestamp = moment.timestamp;
            entry.latest_date = moment.display_date.clone();
        }
    }

    let mut contacts: Vec<ContactSummary> = by_handle
        .into_iter()
        .map(|(handle, entry)| ContactSummary {
            name: resolve_name(book, index, handle),
            handle: handle.to_string(),
            moment_count: entry.count,
            latest_timestamp: entry.latest_timestamp,
            latest_date: entry.latest_date,
        })
        .collect();

    contacts.sort_by(|a, b| {
        b.moment_count
            .cmp(&a.moment_count)
            .then_with(|| a.handle.cmp(&b.handle))
    });
    contacts
}
