//! Identity indexing and relationship-filtered views over exported
//! social-feed moments.
//!
//! A "moment" is one feed post plus its likes and comments, exported by an
//! external extraction pipeline. Given one in-memory batch of such records,
//! this crate normalizes them into canonical entities, harvests every
//! observed identity into a global index, resolves display names through a
//! fixed priority chain (address-book override > harvested snapshot name >
//! raw handle), and derives two views: a contact directory of authors and a
//! relationship-filtered feed with single-author and radar modes.
//!
//! The core is synchronous and side-effect free: [`RadarStore::load`]
//! atomically replaces all state, and every view is recomputed on demand
//! from the current snapshot. Fetching, persistence, and markup parsing
//! belong to external collaborators.

pub mod config;
pub mod contacts;
pub mod filter;
pub mod identity;
pub mod normalize;
pub mod store;
pub mod types;

pub use config::{ConfigError, RadarConfig};
pub use contacts::{
    aggregate_contacts, AddressBook, AddressBookError, EmptyAddressBook, SqliteAddressBook,
    StaticAddressBook, UNKNOWN_CONTACT,
};
pub use filter::{filter_moments, Selection};
pub use identity::{resolve_name, IdentityIndex};
pub use normalize::{normalize_batch, normalize_record, parse_export, ExportError};
pub use store::RadarStore;
pub use types::{ContactSummary, Interaction, MediaItem, Moment, MomentContent, MomentStats};
