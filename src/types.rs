//! Canonical feed entities.
//!
//! Everything past the normalizer works with these fully-typed structures.
//! Optional wire-level fields become empty-but-valid values here, so
//! consumers never need null checks.

use serde::{Deserialize, Serialize};

/// One like or comment attached to a moment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Stable identifier of the interacting person. Empty means the
    /// interaction carries no usable identity.
    pub handle: String,
    /// Display name the handle showed at the time of the interaction.
    /// A historical artifact, never a live lookup.
    #[serde(default)]
    pub snapshot_name: String,
    /// Unix timestamp of the interaction, 0 when the export omitted it.
    #[serde(default)]
    pub timestamp: i64,
    /// Comment text; empty for likes.
    #[serde(default)]
    pub text: String,
    /// Handle of the person this comment replies to, if any. Comments only;
    /// names a participant who issued no record of their own.
    #[serde(default)]
    pub reply_to: String,
}

/// One media attachment of a moment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    /// "image" or "video".
    pub kind: String,
    pub src: String,
    #[serde(default)]
    pub thumb: String,
}

/// Post body of a moment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MomentContent {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

/// Engagement counters as reported by the export.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MomentStats {
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
}

/// One feed post with its author, content, and nested interactions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Moment {
    /// Unique within a batch.
    pub id: String,
    /// Author handle; empty for malformed records, which are retained so
    /// counts stay truthful but excluded from identity-bearing aggregation.
    pub author_handle: String,
    /// Unix timestamp of the post.
    pub timestamp: i64,
    /// Human-readable date: the export's supplied string, or derived from
    /// `timestamp` with a fixed UTC format.
    pub display_date: String,
    pub content: MomentContent,
    pub stats: MomentStats,
    pub likes: Vec<Interaction>,
    pub comments: Vec<Interaction>,
}

impl Moment {
    /// Whether this moment can anchor identity-bearing aggregations.
    pub fn has_author(&self) -> bool {
        !self.author_handle.is_empty()
    }
}

/// Derived directory row for one author. Never stored; recomputed from the
/// batch on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactSummary {
    pub handle: String,
    /// Resolved display name (override > harvested snapshot > raw handle).
    pub name: String,
    /// Number of moments authored by this handle in the batch.
    pub moment_count: usize,
    /// Timestamp of the author's most recent moment. Ordering always uses
    /// this, never the display string.
    pub latest_timestamp: i64,
    /// Display date of the author's most recent moment.
    pub latest_date: String,
}
