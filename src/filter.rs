//! Relationship-driven feed filtering.
//!
//! A stateless projection of the batch through externally-set selector
//! values. Two modes: single-author (only that author's moments) and radar
//! (every moment a target identity touched or received engagement on).

use crate::types::Moment;
use serde::{Deserialize, Serialize};

/// Externally-set selector state for the feed view.
///
/// Radar takes precedence when both slots are set. Empty slots mean "no
/// selection", never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    /// Single-author mode: show only this author's moments.
    #[serde(default)]
    pub selected_author: Option<String>,
    /// Radar mode: show moments this identity touched or received.
    #[serde(default)]
    pub radar_target: Option<String>,
}

enum Mode<'a> {
    Author(&'a str),
    Radar(&'a str),
}

impl Selection {
    pub fn author(handle: impl Into<String>) -> Self {
        Self {
            selected_author: Some(handle.into()),
            radar_target: None,
        }
    }

    pub fn radar(handle: impl Into<String>) -> Self {
        Self {
            selected_author: None,
            radar_target: Some(handle.into()),
        }
    }

    /// True when neither slot holds a usable handle.
    pub fn is_none(&self) -> bool {
        self.mode().is_none()
    }

    fn mode(&self) -> Option<Mode<'_>> {
        if let Some(target) = self.radar_target.as_deref() {
            if !target.is_empty() {
                return Some(Mode::Radar(target));
            }
        }
        if let Some(author) = self.selected_author.as_deref() {
            if !author.is_empty() {
                return Some(Mode::Author(author));
            }
        }
        None
    }
}

/// Project the batch through the current selection.
///
/// Pure and deterministic; preserves batch order among matches. Malformed
/// interaction fields are treated as "no match", never as errors.
pub fn filter_moments(moments: &[Moment], selection: &Selection) -> Vec<Moment> {
    match selection.mode() {
        None => moments.to_vec(),
        Some(Mode::Author(author)) => moments
            .iter()
            .filter(|m| m.author_handle == author)
            .cloned()
            .collect(),
        Some(Mode::Radar(target)) => moments
            .iter()
            .filter(|m| radar_match(m, target))
            .cloned()
            .collect(),
    }
}

/// Two-hop radar visibility for one moment.
///
/// Active participation: the target liked, commented, or was the reply
/// target of a comment. Passive reception: the target authored the moment
/// and at least one interaction comes from somebody else. Interactions
/// without a usable handle neither match nor count as outside engagement.
fn radar_match(moment: &Moment, target: &str) -> bool {
    let active = moment.likes.iter().any(|l| l.handle == target)
        || moment
            .comments
            .iter()
            .any(|c| c.handle == target || c.reply_to == target);
    if active {
        return true;
    }

    moment.author_handle == target
        && moment
            .likes
            .iter()
            .chain(moment.comments.iter())
            .any(|i| !i.handle.is_empty() && i.handle != target)
}
