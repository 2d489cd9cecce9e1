//! Bucket events and votes onto canonical weekend windows.
//!
//! Anything whose timestamp cannot be resolved is kept aside as unbucketed
//! (or rejected, for votes). It is never assigned a guessed weekend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::weekend::{resolve_weekend_with_options, WeekendOptions, WeekendWindow};

// ── Event grouping ──────────────────────────────────────────────────────────

/// All items that fell into one weekend, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendBucket<T> {
    #[serde(flatten)]
    pub window: WeekendWindow,
    pub items: Vec<T>,
}

/// The result of [`group_by_weekend`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendGroups<T> {
    /// One bucket per weekend, ordered by weekend start.
    pub buckets: Vec<WeekendBucket<T>>,
    /// Items without a usable timestamp, in input order.
    pub unbucketed: Vec<T>,
}

impl<T> WeekendGroups<T> {
    pub fn bucket(&self, window: &WeekendWindow) -> Option<&WeekendBucket<T>> {
        self.buckets.iter().find(|b| b.window == *window)
    }

    pub fn windows(&self) -> impl Iterator<Item = &WeekendWindow> {
        self.buckets.iter().map(|b| &b.window)
    }
}

/// Group items by the weekend their timestamp falls in.
///
/// `timestamp_of` extracts the timestamp string of an item; returning `None`
/// marks the item as having no timestamp. Items whose timestamp is missing or
/// unparseable end up in [`WeekendGroups::unbucketed`].
///
/// # Examples
///
/// ```
/// use weekend_engine::{group_by_weekend, WeekendOptions};
///
/// let games = vec![
///     ("late game", "2025-06-14T19:00:00Z"),
///     ("matinee", "2025-06-15T13:00:00Z"),
///     ("typo", "2025-06-3x"),
/// ];
/// let groups = group_by_weekend(games, |g| Some(g.1), &WeekendOptions::default());
/// assert_eq!(groups.buckets.len(), 1);
/// assert_eq!(groups.buckets[0].items.len(), 2);
/// assert_eq!(groups.unbucketed.len(), 1);
/// ```
pub fn group_by_weekend<T, I, F>(
    items: I,
    timestamp_of: F,
    options: &WeekendOptions,
) -> WeekendGroups<T>
where
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> Option<&str>,
{
    let mut by_window: BTreeMap<WeekendWindow, Vec<T>> = BTreeMap::new();
    let mut unbucketed = Vec::new();

    for item in items {
        let window = match timestamp_of(&item) {
            Some(timestamp) => match resolve_weekend_with_options(timestamp, options) {
                Ok(window) => {
                    debug!(timestamp, %window, "bucketed item");
                    Some(window)
                }
                Err(err) => {
                    warn!(timestamp, %err, "leaving item unbucketed");
                    None
                }
            },
            None => {
                warn!("leaving item without a timestamp unbucketed");
                None
            }
        };

        match window {
            Some(window) => by_window.entry(window).or_default().push(item),
            None => unbucketed.push(item),
        }
    }

    WeekendGroups {
        buckets: by_window
            .into_iter()
            .map(|(window, items)| WeekendBucket { window, items })
            .collect(),
        unbucketed,
    }
}

// ── Vote tally ──────────────────────────────────────────────────────────────

/// A member's vote for the weekend containing `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekendVote {
    pub voter: String,
    pub timestamp: String,
}

impl WeekendVote {
    pub fn new(voter: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            voter: voter.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Votes collected by one weekend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekendTally {
    #[serde(flatten)]
    pub window: WeekendWindow,
    pub votes: usize,
    /// Distinct voters, in the order their first vote arrived.
    pub voters: Vec<String>,
}

/// The result of [`tally_votes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteSummary {
    /// Most votes first; ties broken by the earlier weekend.
    pub tallies: Vec<WeekendTally>,
    /// Votes whose timestamp could not be resolved.
    pub rejected: Vec<WeekendVote>,
}

impl VoteSummary {
    /// The weekend with strictly the most votes, or `None` on a tie or no votes.
    pub fn leader(&self) -> Option<&WeekendTally> {
        match self.tallies.as_slice() {
            [first, second, ..] if first.votes == second.votes => None,
            [first, ..] => Some(first),
            [] => None,
        }
    }
}

/// Count votes per weekend. A voter counts once per weekend no matter how
/// many timestamps they submitted inside it.
pub fn tally_votes(votes: &[WeekendVote], options: &WeekendOptions) -> VoteSummary {
    let mut by_window: BTreeMap<WeekendWindow, Vec<String>> = BTreeMap::new();
    let mut rejected = Vec::new();

    for vote in votes {
        match resolve_weekend_with_options(&vote.timestamp, options) {
            Ok(window) => {
                let voters = by_window.entry(window).or_default();
                if voters.contains(&vote.voter) {
                    debug!(voter = %vote.voter, %window, "ignoring repeat vote");
                } else {
                    voters.push(vote.voter.clone());
                }
            }
            Err(err) => {
                warn!(voter = %vote.voter, timestamp = %vote.timestamp, %err, "rejecting vote");
                rejected.push(vote.clone());
            }
        }
    }

    let mut tallies: Vec<WeekendTally> = by_window
        .into_iter()
        .map(|(window, voters)| WeekendTally {
            window,
            votes: voters.len(),
            voters,
        })
        .collect();
    tallies.sort_by(|a, b| b.votes.cmp(&a.votes).then_with(|| a.window.cmp(&b.window)));

    VoteSummary { tallies, rejected }
}
