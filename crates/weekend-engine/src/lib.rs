//! # weekend-engine
//!
//! Deterministic weekend bucketing for group trip planning.
//!
//! Maps any timestamp to the Friday..Sunday weekend that contains it, so
//! events, votes and weekend options recorded at different times collapse
//! onto one canonical planning bucket.
//!
//! ## Modules
//!
//! - [`weekend`]: Timestamp → [`WeekendWindow`] resolution, anchor and timezone options
//! - [`grouping`]: Bucket events by weekend and tally member votes per weekend
//! - [`options`]: Generate candidate weekends for a trip
//! - [`error`]: Error types

pub mod error;
pub mod grouping;
pub mod options;
pub mod weekend;

pub use error::WeekendError;
pub use grouping::{
    group_by_weekend, tally_votes, VoteSummary, WeekendBucket, WeekendGroups, WeekendTally,
    WeekendVote,
};
pub use options::{upcoming_weekends, weekends_between, MAX_WEEKEND_OPTIONS};
pub use weekend::{
    resolve_weekend, resolve_weekend_with_options, weekend_containing, WeekendAnchor,
    WeekendOptions, WeekendWindow, WEEKEND_SPAN_DAYS,
};
