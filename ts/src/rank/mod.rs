//! Tiered top-task ranking
//!
//! The ranker takes a snapshot of the tasks loaded so far, returns a fresh
//! annotated snapshot, and emits a discrete notification of the outcome on
//! its own subscription channel. It never mutates caller-owned data and
//! never triggers additional scanning.

mod events;
mod ranker;

pub use events::{DEFAULT_CHANNEL_CAPACITY, RankEvent, RankEvents};
pub use ranker::{RankOutcome, Ranker};
