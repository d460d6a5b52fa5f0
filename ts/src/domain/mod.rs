//! Core task record types

mod task;
mod tier;

pub use task::{RankedTask, TaskLine};
pub use tier::RankTier;
