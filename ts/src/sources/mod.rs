//! Document source aggregation: configured origins -> one ordered list

mod aggregate;

pub use aggregate::SourceAggregator;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Period granularity for the current-period scope restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    /// True when `date` falls in the same period as `today`
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Day => date == today,
            Self::Week => date.iso_week() == today.iso_week(),
            Self::Month => date.year() == today.year() && date.month() == today.month(),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
        }
    }
}

/// Scope restriction applied to the candidate set before ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeFilters {
    /// Keep only documents belonging to the current period
    #[serde(rename = "current-period-only")]
    pub current_period_only: bool,

    /// Period granularity
    pub period: Period,

    /// strftime pattern for date-carrying filename stems
    #[serde(rename = "date-pattern")]
    pub date_pattern: String,
}

impl Default for ScopeFilters {
    fn default() -> Self {
        Self {
            current_period_only: false,
            period: Period::Day,
            date_pattern: "%Y-%m-%d".to_string(),
        }
    }
}

impl ScopeFilters {
    /// The default scope with the current-period restriction switched on
    pub fn current_period(period: Period) -> Self {
        Self {
            current_period_only: true,
            period,
            ..Self::default()
        }
    }
}
