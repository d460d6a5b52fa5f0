//! Ranking tiers

use serde::{Deserialize, Serialize};

/// One priority level: a status symbol with its precedence rank.
/// Ascending priority = higher precedence (1 beats 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    /// Status symbol this tier selects
    pub symbol: char,

    /// Precedence rank, ascending
    pub priority: u32,
}

impl RankTier {
    pub fn new(symbol: char, priority: u32) -> Self {
        Self { symbol, priority }
    }
}

impl std::fmt::Display for RankTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]@{}", self.symbol, self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_serde() {
        let tier: RankTier = serde_yaml::from_str("symbol: \"!\"\npriority: 2\n").unwrap();
        assert_eq!(tier, RankTier::new('!', 2));
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(RankTier::new('/', 1).to_string(), "[/]@1");
    }
}
