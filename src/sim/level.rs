//! Level/difficulty policy
//!
//! Difficulty is a pure function of cumulative score. Each tier bundles the
//! block fall speed and spawn interval used while it is active.

use serde::Serialize;

use crate::consts::BASE_FALL_SPEED;

/// Difficulty parameters for one score range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelTier {
    /// Level number (1-based)
    pub level: u8,
    pub name: &'static str,
    /// Lowest score at which this tier is active
    pub min_score: u64,
    /// Block fall speed (units per tick)
    pub fall_speed: f32,
    /// Seconds between block spawns
    pub spawn_interval: f32,
}

impl LevelTier {
    /// HUD label, e.g. "Level 2: Fighter"
    pub fn label(&self) -> String {
        format!("Level {}: {}", self.level, self.name)
    }

    /// Announcement text shown on level change
    pub fn announcement(&self) -> String {
        format!("LEVEL {}: {}", self.level, self.name)
    }
}

/// All tiers, ordered by strictly increasing `min_score`
pub const TIERS: [LevelTier; 4] = [
    LevelTier {
        level: 1,
        name: "Rookie",
        min_score: 0,
        fall_speed: BASE_FALL_SPEED,
        spawn_interval: 1.0,
    },
    LevelTier {
        level: 2,
        name: "Fighter",
        min_score: 20,
        fall_speed: BASE_FALL_SPEED + 2.0,
        spawn_interval: 0.9,
    },
    LevelTier {
        level: 3,
        name: "Survivor",
        min_score: 40,
        fall_speed: BASE_FALL_SPEED + 4.0,
        spawn_interval: 0.8,
    },
    LevelTier {
        level: 4,
        name: "Legend",
        min_score: 60,
        fall_speed: BASE_FALL_SPEED + 6.0,
        spawn_interval: 0.7,
    },
];

/// Tier active at the given score
pub fn level_for(score: u64) -> LevelTier {
    TIERS
        .iter()
        .rev()
        .find(|tier| score >= tier.min_score)
        .copied()
        .unwrap_or(TIERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rookie_at_zero() {
        let tier = level_for(0);
        assert_eq!(tier.level, 1);
        assert_eq!(tier.name, "Rookie");
        assert_eq!(tier.fall_speed, 6.0);
        assert_eq!(tier.spawn_interval, 1.0);
    }

    #[test]
    fn test_survivor_at_45() {
        let tier = level_for(45);
        assert_eq!(
            (tier.level, tier.name, tier.fall_speed, tier.spawn_interval),
            (3, "Survivor", 10.0, 0.8)
        );
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(level_for(19).level, 1);
        assert_eq!(level_for(20).level, 2);
        assert_eq!(level_for(39).level, 2);
        assert_eq!(level_for(40).level, 3);
        assert_eq!(level_for(59).level, 3);
        assert_eq!(level_for(60).level, 4);
        assert_eq!(level_for(u64::MAX).name, "Legend");
    }

    #[test]
    fn test_thresholds_strictly_increasing() {
        for pair in TIERS.windows(2) {
            assert!(pair[0].min_score < pair[1].min_score);
            assert!(pair[0].level < pair[1].level);
        }
        assert_eq!(TIERS[0].min_score, 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(level_for(25).label(), "Level 2: Fighter");
        assert_eq!(level_for(70).announcement(), "LEVEL 4: Legend");
    }

    proptest! {
        #[test]
        fn level_is_monotonic(a in 0u64..10_000, b in 0u64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(level_for(lo).level <= level_for(hi).level);
            prop_assert!(level_for(lo).fall_speed <= level_for(hi).fall_speed);
            prop_assert!(level_for(lo).spawn_interval >= level_for(hi).spawn_interval);
        }

        #[test]
        fn exactly_one_tier_matches(score in 0u64..10_000) {
            let matching = TIERS
                .iter()
                .enumerate()
                .filter(|(i, tier)| {
                    let upper = TIERS.get(i + 1).map(|t| t.min_score).unwrap_or(u64::MAX);
                    score >= tier.min_score && score < upper
                })
                .count();
            prop_assert_eq!(matching, 1);
        }

        #[test]
        fn level_policy_is_pure(score in 0u64..10_000) {
            prop_assert_eq!(level_for(score), level_for(score));
        }
    }
}
