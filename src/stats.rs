//! Usage statistics: counters plus a streak with its running best.

use serde::{Deserialize, Serialize};

/// Persisted as `{"generated":..,"saved":..,"streak":..,"bestStreak":..}`.
///
/// Missing fields deserialize as zero. Counters saturate instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
    pub generated: u64,
    pub saved: u64,
    pub streak: u64,
    pub best_streak: u64,
}

impl Statistics {
    /// Counts `amount` new phrases toward both the total and the streak.
    pub fn record_generated(&mut self, amount: u64) {
        self.generated = self.generated.saturating_add(amount);
        self.streak = self.streak.saturating_add(amount);
        self.best_streak = self.best_streak.max(self.streak);
    }

    pub fn record_saved(&mut self) {
        self.saved = self.saved.saturating_add(1);
    }

    /// Best streak is kept.
    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }

    /// Repairs hand-edited data where the best streak lags the current one.
    pub fn normalized(mut self) -> Self {
        self.best_streak = self.best_streak.max(self.streak);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_updates_streak_and_best() {
        let mut stats = Statistics::default();
        stats.record_generated(1);
        assert_eq!(
            stats,
            Statistics {
                generated: 1,
                saved: 0,
                streak: 1,
                best_streak: 1
            }
        );
        stats.record_generated(10);
        assert_eq!(stats.generated, 11);
        assert_eq!(stats.best_streak, 11);
    }

    #[test]
    fn reset_keeps_best_streak() {
        let mut stats = Statistics::default();
        stats.record_generated(3);
        stats.reset_streak();
        stats.record_generated(1);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.best_streak, 3);
    }

    #[test]
    fn counters_saturate() {
        let mut stats = Statistics {
            generated: u64::MAX - 1,
            streak: u64::MAX - 1,
            best_streak: u64::MAX - 1,
            saved: u64::MAX,
        };
        stats.record_generated(10);
        stats.record_saved();
        assert_eq!(stats.generated, u64::MAX);
        assert_eq!(stats.streak, u64::MAX);
        assert_eq!(stats.best_streak, u64::MAX);
        assert_eq!(stats.saved, u64::MAX);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let stats = Statistics {
            generated: 4,
            saved: 1,
            streak: 2,
            best_streak: 3,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"generated":4,"saved":1,"streak":2,"bestStreak":3}"#);
        assert_eq!(serde_json::from_str::<Statistics>(&json).unwrap(), stats);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let stats: Statistics = serde_json::from_str(r#"{"generated":5}"#).unwrap();
        assert_eq!(stats.generated, 5);
        assert_eq!(stats.best_streak, 0);
        assert_eq!(serde_json::from_str::<Statistics>("{}").unwrap(), Statistics::default());
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(serde_json::from_str::<Statistics>(r#"{"saved":-1}"#).is_err());
    }

    #[test]
    fn normalized_lifts_best_streak() {
        let stats = Statistics {
            streak: 7,
            best_streak: 2,
            ..Default::default()
        }
        .normalized();
        assert_eq!(stats.best_streak, 7);
    }
}
