use serde::Serialize;
use serde_json::Value;

use crate::error::MapError;
use crate::resources::{ResourceKind, Resources};

/// Persisted game progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub resources: Resources,
    pub current_day: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            resources: Resources::default(),
            current_day: 1,
        }
    }
}

/// What happened to a region's reward table when it was applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewardReport {
    pub applied: Vec<(ResourceKind, u64)>,
    /// Keys outside the fixed resource set. Nothing was stored for these.
    pub rejected: Vec<String>,
}

impl RewardReport {
    pub fn any_applied(&self) -> bool {
        !self.applied.is_empty()
    }
}

impl GameState {
    /// Decode a stored payload. Never fails: a field that is missing or
    /// malformed keeps its default, and unreadable JSON yields the defaults.
    pub fn from_json_lenient(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::warn!(error = %e, "stored game state is not valid JSON; using defaults");
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let mut state = Self::default();

        if let Some(day) = value.get("currentDay").and_then(count_from) {
            state.current_day = u32::try_from(day).unwrap_or(u32::MAX).max(1);
        }

        if let Some(stored) = value.get("resources").and_then(Value::as_object) {
            for (key, raw) in stored {
                match key.parse::<ResourceKind>() {
                    Ok(kind) => state.resources.set(kind, count_from(raw).unwrap_or(0)),
                    Err(e) => tracing::warn!(error = %e, "ignoring stored resource"),
                }
            }
        }

        state
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string(self).map_err(|e| MapError::Storage(e.to_string()))
    }

    /// Apply a region's reward table. Unrecognized keys are skipped with a
    /// warning; the rest still apply.
    pub fn apply_rewards<'a, I>(&mut self, rewards: I) -> RewardReport
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut report = RewardReport::default();
        for (key, amount) in rewards {
            match key.parse::<ResourceKind>() {
                Ok(kind) => {
                    self.resources.add(kind, amount);
                    report.applied.push((kind, amount));
                }
                Err(e) => {
                    tracing::warn!(error = %e, amount, "reward skipped");
                    report.rejected.push(key.to_string());
                }
            }
        }
        report
    }

    pub fn advance_day(&mut self) -> u32 {
        self.current_day = self.current_day.saturating_add(1);
        self.current_day
    }
}

/// A non-negative count from a stored number. Fractions are truncated;
/// negatives, non-finite numbers and non-numbers are rejected.
fn count_from(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 {
        Some(f.trunc() as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_zero_on_day_one() {
        let state = GameState::default();
        assert!(state.resources.is_empty());
        assert_eq!(state.current_day, 1);
    }

    #[test]
    fn well_formed_payload_round_trips() {
        let mut state = GameState::default();
        state.resources.set(ResourceKind::Wood, 15);
        state.resources.set(ResourceKind::Coin, 12);
        state.resources.set(ResourceKind::Stone, 21);
        state.current_day = 7;

        let json = state.to_json().expect("serialize");
        assert_eq!(
            json,
            r#"{"resources":{"wood":15,"coin":12,"fish":0,"stone":21},"currentDay":7}"#
        );
        assert_eq!(GameState::from_json_lenient(&json), state);
    }

    #[test]
    fn empty_object_loads_defaults() {
        assert_eq!(GameState::from_json_lenient("{}"), GameState::default());
    }

    #[test]
    fn garbage_loads_defaults() {
        assert_eq!(GameState::from_json_lenient("not json"), GameState::default());
        assert_eq!(GameState::from_json_lenient("[1,2,3]"), GameState::default());
        assert_eq!(GameState::from_json_lenient("null"), GameState::default());
    }

    #[test]
    fn fields_default_independently() {
        let state = GameState::from_json_lenient(
            r#"{"resources":{"wood":"lots","coin":4,"fish":-2,"stone":2.9},"currentDay":"x"}"#,
        );
        assert_eq!(state.resources.get(ResourceKind::Wood), 0);
        assert_eq!(state.resources.get(ResourceKind::Coin), 4);
        assert_eq!(state.resources.get(ResourceKind::Fish), 0);
        assert_eq!(state.resources.get(ResourceKind::Stone), 2);
        assert_eq!(state.current_day, 1);
    }

    #[test]
    fn day_zero_or_negative_becomes_one() {
        assert_eq!(GameState::from_json_lenient(r#"{"currentDay":0}"#).current_day, 1);
        assert_eq!(GameState::from_json_lenient(r#"{"currentDay":-4}"#).current_day, 1);
        assert_eq!(GameState::from_json_lenient(r#"{"currentDay":12}"#).current_day, 12);
    }

    #[test]
    fn unknown_stored_kinds_are_dropped() {
        let state = GameState::from_json_lenient(r#"{"resources":{"diamond":9,"fish":3}}"#);
        assert_eq!(state.resources.get(ResourceKind::Fish), 3);
        let json = state.to_json().expect("serialize");
        assert!(!json.contains("diamond"));
    }

    #[test]
    fn rewards_apply_known_kinds_and_report_unknown() {
        let mut state = GameState::default();
        let report = state.apply_rewards([("coin", 5), ("diamond", 3), ("wood", 2)]);
        assert_eq!(
            report.applied,
            vec![(ResourceKind::Coin, 5), (ResourceKind::Wood, 2)]
        );
        assert_eq!(report.rejected, vec!["diamond".to_string()]);
        assert!(report.any_applied());
        assert_eq!(state.resources.get(ResourceKind::Coin), 5);
        assert_eq!(state.resources.get(ResourceKind::Wood), 2);
    }

    #[test]
    fn only_unknown_rewards_apply_nothing() {
        let mut state = GameState::default();
        let report = state.apply_rewards([("diamond", 3)]);
        assert!(!report.any_applied());
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn advance_day_increments() {
        let mut state = GameState::default();
        assert_eq!(state.advance_day(), 2);
        assert_eq!(state.advance_day(), 3);
    }
}
