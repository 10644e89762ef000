use crate::error::MapError;
use crate::resources::ResourceKind;
use crate::state::GameState;

/// One visible counter outside the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterSlot {
    Resource(ResourceKind),
    Day,
}

impl CounterSlot {
    pub fn all() -> impl Iterator<Item = CounterSlot> {
        ResourceKind::ALL
            .into_iter()
            .map(CounterSlot::Resource)
            .chain(std::iter::once(CounterSlot::Day))
    }

    pub fn text(self, state: &GameState) -> String {
        match self {
            Self::Resource(kind) => state.resources.get(kind).to_string(),
            Self::Day => format!("Day {}", state.current_day),
        }
    }
}

/// Sink for counter text. Implementations report `MissingElement` when a slot
/// has nowhere to go.
pub trait CounterDisplay {
    fn set_text(&mut self, slot: CounterSlot, text: &str) -> Result<(), MapError>;
}

/// Push every counter. Missing elements are skipped. Returns how many updated.
pub fn refresh_counters<D: CounterDisplay + ?Sized>(display: &mut D, state: &GameState) -> usize {
    let mut updated = 0;
    for slot in CounterSlot::all() {
        match display.set_text(slot, &slot.text(state)) {
            Ok(()) => updated += 1,
            Err(e) => tracing::debug!(error = %e, "counter update skipped"),
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCounters;

    #[test]
    fn day_slot_is_prefixed() {
        let mut state = GameState::default();
        state.current_day = 12;
        assert_eq!(CounterSlot::Day.text(&state), "Day 12");
        state.resources.add(ResourceKind::Coin, 40);
        assert_eq!(CounterSlot::Resource(ResourceKind::Coin).text(&state), "40");
    }

    #[test]
    fn refresh_writes_every_slot() {
        let mut counters = RecordingCounters::default();
        let updated = refresh_counters(&mut counters, &GameState::default());
        assert_eq!(updated, 5);
        assert_eq!(counters.text(CounterSlot::Day), Some("Day 1"));
        assert_eq!(counters.text(CounterSlot::Resource(ResourceKind::Stone)), Some("0"));
    }

    #[test]
    fn missing_elements_are_skipped() {
        let mut counters = RecordingCounters::without([
            CounterSlot::Resource(ResourceKind::Fish),
            CounterSlot::Day,
        ]);
        let updated = refresh_counters(&mut counters, &GameState::default());
        assert_eq!(updated, 3);
        assert_eq!(counters.text(CounterSlot::Day), None);
        assert_eq!(counters.text(CounterSlot::Resource(ResourceKind::Wood)), Some("0"));
    }
}
