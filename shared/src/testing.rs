//! In-memory stand-ins for the browser collaborators.

use std::collections::{HashMap, HashSet};

use crate::display::{CounterDisplay, CounterSlot};
use crate::error::MapError;
use crate::scene::{DrawOp, Surface};

#[derive(Debug, Default)]
pub(crate) struct RecordingCounters {
    texts: HashMap<CounterSlot, String>,
    missing: HashSet<CounterSlot>,
    pub(crate) updates: usize,
}

impl RecordingCounters {
    pub(crate) fn without(missing: impl IntoIterator<Item = CounterSlot>) -> Self {
        Self {
            missing: missing.into_iter().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn text(&self, slot: CounterSlot) -> Option<&str> {
        self.texts.get(&slot).map(String::as_str)
    }
}

impl CounterDisplay for RecordingCounters {
    fn set_text(&mut self, slot: CounterSlot, text: &str) -> Result<(), MapError> {
        if self.missing.contains(&slot) {
            return Err(MapError::MissingElement(format!("{slot:?}")));
        }
        self.updates += 1;
        self.texts.insert(slot, text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) ops: Vec<DrawOp>,
}

impl Surface for RecordingSurface {
    fn draw(&mut self, op: &DrawOp) {
        self.ops.push(op.clone());
    }
}
