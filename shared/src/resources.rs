use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::MapError;

/// The fixed set of counters a region can reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Wood,
    Coin,
    Fish,
    Stone,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [Self::Wood, Self::Coin, Self::Fish, Self::Stone];

    /// Key used in persisted state and region reward tables.
    pub fn key(self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Coin => "coin",
            Self::Fish => "fish",
            Self::Stone => "stone",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Coin => "Coins",
            Self::Fish => "Fish",
            Self::Stone => "Stone",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ResourceKind {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| MapError::UnrecognizedResourceKind(s.to_string()))
    }
}

/// One count per [`ResourceKind`]. Every kind always has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resources {
    counts: [u64; ResourceKind::ALL.len()],
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> u64 {
        self.counts[kind.index()]
    }

    pub fn set(&mut self, kind: ResourceKind, value: u64) {
        self.counts[kind.index()] = value;
    }

    /// Add to a counter, saturating at `u64::MAX`. Returns the new count.
    pub fn add(&mut self, kind: ResourceKind, amount: u64) -> u64 {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(amount);
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u64)> + '_ {
        ResourceKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Serialize for Resources {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ResourceKind::ALL.len()))?;
        for (kind, count) in self.iter() {
            map.serialize_entry(kind.key(), &count)?;
        }
        map.end()
    }
}
