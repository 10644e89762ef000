pub mod colors;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod region;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod state;
pub mod store;
pub mod surface;

#[cfg(test)]
mod testing;

pub use colors::Rgba;
pub use config::{CounterIds, MapConfig};
pub use controller::*;
pub use display::{CounterDisplay, CounterSlot, refresh_counters};
pub use error::MapError;
pub use region::*;
pub use registry::*;
pub use resources::{ResourceKind, Resources};
pub use scene::{DrawOp, Scene, Surface};
pub use state::{GameState, RewardReport};
pub use store::{KeyValueStore, MemoryStore, load_state, save_state};
pub use surface::{DEFAULT_CANVAS_SIZE, DisplayRect, SurfaceSize};
