use serde::{Deserialize, Serialize};

use crate::display::CounterSlot;
use crate::error::MapError;
use crate::region::Region;
use crate::registry::RegionRegistry;
use crate::resources::ResourceKind;
use crate::surface::SurfaceSize;

pub const DEFAULT_IMAGE_SRC: &str = "images/main_map_01.png";
pub const DEFAULT_STORAGE_KEY: &str = "gameMapState";
pub const DEFAULT_FLASH_MS: u32 = 250;
pub const DEFAULT_DAY_TICK_MS: u32 = 60_000;
pub const FALLBACK_SURFACE_WIDTH: u32 = 600;
pub const FALLBACK_SURFACE_HEIGHT: u32 = 400;

/// Page-level settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub image_src: String,
    pub storage_key: String,
    pub flash_ms: u32,
    pub day_tick_ms: u32,
    pub fallback_width: u32,
    pub fallback_height: u32,
    pub counter_ids: CounterIds,
    /// Region table; the sample map is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            image_src: DEFAULT_IMAGE_SRC.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            flash_ms: DEFAULT_FLASH_MS,
            day_tick_ms: DEFAULT_DAY_TICK_MS,
            fallback_width: FALLBACK_SURFACE_WIDTH,
            fallback_height: FALLBACK_SURFACE_HEIGHT,
            counter_ids: CounterIds::default(),
            regions: None,
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|e| MapError::Config(e.to_string()))
    }

    /// Like [`MapConfig::from_json`], but a bad document only costs a warning.
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "map config rejected; using defaults");
            Self::default()
        })
    }

    pub fn registry(&self) -> RegionRegistry {
        match &self.regions {
            Some(regions) => RegionRegistry::new(regions.clone()),
            None => RegionRegistry::sample(),
        }
    }

    /// Navigation waits half a flash so the highlight is seen before unload.
    pub fn navigation_delay_ms(&self) -> u32 {
        self.flash_ms / 2
    }

    pub fn fallback_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.fallback_width, self.fallback_height)
    }
}

/// Element ids of the external counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterIds {
    pub wood: String,
    pub coin: String,
    pub fish: String,
    pub stone: String,
    pub day: String,
}

impl Default for CounterIds {
    fn default() -> Self {
        Self {
            wood: "woodCount".to_string(),
            coin: "coinCount".to_string(),
            fish: "fishCount".to_string(),
            stone: "stoneCount".to_string(),
            day: "dayCount".to_string(),
        }
    }
}

impl CounterIds {
    pub fn id_for(&self, slot: CounterSlot) -> &str {
        match slot {
            CounterSlot::Resource(ResourceKind::Wood) => &self.wood,
            CounterSlot::Resource(ResourceKind::Coin) => &self.coin,
            CounterSlot::Resource(ResourceKind::Fish) => &self.fish,
            CounterSlot::Resource(ResourceKind::Stone) => &self.stone,
            CounterSlot::Day => &self.day,
        }
    }
}
