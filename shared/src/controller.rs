use crate::config::MapConfig;
use crate::display::{CounterDisplay, refresh_counters};
use crate::region::{Point, Region};
use crate::registry::{RegionId, RegionRegistry};
use crate::scene::Scene;
use crate::state::{GameState, RewardReport};
use crate::store::{KeyValueStore, load_state, save_state};
use crate::surface::SurfaceSize;

/// Lifecycle of the map. `Failed` is a dead end: nothing but the error
/// surface is ever drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed { src: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
        }
    }
}

/// Identifies one click flash. Only the most recent ticket can clear the flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashTicket {
    pub region: RegionId,
    generation: u64,
}

/// Deferred page change requested by a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub destination: String,
    pub delay_ms: u32,
}

/// Result of a pointer move/leave while ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerUpdate {
    pub cursor: Cursor,
    pub redraw: bool,
}

/// Result of a click that landed on a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub region: RegionId,
    /// Schedule [`MapController::flash_expired`] with this after `flash_ms`.
    pub flash: FlashTicket,
    pub flash_ms: u32,
    pub rewards: RewardReport,
    pub persisted: bool,
    pub navigation: Option<Navigation>,
}

/// Owns the game state and everything the map shows. Events are fed in by the
/// host one at a time; timers are the host's job, driven by the returned
/// tickets and delays.
pub struct MapController<S, D> {
    registry: RegionRegistry,
    store: S,
    display: D,
    storage_key: String,
    image_src: String,
    flash_ms: u32,
    navigation_delay_ms: u32,
    fallback: SurfaceSize,
    phase: Phase,
    surface: SurfaceSize,
    state: GameState,
    hovered: Option<RegionId>,
    flash: Option<FlashTicket>,
    flash_generation: u64,
}

impl<S: KeyValueStore, D: CounterDisplay> MapController<S, D> {
    pub fn new(config: &MapConfig, registry: RegionRegistry, store: S, display: D) -> Self {
        Self {
            registry,
            store,
            display,
            storage_key: config.storage_key.clone(),
            image_src: config.image_src.clone(),
            flash_ms: config.flash_ms,
            navigation_delay_ms: config.navigation_delay_ms(),
            fallback: config.fallback_size(),
            phase: Phase::Loading,
            surface: SurfaceSize::default(),
            state: GameState::default(),
            hovered: None,
            flash: None,
            flash_generation: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn hovered(&self) -> Option<&Region> {
        self.hovered.and_then(|id| self.registry.get(id))
    }

    pub fn flashing(&self) -> Option<&Region> {
        self.flash.and_then(|t| self.registry.get(t.region))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Record the surface size before the image arrives (drives the loading scene).
    pub fn attach_surface(&mut self, current: SurfaceSize) {
        if self.phase == Phase::Loading {
            self.surface = current;
        }
    }

    /// The map image decoded. Returns the size the surface must take.
    pub fn image_loaded(&mut self, natural: SurfaceSize, current: SurfaceSize) -> SurfaceSize {
        if self.phase != Phase::Loading {
            return self.surface;
        }
        self.surface = SurfaceSize::for_image(current, natural).or(self.fallback);
        self.state = load_state(&self.store, &self.storage_key);
        refresh_counters(&mut self.display, &self.state);
        self.phase = Phase::Ready;
        tracing::info!(
            width = self.surface.width,
            height = self.surface.height,
            day = self.state.current_day,
            regions = self.registry.len(),
            "map ready"
        );
        self.surface
    }

    /// The map image failed. Interaction stays off for the life of the page.
    pub fn image_failed(&mut self, current: SurfaceSize) -> SurfaceSize {
        if self.phase != Phase::Loading {
            return self.surface;
        }
        self.surface = current.or(self.fallback);
        tracing::error!(src = %self.image_src, "failed to load the map image; check path and file existence");
        self.phase = Phase::Failed {
            src: self.image_src.clone(),
        };
        self.surface
    }

    /// Current frame. Flash outranks hover; pure, so always safe to repeat.
    pub fn render(&self) -> Scene {
        match &self.phase {
            Phase::Loading => Scene::loading(self.surface.or(self.fallback)),
            Phase::Failed { src } => Scene::load_failed(self.surface, src),
            Phase::Ready => Scene::map(self.surface, self.flashing().or(self.hovered())),
        }
    }

    pub fn pointer_moved(&mut self, point: Point) -> Option<PointerUpdate> {
        if !self.is_ready() {
            return None;
        }
        let hit = self.registry.find_hit(point);
        let cursor = if hit.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        };
        if hit == self.hovered {
            return Some(PointerUpdate {
                cursor,
                redraw: false,
            });
        }
        self.hovered = hit;
        let flash_elsewhere = self.flash.is_some_and(|t| Some(t.region) != hit);
        Some(PointerUpdate {
            cursor,
            redraw: !flash_elsewhere,
        })
    }

    pub fn pointer_left(&mut self) -> Option<PointerUpdate> {
        if !self.is_ready() {
            return None;
        }
        self.hovered = None;
        Some(PointerUpdate {
            cursor: Cursor::Default,
            redraw: self.flash.is_none(),
        })
    }

    pub fn click(&mut self, point: Point) -> Option<ClickOutcome> {
        if !self.is_ready() {
            return None;
        }
        let id = self.registry.find_hit(point)?;
        let region = self.registry.get(id)?;
        tracing::info!(region = %region.name, x = point.x, y = point.y, "region clicked");

        self.flash_generation += 1;
        let flash = FlashTicket {
            region: id,
            generation: self.flash_generation,
        };
        self.flash = Some(flash);

        let navigation = region.destination.clone().map(|destination| Navigation {
            destination,
            delay_ms: self.navigation_delay_ms,
        });
        let rewards = self
            .state
            .apply_rewards(region.rewards.iter().map(|(k, v)| (k.as_str(), *v)));

        let persisted = rewards.any_applied() && {
            refresh_counters(&mut self.display, &self.state);
            self.persist()
        };

        Some(ClickOutcome {
            region: id,
            flash,
            flash_ms: self.flash_ms,
            rewards,
            persisted,
            navigation,
        })
    }

    /// A flash timer fired. Stale tickets (superseded by a later click) are
    /// ignored. Returns whether a redraw is needed.
    pub fn flash_expired(&mut self, ticket: FlashTicket) -> bool {
        if self.flash != Some(ticket) {
            return false;
        }
        self.flash = None;
        true
    }

    /// The day timer fired. Returns the new day.
    pub fn day_elapsed(&mut self) -> Option<u32> {
        if !self.is_ready() {
            return None;
        }
        let day = self.state.advance_day();
        refresh_counters(&mut self.display, &self.state);
        self.persist();
        tracing::info!(day, "advanced to day {day}");
        Some(day)
    }

    fn persist(&mut self) -> bool {
        match save_state(&mut self.store, &self.storage_key, &self.state) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, key = %self.storage_key, "could not persist game state");
                false
            }
        }
    }
}
