use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::colors::{DEFAULT_HIGHLIGHT, Rgba};

/// A position in image pixel space (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in image pixel space. Serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive on every edge: boundary pixels count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

impl From<[f64; 4]> for Bounds {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<Bounds> for [f64; 4] {
    fn from(b: Bounds) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

/// Hit shape of a region. Only `rect` participates in hit testing and drawing;
/// the others are accepted so region tables can carry them ahead of support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rect,
    Circle,
    Polygon,
    #[serde(other)]
    Unsupported,
}

/// A named clickable area of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub name: String,
    #[serde(default)]
    pub shape: Shape,
    #[serde(rename = "coords")]
    pub bounds: Bounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default = "default_highlight")]
    pub highlight: Rgba,
    /// Raw resource keys; validated when the reward is applied.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rewards: BTreeMap<String, u64>,
}

fn default_highlight() -> Rgba {
    DEFAULT_HIGHLIGHT
}

impl Region {
    pub fn rect(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Rect,
            bounds,
            destination: None,
            highlight: DEFAULT_HIGHLIGHT,
            rewards: BTreeMap::new(),
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_highlight(mut self, highlight: Rgba) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn with_reward(mut self, key: impl Into<String>, amount: u64) -> Self {
        self.rewards.insert(key.into(), amount);
        self
    }

    pub fn has_rewards(&self) -> bool {
        !self.rewards.is_empty()
    }
}

/// Whether `point` falls inside `region`. Non-rect shapes never hit.
pub fn point_in_region(point: Point, region: &Region) -> bool {
    match region.shape {
        Shape::Rect => region.bounds.contains(point),
        Shape::Circle | Shape::Polygon | Shape::Unsupported => false,
    }
}
