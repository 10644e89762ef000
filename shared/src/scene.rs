use crate::colors::Rgba;
use crate::region::{Bounds, Region, Shape};
use crate::surface::SurfaceSize;

pub const PLACEHOLDER_FILL: Rgba = Rgba::opaque(211, 211, 211);
pub const STATUS_TEXT: Rgba = Rgba::opaque(80, 80, 80);
pub const ERROR_TEXT: Rgba = Rgba::opaque(255, 0, 0);

pub const HEADLINE_FONT: &str = "bold 16px Arial";
pub const DETAIL_FONT: &str = "14px Arial";

/// One drawing step. Text is centered on its anchor.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { width: f64, height: f64 },
    MapImage { width: f64, height: f64 },
    FillRect { bounds: Bounds, color: Rgba },
    Text {
        text: String,
        x: f64,
        y: f64,
        font: &'static str,
        color: Rgba,
    },
}

/// Anything that can execute draw operations (a 2D canvas, a recorder).
pub trait Surface {
    fn draw(&mut self, op: &DrawOp);
}

/// A full frame. Painting the same scene twice yields the same pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    ops: Vec<DrawOp>,
}

impl Scene {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) {
        for op in &self.ops {
            surface.draw(op);
        }
    }

    /// The highlight overlay drawn over the map, if any.
    pub fn overlay(&self) -> Option<(Bounds, Rgba)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::FillRect { bounds, color } => Some((*bounds, *color)),
            _ => None,
        })
    }

    /// Base map with at most one region highlighted.
    pub fn map(size: SurfaceSize, highlight: Option<&Region>) -> Self {
        let (width, height) = (size.width as f64, size.height as f64);
        let mut ops = vec![
            DrawOp::Clear { width, height },
            DrawOp::MapImage { width, height },
        ];
        if let Some(region) = highlight
            && region.shape == Shape::Rect
        {
            ops.push(DrawOp::FillRect {
                bounds: region.bounds,
                color: region.highlight,
            });
        }
        Self { ops }
    }

    /// Shown while the map image is still on its way.
    pub fn loading(size: SurfaceSize) -> Self {
        let (width, height) = (size.width as f64, size.height as f64);
        Self {
            ops: vec![
                DrawOp::Clear { width, height },
                DrawOp::FillRect {
                    bounds: Bounds::new(0.0, 0.0, width, height),
                    color: PLACEHOLDER_FILL,
                },
                DrawOp::Text {
                    text: "Loading map…".to_string(),
                    x: width / 2.0,
                    y: height / 2.0,
                    font: DETAIL_FONT,
                    color: STATUS_TEXT,
                },
            ],
        }
    }

    /// Static error surface after the map image failed to load.
    pub fn load_failed(size: SurfaceSize, src: &str) -> Self {
        let (width, height) = (size.width as f64, size.height as f64);
        let (cx, cy) = (width / 2.0, height / 2.0);
        Self {
            ops: vec![
                DrawOp::Clear { width, height },
                DrawOp::FillRect {
                    bounds: Bounds::new(0.0, 0.0, width, height),
                    color: PLACEHOLDER_FILL,
                },
                DrawOp::Text {
                    text: "Error: Could not load map image.".to_string(),
                    x: cx,
                    y: cy,
                    font: HEADLINE_FONT,
                    color: ERROR_TEXT,
                },
                DrawOp::Text {
                    text: format!("Attempted path: {src}"),
                    x: cx,
                    y: cy + 20.0,
                    font: DETAIL_FONT,
                    color: ERROR_TEXT,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;

    fn lake() -> Region {
        Region::rect("Lake", Bounds::new(40.0, 220.0, 200.0, 100.0))
            .with_highlight(Rgba::new(33, 150, 243, 0.4))
    }

    #[test]
    fn plain_map_has_no_overlay() {
        let scene = Scene::map(SurfaceSize::new(800, 600), None);
        assert_eq!(
            scene.ops(),
            &[
                DrawOp::Clear {
                    width: 800.0,
                    height: 600.0
                },
                DrawOp::MapImage {
                    width: 800.0,
                    height: 600.0
                },
            ]
        );
        assert_eq!(scene.overlay(), None);
    }

    #[test]
    fn highlight_is_drawn_last_in_region_color() {
        let region = lake();
        let scene = Scene::map(SurfaceSize::new(800, 600), Some(&region));
        assert_eq!(scene.ops().len(), 3);
        assert_eq!(scene.overlay(), Some((region.bounds, region.highlight)));
    }

    #[test]
    fn non_rect_region_draws_no_overlay() {
        let region = lake().with_shape(Shape::Circle);
        let scene = Scene::map(SurfaceSize::new(800, 600), Some(&region));
        assert_eq!(scene.overlay(), None);
    }

    #[test]
    fn painting_twice_is_identical() {
        let region = lake();
        let scene = Scene::map(SurfaceSize::new(800, 600), Some(&region));
        let mut first = RecordingSurface::default();
        let mut second = RecordingSurface::default();
        scene.paint(&mut first);
        scene.paint(&mut second);
        assert_eq!(first.ops, second.ops);
        assert_eq!(first.ops.as_slice(), scene.ops());
    }

    #[test]
    fn failure_scene_names_the_path() {
        let scene = Scene::load_failed(SurfaceSize::new(600, 400), "images/map.png");
        let texts: Vec<&str> = scene
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Error: Could not load map image.",
                "Attempted path: images/map.png"
            ]
        );
        assert_eq!(
            scene.overlay(),
            Some((Bounds::new(0.0, 0.0, 600.0, 400.0), PLACEHOLDER_FILL))
        );
    }

    #[test]
    fn loading_scene_never_draws_the_image() {
        let scene = Scene::loading(SurfaceSize::new(300, 150));
        assert!(
            !scene
                .ops()
                .iter()
                .any(|op| matches!(op, DrawOp::MapImage { .. }))
        );
    }
}
