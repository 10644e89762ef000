use crate::region::Point;

/// Backing resolution of a drawing surface, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Size a browser gives a canvas that has no explicit dimensions.
pub const DEFAULT_CANVAS_SIZE: SurfaceSize = SurfaceSize::new(300, 150);

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Size to give the surface once the map image reports its natural size.
    /// A surface that already carries explicit dimensions keeps them.
    pub fn for_image(current: SurfaceSize, natural: SurfaceSize) -> SurfaceSize {
        if current.is_empty() || current == DEFAULT_CANVAS_SIZE {
            natural
        } else {
            current
        }
    }

    pub fn or(self, fallback: SurfaceSize) -> SurfaceSize {
        if self.is_empty() { fallback } else { self }
    }
}

/// Where the surface sits on screen, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    /// Independent horizontal/vertical factors from display to backing pixels.
    /// A collapsed display axis maps 1:1.
    pub fn scale_to(&self, backing: SurfaceSize) -> (f64, f64) {
        let axis = |backing: u32, display: f64| {
            if display > 0.0 && display.is_finite() {
                backing as f64 / display
            } else {
                1.0
            }
        };
        (
            axis(backing.width, self.width),
            axis(backing.height, self.height),
        )
    }

    /// Convert a client-space pointer position to backing-resolution pixels.
    pub fn to_backing(&self, client_x: f64, client_y: f64, backing: SurfaceSize) -> Point {
        let (sx, sy) = self.scale_to(backing);
        Point::new((client_x - self.left) * sx, (client_y - self.top) * sy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn identity_when_display_matches_backing() {
        let rect = DisplayRect {
            left: 10.0,
            top: 20.0,
            width: 800.0,
            height: 600.0,
        };
        let p = rect.to_backing(110.0, 70.0, SurfaceSize::new(800, 600));
        assert_close(p.x, 100.0);
        assert_close(p.y, 50.0);
    }

    #[test]
    fn axes_scale_independently() {
        // Shrunk to half width but only a quarter off the height.
        let rect = DisplayRect {
            left: 0.0,
            top: 0.0,
            width: 400.0,
            height: 450.0,
        };
        let p = rect.to_backing(100.0, 90.0, SurfaceSize::new(800, 600));
        assert_close(p.x, 200.0);
        assert_close(p.y, 120.0);
    }

    #[test]
    fn collapsed_display_maps_one_to_one() {
        let rect = DisplayRect {
            left: 5.0,
            top: 5.0,
            width: 0.0,
            height: 0.0,
        };
        let p = rect.to_backing(15.0, 25.0, SurfaceSize::new(800, 600));
        assert_close(p.x, 10.0);
        assert_close(p.y, 20.0);
    }

    #[test]
    fn image_size_applies_only_to_default_or_empty_surfaces() {
        let natural = SurfaceSize::new(1024, 768);
        assert_eq!(SurfaceSize::for_image(DEFAULT_CANVAS_SIZE, natural), natural);
        assert_eq!(SurfaceSize::for_image(SurfaceSize::default(), natural), natural);
        let explicit = SurfaceSize::new(640, 480);
        assert_eq!(SurfaceSize::for_image(explicit, natural), explicit);
    }

    #[test]
    fn or_falls_back_for_empty_surface() {
        let fallback = SurfaceSize::new(600, 400);
        assert_eq!(SurfaceSize::new(0, 150).or(fallback), fallback);
        assert_eq!(SurfaceSize::new(10, 10).or(fallback), SurfaceSize::new(10, 10));
    }
}
