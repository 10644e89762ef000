use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use mapquest_shared::{DisplayRect, DrawOp, Point, Surface, SurfaceSize};

/// Canvas 2D backend for map scenes.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: Option<HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())?;
        Some(Self {
            canvas,
            ctx,
            image: None,
        })
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    /// Resizing resets the 2D context state; every scene sets what it needs.
    pub fn resize(&self, size: SurfaceSize) {
        if self.size() != size {
            self.canvas.set_width(size.width);
            self.canvas.set_height(size.height);
        }
    }

    pub fn set_image(&mut self, image: HtmlImageElement) {
        self.image = Some(image);
    }

    pub fn set_cursor(&self, cursor: &str) {
        self.canvas.style().set_property("cursor", cursor).ok();
    }

    /// Pointer position in backing pixels, accounting for CSS scaling.
    pub fn to_backing(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let display = DisplayRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        display.to_backing(client_x, client_y, self.size())
    }
}

impl Surface for CanvasSurface {
    fn draw(&mut self, op: &DrawOp) {
        let ctx = &self.ctx;
        match op {
            DrawOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawOp::MapImage { width, height } => {
                // Scenes only reference the image once it decoded.
                if let Some(image) = self.image.as_ref() {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        image, 0.0, 0.0, *width, *height,
                    )
                    .ok();
                }
            }
            DrawOp::FillRect { bounds, color } => {
                ctx.set_fill_style_str(&color.css());
                ctx.fill_rect(bounds.x, bounds.y, bounds.width, bounds.height);
            }
            DrawOp::Text {
                text,
                x,
                y,
                font,
                color,
            } => {
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.set_fill_style_str(&color.css());
                ctx.fill_text(text, *x, *y).ok();
            }
        }
    }
}
