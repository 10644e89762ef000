use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, HtmlImageElement, MouseEvent, PointerEvent};

use mapquest_shared::{ClickOutcome, KeyValueStore, MapConfig, MapController, SurfaceSize};

use crate::dom::{self, DomCounters};
use crate::surface::CanvasSurface;

type Controller = MapController<Box<dyn KeyValueStore>, DomCounters>;
type SharedController = Rc<RefCell<Controller>>;
type SharedSurface = Rc<RefCell<Option<CanvasSurface>>>;

thread_local! {
    static DAY_TIMER: RefCell<Option<Interval>> = const { RefCell::new(None) };
}

fn repaint(controller: &RefCell<Controller>, surface: &RefCell<Option<CanvasSurface>>) {
    let scene = controller.borrow().render();
    if let Some(surface) = surface.borrow_mut().as_mut() {
        scene.paint(surface);
    }
}

async fn decode_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    JsFuture::from(image.decode()).await?;
    Ok(image)
}

/// Advance the in-game day forever. Replacing the slot drops (and cancels)
/// any interval left over from an earlier mount.
fn start_day_timer(controller: SharedController, period_ms: u32) {
    let interval = Interval::new(period_ms, move || {
        controller.borrow_mut().day_elapsed();
    });
    DAY_TIMER.with(|slot| {
        *slot.borrow_mut() = Some(interval);
    });
}

/// Clear the click flash after its duration. A newer click cancels the
/// pending clear; the ticket check covers a timer that already queued.
fn schedule_flash_clear(
    controller: &SharedController,
    surface: &SharedSurface,
    pending: &RefCell<Option<Timeout>>,
    outcome: &ClickOutcome,
) {
    if let Some(timeout) = pending.borrow_mut().take() {
        timeout.cancel();
    }
    let ticket = outcome.flash;
    let controller = Rc::clone(controller);
    let surface = Rc::clone(surface);
    let timeout = Timeout::new(outcome.flash_ms, move || {
        let expired = controller.borrow_mut().flash_expired(ticket);
        if expired {
            repaint(&controller, &surface);
        }
    });
    *pending.borrow_mut() = Some(timeout);
}

/// The interactive map: one canvas, image loaded asynchronously, handlers
/// inert until the controller reports ready.
#[component]
pub fn MapCanvas(config: MapConfig) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let controller: SharedController = Rc::new(RefCell::new(MapController::new(
        &config,
        config.registry(),
        dom::open_store(),
        DomCounters::new(config.counter_ids.clone()),
    )));
    let surface: SharedSurface = Rc::new(RefCell::new(None));
    let flash_timeout = Rc::new(RefCell::new(None::<Timeout>));
    let day_tick_ms = config.day_tick_ms;
    let started = Rc::new(Cell::new(false));

    // Bind the surface and start the image load once the canvas is mounted.
    Effect::new({
        let controller = controller.clone();
        let surface = surface.clone();
        move || {
            if started.get() {
                return;
            }
            let Some(canvas_el) = canvas_ref.get() else {
                return;
            };
            started.set(true);

            let canvas: &HtmlCanvasElement = &canvas_el;
            let Some(canvas_surface) = CanvasSurface::new(canvas.clone()) else {
                tracing::error!("canvas 2D context unavailable; map disabled");
                return;
            };
            controller.borrow_mut().attach_surface(canvas_surface.size());
            *surface.borrow_mut() = Some(canvas_surface);
            repaint(&controller, &surface);

            let controller = controller.clone();
            let surface = surface.clone();
            let src = controller.borrow().image_src().to_string();
            wasm_bindgen_futures::spawn_local(async move {
                let loaded = decode_image(&src).await;
                let current = surface
                    .borrow()
                    .as_ref()
                    .map(CanvasSurface::size)
                    .unwrap_or_default();
                match loaded {
                    Ok(image) => {
                        let natural =
                            SurfaceSize::new(image.natural_width(), image.natural_height());
                        let size = controller.borrow_mut().image_loaded(natural, current);
                        if let Some(s) = surface.borrow_mut().as_mut() {
                            s.resize(size);
                            s.set_image(image);
                        }
                        repaint(&controller, &surface);
                        start_day_timer(controller, day_tick_ms);
                    }
                    Err(e) => {
                        tracing::debug!(error = ?e, "image decode rejected");
                        let size = controller.borrow_mut().image_failed(current);
                        if let Some(s) = surface.borrow().as_ref() {
                            s.resize(size);
                        }
                        repaint(&controller, &surface);
                    }
                }
            });
        }
    });

    // --- Input handlers ---

    let on_pointer_move = {
        let controller = controller.clone();
        let surface = surface.clone();
        move |e: PointerEvent| {
            let Some(point) = surface
                .borrow()
                .as_ref()
                .map(|s| s.to_backing(e.client_x() as f64, e.client_y() as f64))
            else {
                return;
            };
            let Some(update) = controller.borrow_mut().pointer_moved(point) else {
                return;
            };
            if let Some(s) = surface.borrow().as_ref() {
                s.set_cursor(update.cursor.css());
            }
            if update.redraw {
                repaint(&controller, &surface);
            }
        }
    };

    let on_pointer_leave = {
        let controller = controller.clone();
        let surface = surface.clone();
        move |_: PointerEvent| {
            let Some(update) = controller.borrow_mut().pointer_left() else {
                return;
            };
            if let Some(s) = surface.borrow().as_ref() {
                s.set_cursor(update.cursor.css());
            }
            if update.redraw {
                repaint(&controller, &surface);
            }
        }
    };

    let on_click = {
        let controller = controller.clone();
        let surface = surface.clone();
        move |e: MouseEvent| {
            let Some(point) = surface
                .borrow()
                .as_ref()
                .map(|s| s.to_backing(e.client_x() as f64, e.client_y() as f64))
            else {
                return;
            };
            let Some(outcome) = controller.borrow_mut().click(point) else {
                return;
            };
            repaint(&controller, &surface);
            schedule_flash_clear(&controller, &surface, &flash_timeout, &outcome);

            // Not cancellable: the page is on its way out.
            if let Some(nav) = outcome.navigation {
                let _ = Timeout::new(nav.delay_ms, move || dom::navigate(&nav.destination))
                    .forget();
            }
        }
    };

    view! {
        <canvas
            node_ref=canvas_ref
            style="display: block; max-width: 100%; height: auto; cursor: default;"
            on:pointermove=on_pointer_move
            on:pointerleave=on_pointer_leave
            on:click=on_click
        />
    }
}
