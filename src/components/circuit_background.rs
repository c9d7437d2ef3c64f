use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::board::{BoardConfig, BoardController, FrameLoop, MathRandom, Regen, Scene, Viewport};
use crate::render::draw_scene;
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct CircuitBackgroundProps {
    pub config: Rc<BoardConfig>,
    #[prop_or(false)]
    pub show_glyphs: bool,
}

fn measure(canvas: &HtmlCanvasElement) -> Viewport {
    let rect = match canvas.parent_element() {
        Some(parent) => parent.get_bounding_client_rect(),
        None => canvas.get_bounding_client_rect(),
    };
    Viewport::new(rect.width(), rect.height())
}

fn apply_canvas_size(canvas: &HtmlCanvasElement, vp: Viewport) {
    canvas.set_width(vp.width.max(0.0) as u32);
    canvas.set_height(vp.height.max(0.0) as u32);
}

fn log_scene(scene: Option<&Scene>) {
    if let Some(scene) = scene {
        clog(&format!(
            "board: {}x{} scene, {} lines, {} markers",
            scene.viewport.width as u32,
            scene.viewport.height as u32,
            scene.line_count(),
            scene.marker_count()
        ));
    }
}

#[function_component(CircuitBackground)]
pub fn circuit_background(props: &CircuitBackgroundProps) -> Html {
    let canvas_ref = use_node_ref();

    // Mount effect: scene, resize listeners, RAF loop
    {
        let canvas_ref = canvas_ref.clone();
        let deps = (props.config.clone(), props.show_glyphs);
        use_effect_with(deps, move |(config, show_glyphs)| -> Box<dyn FnOnce()> {
            let Some(window) = web_sys::window() else {
                return Box::new(|| ());
            };
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return Box::new(|| ());
            };
            let Some(ctx) = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
            else {
                clog("board: no 2d context, background disabled");
                return Box::new(|| ());
            };

            let mut board_cfg = (**config).clone();
            if !*show_glyphs {
                board_cfg.glyphs.clear();
            }
            let debounce_ms = board_cfg.resize_debounce_ms;
            let controller = Rc::new(RefCell::new(BoardController::new(board_cfg, MathRandom)));

            let initial = measure(&canvas);
            if controller.borrow_mut().resize_now(initial) == Regen::Generated {
                apply_canvas_size(&canvas, initial);
                log_scene(controller.borrow().scene());
            } else {
                clog("board: container not laid out yet, waiting for resize");
            }

            // Frame loop
            let frame_loop = {
                let controller = controller.clone();
                Rc::new(RefCell::new(FrameLoop::new(move |elapsed| {
                    let c = controller.borrow();
                    if let Some(scene) = c.scene() {
                        draw_scene(&ctx, scene, elapsed, c.config());
                    }
                })))
            };
            let raf_id = Rc::new(Cell::new(None::<i32>));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
            {
                let raf_id_loop = raf_id.clone();
                let cell_loop = closure_cell.clone();
                let window_loop = window.clone();
                let frame_loop = frame_loop.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
                    if !frame_loop.borrow_mut().frame(now) {
                        raf_id_loop.set(None);
                        return;
                    }
                    if let Some(cb) = cell_loop.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            raf_id_loop.set(Some(id));
                        }
                    }
                }) as Box<dyn FnMut(f64)>));
                if let Some(cb) = closure_cell.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id.set(Some(id));
                    }
                }
            }

            // Resize / orientation change, debounced; replacing the timer cancels the old one
            let debounce: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
            let resize_cb = {
                let canvas = canvas.clone();
                let controller = controller.clone();
                let debounce = debounce.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    let vp = measure(&canvas);
                    let ticket = controller.borrow_mut().request_resize(vp);
                    let canvas = canvas.clone();
                    let controller = controller.clone();
                    let timer = Timeout::new(debounce_ms, move || {
                        let regen = controller.borrow_mut().regenerate(ticket);
                        match regen {
                            Regen::Generated => {
                                apply_canvas_size(&canvas, vp);
                                log_scene(controller.borrow().scene());
                            }
                            Regen::Skipped => clog("board: resize to unmeasured container skipped"),
                            Regen::Stale => {}
                        }
                    });
                    *debounce.borrow_mut() = Some(timer);
                }) as Box<dyn FnMut(_)>)
            };
            for event in ["resize", "orientationchange"] {
                let _ = window.add_event_listener_with_callback(event, resize_cb.as_ref().unchecked_ref());
            }

            // Cleanup
            Box::new(move || {
                frame_loop.borrow().stop();
                if let Some(id) = raf_id.take() {
                    let _ = window.cancel_animation_frame(id);
                }
                for event in ["resize", "orientationchange"] {
                    let _ = window.remove_event_listener_with_callback(event, resize_cb.as_ref().unchecked_ref());
                }
                debounce.borrow_mut().take();
                closure_cell.borrow_mut().take();
                drop(resize_cb);
            })
        });
    }

    html! {
        <div aria-hidden="true" style="position:fixed; inset:0; pointer-events:none; overflow:hidden; z-index:0;">
            <canvas ref={canvas_ref} style="display:block; width:100%; height:100%;" />
        </div>
    }
}
