//! Animated mesh-gradient background bound to `requestAnimationFrame`.

use super::canvas::CanvasPainter;
use super::events::EventListener;
use super::SetupError;
use meadow_core::{AnimationLoop, FrameHandle, FrameScheduler, SiteConfig};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` as a [`FrameScheduler`].
struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let function = callback.as_ref()?.as_ref().unchecked_ref();
        self.window
            .request_animation_frame(function)
            .map(FrameHandle)
            .map_err(|e| log::error!("requestAnimationFrame failed: {e:?}"))
            .ok()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

struct Renderer {
    frames: AnimationLoop<RafScheduler>,
    painter: CanvasPainter,
}

/// Decorative animated background on a canvas element.
#[wasm_bindgen]
pub struct MeshGradient {
    renderer: Rc<RefCell<Renderer>>,
    frame_callback: FrameCallback,
    resize: Option<EventListener>,
}

#[wasm_bindgen]
impl MeshGradient {
    /// Start animating the canvas with the given element id.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<MeshGradient, JsValue> {
        Ok(Self::mount(find_canvas(canvas_id)?, &SiteConfig::default())?)
    }

    /// Like the constructor, with a JSON [`SiteConfig`].
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(canvas_id: &str, config_json: &str) -> Result<MeshGradient, JsValue> {
        let config = SiteConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::mount(find_canvas(canvas_id)?, &config)?)
    }

    /// Current animation clock.
    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 {
        self.renderer
            .try_borrow()
            .map(|r| r.frames.animation().time())
            .unwrap_or_default()
    }

    /// Cancel the pending frame and detach the resize listener.
    pub fn stop(&mut self) {
        self.resize = None;
        if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
            renderer.frames.stop();
        }
        self.frame_callback.borrow_mut().take();
    }
}

impl MeshGradient {
    /// Attach to `canvas` and request the first frame.
    pub fn mount(canvas: HtmlCanvasElement, config: &SiteConfig) -> Result<Self, SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let painter = CanvasPainter::new(canvas)?;

        let mut animation = config.animation();
        animation.resize(painter.fit(&window));

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: Rc::clone(&frame_callback),
        };
        let renderer = Rc::new(RefCell::new(Renderer {
            frames: AnimationLoop::new(animation, scheduler),
            painter,
        }));

        // Callbacks hold weak references so the loop dies with this handle.
        let weak = Rc::downgrade(&renderer);
        *frame_callback.borrow_mut() = Some(Closure::new(move || on_frame(&weak)));

        let weak = Rc::downgrade(&renderer);
        let resize_window = window.clone();
        let resize = EventListener::new(&window, "resize", move |_| {
            on_resize(&weak, &resize_window);
        });

        renderer.borrow_mut().frames.start();
        log::info!("mesh gradient mounted");

        Ok(Self {
            renderer,
            frame_callback,
            resize,
        })
    }
}

impl Drop for MeshGradient {
    fn drop(&mut self) {
        self.stop();
    }
}

fn on_frame(renderer: &Weak<RefCell<Renderer>>) {
    let Some(renderer) = renderer.upgrade() else {
        return;
    };
    let Ok(mut renderer) = renderer.try_borrow_mut() else {
        return;
    };
    let Renderer { frames, painter } = &mut *renderer;
    frames.on_frame(painter);
}

fn on_resize(renderer: &Weak<RefCell<Renderer>>, window: &Window) {
    let Some(renderer) = renderer.upgrade() else {
        return;
    };
    if let Ok(mut renderer) = renderer.try_borrow_mut() {
        let surface = renderer.painter.fit(window);
        renderer.frames.animation_mut().resize(surface);
    }
}

fn find_canvas(id: &str) -> Result<HtmlCanvasElement, SetupError> {
    web_sys::window()
        .ok_or(SetupError::NoWindow)?
        .document()
        .ok_or(SetupError::NoDocument)?
        .get_element_by_id(id)
        .ok_or_else(|| SetupError::MissingElement(id.to_string()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SetupError::NotACanvas(id.to_string()))
}
