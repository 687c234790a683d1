//! Meadow: WASM runtime for the Meadow marketing site.
//!
//! Paints the animated mesh-gradient background and drives the page chrome
//! (theme switcher, nav highlight, contact form). The state machines live in
//! `meadow-core`; this crate binds them to the browser.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { MeshGradient, PageController } from './meadow.js';
//!
//! async function main() {
//!     await init(); // mounts on #gradient-canvas and the page automatically
//!     const hero = MeshGradient.withConfig('hero-canvas', '{"gradient":{"speed":0.002}}');
//!     hero.stop();
//! }
//! ```

#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::needless_pass_by_value,
    clippy::type_complexity,
    clippy::manual_let_else,
    clippy::uninlined_format_args,
    unreachable_pub
)]

pub use meadow_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{CanvasPainter, MeshGradient, PageController};

pub use browser::{LocalStorage, PageLocation, SetupError, StorageError};

/// Canvas the start hook animates, if the page has one.
pub const GRADIENT_CANVAS_ID: &str = "gradient-canvas";

#[cfg(target_arch = "wasm32")]
mod site {
    use super::browser::events::EventListener;
    use super::browser::{MeshGradient, PageController};
    use super::GRADIENT_CANVAS_ID;
    use meadow_core::SiteConfig;
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::DocumentReadyState;

    /// Components mounted by the start hook. Lives for the page's lifetime.
    struct Site {
        _gradient: Option<MeshGradient>,
        _page: Option<PageController>,
    }

    thread_local! {
        static SITE: RefCell<Option<Site>> = const { RefCell::new(None) };
        // Fires once; kept so the closure outlives the event.
        static READY: RefCell<Option<EventListener>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("meadow starting");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        if document.ready_state() == DocumentReadyState::Loading {
            let listener = EventListener::new(&document, "DOMContentLoaded", |_| mount_site());
            READY.with(|ready| *ready.borrow_mut() = listener);
        } else {
            mount_site();
        }
        Ok(())
    }

    fn mount_site() {
        let config = SiteConfig::default();
        let gradient = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(GRADIENT_CANVAS_ID))
            .and_then(|element| element.dyn_into().ok())
            .and_then(|canvas| {
                MeshGradient::mount(canvas, &config)
                    .map_err(|e| log::error!("mesh gradient: {e}"))
                    .ok()
            });
        if gradient.is_none() {
            log::debug!("no #{GRADIENT_CANVAS_ID}, background not animated");
        }
        let page = PageController::mount(&config)
            .map_err(|e| log::error!("page controller: {e}"))
            .ok();
        SITE.with(|site| {
            *site.borrow_mut() = Some(Site {
                _gradient: gradient,
                _page: page,
            });
        });
    }
}

#[cfg(target_arch = "wasm32")]
pub use site::start;
