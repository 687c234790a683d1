//! DOM event listeners and one-shot timers.

use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// An attached event listener. Dropping it detaches the callback.
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Attach `callback` to `event_type` events on `target`.
    ///
    /// Returns `None` if the browser rejected the registration.
    pub fn new<F>(target: &EventTarget, event_type: &'static str, callback: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(callback);
        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(|e| log::warn!("failed to attach {event_type} listener: {e:?}"))
            .ok()?;
        Some(Self {
            target: target.clone(),
            event_type,
            closure,
        })
    }

    /// Event type this listener handles.
    pub fn event_type(&self) -> &'static str {
        self.event_type
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// Run `callback` once after `delay`. Fire-and-forget: the closure frees
/// itself after running.
pub fn set_timeout<F>(delay: Duration, callback: F)
where
    F: FnOnce() + 'static,
{
    let Some(window) = web_sys::window() else {
        log::warn!("no window, dropping timer");
        return;
    };
    let function = Closure::once_into_js(callback);
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        function.unchecked_ref(),
        millis(delay),
    ) {
        log::warn!("setTimeout failed: {e:?}");
    }
}

/// Resolve after `delay` without blocking the page.
pub async fn sleep(delay: Duration) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut scheduled = Ok(0);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        scheduled = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis(delay));
    });
    scheduled?;
    wasm_bindgen_futures::JsFuture::from(promise).await?;
    Ok(())
}

fn millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}
