//! Page controller: theme buttons, nav highlight and the contact form.
//!
//! Each piece wires itself only if its elements exist; a page without a form
//! still gets theme handling.

use super::dom::{self, MessageField};
use super::events::{self, EventListener};
use super::location::PageLocation;
use super::storage::LocalStorage;
use meadow_core::{
    unit_sample, Command, FormEvent, FormState, NavSelection, ResolvedTheme, SendError,
    SimulatedTransport, SiteConfig, State, ThemeChoice, ThemeManager,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, MediaQueryList};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Theme handling state.
struct ThemeView {
    manager: ThemeManager<LocalStorage>,
    root: Option<Element>,
    buttons: Vec<Element>,
    media: Option<MediaQueryList>,
}

impl ThemeView {
    fn os_theme(&self) -> ResolvedTheme {
        let prefers_dark = self.media.as_ref().is_some_and(MediaQueryList::matches);
        ResolvedTheme::from_prefers_dark(prefers_dark)
    }

    fn select(&mut self, choice: ThemeChoice) {
        let os = self.os_theme();
        let applied = self.manager.select(choice, os);
        self.render(applied.choice, applied.resolved);
    }

    fn on_system_change(&mut self) {
        let os = self.os_theme();
        if let Some(applied) = self.manager.on_system_change(os) {
            self.render(applied.choice, applied.resolved);
        }
    }

    fn render(&self, choice: ThemeChoice, resolved: ResolvedTheme) {
        if let Some(root) = &self.root {
            root.set_class_name(resolved.class_name());
        }
        for button in &self.buttons {
            let active = dom::data(button, "theme").as_deref() == Some(choice.as_str());
            dom::set_class(button, "active", active);
        }
    }
}

/// Contact form elements.
struct FormView {
    button: HtmlButtonElement,
    label: Option<Element>,
    spinner: Option<HtmlElement>,
    field: Option<MessageField>,
    banner: Option<Element>,
}

impl FormView {
    fn render(&self, state: &FormState) {
        let control = state.control();
        self.button.set_disabled(control.disabled());
        if let Some(label) = &self.label {
            label.set_text_content(Some(control.label()));
        }
        if let Some(spinner) = &self.spinner {
            let _ = spinner
                .style()
                .set_property("display", control.spinner_display());
        }
        if let (Some(element), Some(banner)) = (&self.banner, state.banner()) {
            element.set_text_content(Some(&banner.text));
            element.set_class_name(&banner.class_name());
        }
    }
}

struct Controller {
    theme: ThemeView,
    form: Option<(FormView, FormState)>,
    transport: SimulatedTransport,
}

/// Page behavior for theme switching, navigation and the contact form.
#[wasm_bindgen]
pub struct PageController {
    inner: Rc<RefCell<Controller>>,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl PageController {
    /// Wire up the current document with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PageController, JsValue> {
        Ok(Self::mount(&SiteConfig::default())?)
    }

    /// Like the constructor, with a JSON [`SiteConfig`].
    #[wasm_bindgen(js_name = "withConfig")]
    pub fn with_config(config_json: &str) -> Result<PageController, JsValue> {
        let config = SiteConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::mount(&config)?)
    }

    /// Currently chosen theme (`dark`, `light` or `system`).
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.inner
            .try_borrow()
            .map(|c| c.theme.manager.choice().to_string())
            .unwrap_or_default()
    }

    /// Select a theme by name, as a theme button click would.
    #[wasm_bindgen(js_name = "selectTheme")]
    pub fn select_theme(&self, name: &str) -> Result<(), JsValue> {
        let choice: ThemeChoice = name
            .parse()
            .map_err(|e: meadow_core::UnknownTheme| JsValue::from_str(&e.to_string()))?;
        if let Ok(mut controller) = self.inner.try_borrow_mut() {
            controller.theme.select(choice);
        }
        Ok(())
    }
}

impl PageController {
    /// Wire every page behavior whose elements are present.
    pub fn mount(config: &SiteConfig) -> Result<Self, super::SetupError> {
        let window = web_sys::window().ok_or(super::SetupError::NoWindow)?;
        let document = window.document().ok_or(super::SetupError::NoDocument)?;

        let theme = ThemeView {
            manager: ThemeManager::new(
                LocalStorage::new(),
                config.theme.storage_key.clone(),
                config.theme.default,
            ),
            root: document.document_element(),
            buttons: dom::query_all(&document, ".theme-btn"),
            media: window.match_media(DARK_SCHEME_QUERY).ok().flatten(),
        };

        let inner = Rc::new(RefCell::new(Controller {
            theme,
            form: find_form(&document)
                .map(|view| (view, FormState::new(config.form_timings()))),
            transport: config.transport(),
        }));

        let mut listeners = Vec::new();
        {
            let mut controller = inner.borrow_mut();
            let os = controller.theme.os_theme();
            let applied = controller.theme.manager.apply_current(os);
            controller.theme.render(applied.choice, applied.resolved);
            wire_theme(&inner, &controller.theme, &mut listeners);
        }
        highlight_nav(&document, config);
        wire_form(&inner, &document, &mut listeners);

        log::info!("page controller mounted ({} listeners)", listeners.len());
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }
}

fn wire_theme(
    inner: &Rc<RefCell<Controller>>,
    view: &ThemeView,
    listeners: &mut Vec<EventListener>,
) {
    for button in &view.buttons {
        let weak = Rc::downgrade(inner);
        let source = button.clone();
        listeners.extend(EventListener::new(button, "click", move |_| {
            let Some(name) = dom::data(&source, "theme") else {
                return;
            };
            match name.parse::<ThemeChoice>() {
                Ok(choice) => {
                    with_controller(&weak, |c| c.theme.select(choice));
                }
                Err(e) => log::debug!("theme button ignored: {e}"),
            }
        }));
    }

    if let Some(media) = &view.media {
        let weak = Rc::downgrade(inner);
        listeners.extend(EventListener::new(media, "change", move |_| {
            with_controller(&weak, |c| c.theme.on_system_change());
        }));
    }
}

fn highlight_nav(document: &Document, config: &SiteConfig) {
    let links = dom::query_all(document, ".nav-link");
    if links.is_empty() {
        log::debug!("no nav links, skipping highlight");
        return;
    }
    let page = PageLocation::current().page();
    let pages: Vec<Option<String>> = links.iter().map(|link| dom::data(link, "page")).collect();
    let selection = NavSelection::resolve(page, &pages, &config.nav);

    for (link, active) in links.iter().zip(&selection.active) {
        dom::set_class(link, "active", *active);
    }
    let background = document
        .query_selector(".nav-background")
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let (Some(background), Some(left)) = (background, selection.highlight_left) {
        let _ = background.style().set_property("left", &format!("{left}px"));
    }
}

fn find_form(document: &Document) -> Option<FormView> {
    document.get_element_by_id("messageForm")?;
    let Some(button) = dom::by_id::<HtmlButtonElement>(document, "submitBtn") else {
        log::debug!("form without #submitBtn, not wiring");
        return None;
    };
    Some(FormView {
        label: button.query_selector(".btn-text").ok().flatten(),
        spinner: button
            .query_selector(".loading-spinner")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
        field: MessageField::find(document, "message"),
        banner: document.get_element_by_id("formMessage"),
        button,
    })
}

fn wire_form(
    inner: &Rc<RefCell<Controller>>,
    document: &Document,
    listeners: &mut Vec<EventListener>,
) {
    if inner.borrow().form.is_none() {
        return;
    }
    let Some(form) = document.get_element_by_id("messageForm") else {
        return;
    };
    let weak = Rc::downgrade(inner);
    listeners.extend(EventListener::new(&form, "submit", move |event| {
        event.prevent_default();
        let text = with_controller(&weak, |c| {
            c.form
                .as_ref()
                .and_then(|(view, _)| view.field.as_ref())
                .map(MessageField::value)
                .unwrap_or_default()
        });
        if let Some(text) = text {
            dispatch(&weak, FormEvent::Submit(text));
        }
    }));
}

/// Run `f` on the controller if it is still alive and not already borrowed.
fn with_controller<T>(
    weak: &Weak<RefCell<Controller>>,
    f: impl FnOnce(&mut Controller) -> T,
) -> Option<T> {
    let inner = weak.upgrade()?;
    let mut controller = inner.try_borrow_mut().ok()?;
    Some(f(&mut controller))
}

/// Feed a form event through the state machine, re-render, run effects.
fn dispatch(weak: &Weak<RefCell<Controller>>, event: FormEvent) {
    let Some((command, transport)) = with_controller(weak, |c| {
        let transport = c.transport;
        c.form.as_mut().map(|(view, state)| {
            let command = state.update(event);
            view.render(state);
            (command, transport)
        })
    })
    .flatten() else {
        return;
    };

    for effect in command.into_effects() {
        match effect {
            Command::Send { text, on_done } => {
                let weak = weak.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = send(transport, &text).await;
                    dispatch(&weak, on_done(result));
                });
            }
            Command::ClearInput => {
                with_controller(weak, |c| {
                    let field = c.form.as_ref().and_then(|(view, _)| view.field.as_ref());
                    if let Some(field) = field {
                        field.set_value("");
                    }
                });
            }
            Command::After { delay, message } => {
                let weak = weak.clone();
                events::set_timeout(delay, move || dispatch(&weak, message));
            }
            Command::None | Command::Batch(_) => {}
        }
    }
}

/// Simulated delivery: wait, then roll for failure.
async fn send(transport: SimulatedTransport, text: &str) -> Result<(), SendError> {
    events::sleep(transport.delay())
        .await
        .map_err(|e| SendError::Network(format!("{e:?}")))?;
    transport.settle(text, random_sample())
}

fn random_sample() -> f64 {
    let mut bytes = [0u8; 4];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => unit_sample(bytes),
        Err(e) => {
            log::warn!("getrandom failed ({e}), using Math.random");
            js_sys::Math::random()
        }
    }
}
