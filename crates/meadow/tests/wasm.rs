//! WASM browser tests - run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use meadow::browser::events::sleep;
use meadow::browser::{CanvasPainter, LocalStorage, PageLocation};
use meadow::{blobs_at, BlobPainter, MeshGradient, PageController, Palette, Size, Surface};
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement};

fn document() -> Document {
    web_sys::window()
        .expect("window")
        .document()
        .expect("document")
}

fn append(html_tag: &str, id: &str) -> Element {
    let document = document();
    let element = document.create_element(html_tag).expect("create");
    element.set_id(id);
    document
        .body()
        .expect("body")
        .append_child(&element)
        .expect("append");
    element
}

fn canvas(id: &str) -> HtmlCanvasElement {
    let canvas: HtmlCanvasElement = append("canvas", id).dyn_into().expect("canvas");
    let _ = canvas.style().set_property("width", "200px");
    let _ = canvas.style().set_property("height", "100px");
    canvas
}

// ============================================================================
// Storage / Location
// ============================================================================

#[wasm_bindgen_test]
fn test_local_storage_roundtrip() {
    let storage = LocalStorage::new();
    storage.set("meadow-test-key", "light").expect("set");
    assert_eq!(storage.get("meadow-test-key").as_deref(), Some("light"));
    storage.remove("meadow-test-key").expect("remove");
    assert_eq!(storage.get("meadow-test-key"), None);
}

#[wasm_bindgen_test]
fn test_location_reads_pathname() {
    let path = PageLocation::current().pathname();
    assert!(path.starts_with('/'));
}

// ============================================================================
// Canvas
// ============================================================================

#[wasm_bindgen_test]
fn test_canvas_painter_fit_and_paint() {
    let element = canvas("painter-canvas");
    let mut painter = CanvasPainter::new(element.clone()).expect("2d context");
    let window = web_sys::window().expect("window");

    let surface = painter.fit(&window);
    assert!(surface.is_ready());
    let (width, height) = surface.backing_size();
    assert_eq!(element.width(), width);
    assert_eq!(element.height(), height);

    let size = surface.size;
    painter.clear(size);
    for blob in blobs_at(0.0, size, &Palette::default()) {
        painter.fill_radial(&blob, &blob.stops(), size);
    }
}

#[wasm_bindgen_test]
fn test_canvas_painter_zero_size() {
    let element = append("canvas", "empty-canvas")
        .dyn_into::<HtmlCanvasElement>()
        .expect("canvas");
    let _ = element.style().set_property("display", "none");
    let painter = CanvasPainter::new(element).expect("2d context");
    let surface = painter.fit(&web_sys::window().expect("window"));
    assert_eq!(surface, Surface::new(Size::ZERO, surface.pixel_ratio));
    assert!(!surface.is_ready());
}

// ============================================================================
// MeshGradient
// ============================================================================

#[wasm_bindgen_test]
fn test_mesh_gradient_missing_canvas() {
    assert!(MeshGradient::new("no-such-canvas").is_err());
}

#[wasm_bindgen_test]
fn test_mesh_gradient_not_a_canvas() {
    append("div", "not-a-canvas");
    assert!(MeshGradient::new("not-a-canvas").is_err());
}

#[wasm_bindgen_test]
async fn test_mesh_gradient_advances_then_stops() {
    canvas("animated-canvas");
    let mut gradient = MeshGradient::new("animated-canvas").expect("mount");

    sleep(Duration::from_millis(200)).await.expect("sleep");
    let running = gradient.time();
    assert!(running > 0.0, "clock should advance while running");

    gradient.stop();
    let stopped = gradient.time();
    sleep(Duration::from_millis(100)).await.expect("sleep");
    assert_eq!(gradient.time(), stopped);
}

#[wasm_bindgen_test]
fn test_mesh_gradient_rejects_bad_config() {
    canvas("config-canvas");
    let result = MeshGradient::with_config("config-canvas", r#"{"gradient":{"speed":-1}}"#);
    assert!(result.is_err());
}

// ============================================================================
// PageController
// ============================================================================

fn theme_button(theme: &str) -> Element {
    let button = document().create_element("button").expect("create");
    button.set_class_name("theme-btn");
    button.set_attribute("data-theme", theme).expect("attr");
    document()
        .body()
        .expect("body")
        .append_child(&button)
        .expect("append");
    button
}

#[wasm_bindgen_test]
fn test_page_controller_theme_selection() {
    let light = theme_button("light");
    let dark = theme_button("dark");
    let config = r#"{"theme":{"storage_key":"meadow-test-theme","default":"dark"}}"#;
    LocalStorage::new()
        .remove("meadow-test-theme")
        .expect("remove");

    let page = PageController::with_config(config).expect("mount");
    assert_eq!(page.theme(), "dark");
    let root = document().document_element().expect("root");
    assert_eq!(root.class_name(), "dark");
    assert!(dark.class_list().contains("active"));

    page.select_theme("light").expect("select");
    assert_eq!(root.class_name(), "light");
    assert!(light.class_list().contains("active"));
    assert!(!dark.class_list().contains("active"));
    assert_eq!(
        LocalStorage::new().get("meadow-test-theme").as_deref(),
        Some("light")
    );

    assert!(page.select_theme("sepia").is_err());
    assert_eq!(page.theme(), "light");
}

#[wasm_bindgen_test]
fn test_page_controller_theme_button_click() {
    let button = theme_button("light");
    let config = r#"{"theme":{"storage_key":"meadow-click-theme","default":"dark"}}"#;
    let page = PageController::with_config(config).expect("mount");

    button.dyn_ref::<web_sys::HtmlElement>().expect("html").click();
    assert_eq!(page.theme(), "light");
}

fn contact_form() -> (HtmlButtonElement, HtmlInputElement, Element) {
    let document = document();
    let form = append("form", "messageForm");

    let input: HtmlInputElement = document
        .create_element("input")
        .expect("create")
        .dyn_into()
        .expect("input");
    input.set_id("message");
    form.append_child(&input).expect("append");

    let button: HtmlButtonElement = document
        .create_element("button")
        .expect("create")
        .dyn_into()
        .expect("button");
    button.set_id("submitBtn");
    button.set_inner_html(
        r#"<span class="btn-text">Send Message</span><span class="loading-spinner"></span>"#,
    );
    form.append_child(&button).expect("append");

    let banner = append("div", "formMessage");
    banner.set_class_name("form-message");
    (button, input, form)
}

fn submit(form: &Element) {
    let event = web_sys::Event::new("submit").expect("event");
    form.dispatch_event(&event).expect("dispatch");
}

#[wasm_bindgen_test]
async fn test_page_controller_form_flow() {
    let (button, input, form) = contact_form();
    let config = r#"{"theme":{"storage_key":"meadow-form-theme"},
        "form":{"send_delay_ms":20,"failure_probability":0.0,"release_delay_ms":20,"message_ttl_ms":5000}}"#;
    let _page = PageController::with_config(config).expect("mount");
    let banner = document().get_element_by_id("formMessage").expect("banner");

    // Blank input is rejected without disabling the button.
    input.set_value("   ");
    submit(&form);
    assert_eq!(banner.text_content().as_deref(), Some(meadow::form::EMPTY_MESSAGE_TEXT));
    assert_eq!(banner.class_name(), "form-message show error");
    assert!(!button.disabled());

    input.set_value("hello");
    submit(&form);
    assert!(button.disabled());

    sleep(Duration::from_millis(150)).await.expect("sleep");
    assert_eq!(banner.class_name(), "form-message show success");
    assert_eq!(input.value(), "");
    assert!(!button.disabled());

    // Clean up so other tests see a single form.
    form.remove();
    banner.remove();
}

#[wasm_bindgen_test]
async fn test_page_controller_form_failure_releases_control() {
    let (button, input, form) = contact_form();
    let config = r#"{"theme":{"storage_key":"meadow-form-theme"},
        "form":{"send_delay_ms":20,"failure_probability":1.0,"release_delay_ms":60000,"message_ttl_ms":5000}}"#;
    let _page = PageController::with_config(config).expect("mount");
    let banner = document().get_element_by_id("formMessage").expect("banner");

    input.set_value("hello");
    submit(&form);
    assert!(button.disabled());

    sleep(Duration::from_millis(150)).await.expect("sleep");
    assert_eq!(banner.text_content().as_deref(), Some(meadow::form::FAILURE_TEXT));
    assert_eq!(banner.class_name(), "form-message show error");
    // Released without waiting for the success delay; input kept for a retry.
    assert!(!button.disabled());
    assert_eq!(input.value(), "hello");

    form.remove();
    banner.remove();
}

// ============================================================================
// Navigation
// ============================================================================

fn nav_link(page: &str) -> Element {
    let link = document().create_element("a").expect("create");
    link.set_class_name("nav-link");
    link.set_attribute("data-page", page).expect("attr");
    document()
        .body()
        .expect("body")
        .append_child(&link)
        .expect("append");
    link
}

#[wasm_bindgen_test]
fn test_page_controller_highlights_nav() {
    let links = [nav_link("waitlist"), nav_link("manifesto")];
    let background: web_sys::HtmlElement = append("div", "nav-bg")
        .dyn_into()
        .expect("html element");
    background.set_class_name("nav-background");

    let config = r#"{"theme":{"storage_key":"meadow-nav-theme"},"nav":{"slot_width":90,"margin":4}}"#;
    let _page = PageController::with_config(config).expect("mount");

    let current = PageLocation::current().page();
    let index = links
        .iter()
        .position(|link| link.get_attribute("data-page").as_deref() == Some(current.id()))
        .expect("current page has a link");
    for (i, link) in links.iter().enumerate() {
        assert_eq!(link.class_list().contains("active"), i == index);
    }
    let expected = format!("{}px", index * 90 + 4);
    assert_eq!(
        background.style().get_property_value("left").expect("left"),
        expected
    );

    for link in &links {
        link.remove();
    }
    background.remove();
}
