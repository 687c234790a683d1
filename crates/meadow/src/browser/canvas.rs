//! Canvas 2D painter for the mesh gradient.

use super::SetupError;
use meadow_core::{BlendMode, Blob, BlobPainter, GradientStop, Size, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

/// Paints blobs onto an HTML5 canvas through its 2D context.
pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Create a painter for the given canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SetupError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SetupError::NoContext(format!("{e:?}")))?
            .ok_or_else(|| SetupError::NoContext("no 2d context available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::NoContext("not a CanvasRenderingContext2d".into()))?;

        Ok(Self { canvas, ctx })
    }

    /// The canvas being painted.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the backing store to the element's layout box times the device
    /// pixel ratio and scale drawing to match. Returns the new surface.
    pub fn fit(&self, window: &Window) -> Surface {
        let rect = self.canvas.get_bounding_client_rect();
        let surface = Surface::new(
            Size::new(rect.width(), rect.height()),
            window.device_pixel_ratio(),
        );
        let (width, height) = surface.backing_size();
        // Resizing the backing store resets the context transform.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let ratio = surface.pixel_ratio;
        if let Err(e) = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0) {
            log::warn!("canvas setTransform failed: {e:?}");
        }

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", rect.width()));
        let _ = style.set_property("height", &format!("{}px", rect.height()));
        surface
    }
}

impl BlobPainter for CanvasPainter {
    fn clear(&mut self, size: Size) {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn set_blend(&mut self, mode: BlendMode) {
        if let Err(e) = self.ctx.set_global_composite_operation(mode.as_css()) {
            log::warn!("globalCompositeOperation {}: {e:?}", mode.as_css());
        }
    }

    fn fill_radial(&mut self, blob: &Blob, stops: &[GradientStop], size: Size) {
        let (x, y) = (blob.center.x, blob.center.y);
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, blob.radius) else {
            // Negative radii are rejected by the browser; skip the blob.
            return;
        };
        for stop in stops {
            let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
    }
}
