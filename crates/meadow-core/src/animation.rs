//! Frame driver for the mesh gradient.
//!
//! [`GradientAnimation`] paints one frame and advances its clock.
//! [`AnimationLoop`] couples it to a host [`FrameScheduler`] (the browser's
//! `requestAnimationFrame`), so the loop never owns a thread and can be
//! stopped by cancelling the pending request.

use crate::gradient::{blobs_at, AnimationClock, Palette, Surface};
use crate::paint::{BlendMode, BlobPainter};

/// Opaque id of a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host scheduling primitive: run the frame callback on the next display
/// refresh.
pub trait FrameScheduler {
    /// Request one callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Cancel a pending request.
    fn cancel(&mut self, handle: FrameHandle);
}

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Surface has no size yet; nothing drawn, clock untouched
    Skipped,
    /// Frame drawn at `time`; the clock has since advanced
    Drawn {
        /// Clock value the frame was drawn at
        time: f64,
    },
}

/// Animated gradient state: surface, palette and clock.
#[derive(Debug, Clone)]
pub struct GradientAnimation {
    surface: Surface,
    palette: Palette,
    clock: AnimationClock,
}

impl GradientAnimation {
    /// Animation with the given palette and per-frame clock step.
    #[must_use]
    pub fn new(palette: Palette, speed: f64) -> Self {
        Self {
            surface: Surface::default(),
            palette,
            clock: AnimationClock::new(speed),
        }
    }

    /// Current surface.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Replace the surface after a layout change.
    pub fn resize(&mut self, surface: Surface) {
        log::debug!(
            "gradient surface resized to {}x{} @{}",
            surface.size.width,
            surface.size.height,
            surface.pixel_ratio
        );
        self.surface = surface;
    }

    /// Current clock value.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.clock.time()
    }

    /// Paint one frame and advance the clock.
    pub fn frame<P: BlobPainter + ?Sized>(&mut self, painter: &mut P) -> FrameOutcome {
        if !self.surface.is_ready() {
            return FrameOutcome::Skipped;
        }

        let size = self.surface.size;
        let time = self.clock.time();
        painter.clear(size);

        painter.set_blend(BlendMode::Screen);
        for blob in &blobs_at(time, size, &self.palette) {
            painter.fill_radial(blob, &blob.stops(), size);
        }
        painter.set_blend(BlendMode::SourceOver);

        self.clock.tick();
        FrameOutcome::Drawn { time }
    }
}

/// Loop state around a [`GradientAnimation`]: pending request and stop flag.
#[derive(Debug)]
pub struct AnimationLoop<S: FrameScheduler> {
    animation: GradientAnimation,
    scheduler: S,
    pending: Option<FrameHandle>,
    stopped: bool,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    /// Create a loop; nothing is scheduled until [`start`](Self::start).
    pub fn new(animation: GradientAnimation, scheduler: S) -> Self {
        Self {
            animation,
            scheduler,
            pending: None,
            stopped: false,
        }
    }

    /// Animation state.
    pub fn animation(&self) -> &GradientAnimation {
        &self.animation
    }

    /// Mutable animation state (for resizes).
    pub fn animation_mut(&mut self) -> &mut GradientAnimation {
        &mut self.animation
    }

    /// Pending frame request, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// True once [`stop`](Self::stop) has been called.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Request the first frame.
    pub fn start(&mut self) {
        if self.stopped || self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
    }

    /// Frame callback: draw (or skip) and request the next frame.
    pub fn on_frame<P: BlobPainter + ?Sized>(&mut self, painter: &mut P) -> Option<FrameOutcome> {
        self.pending = None;
        if self.stopped {
            return None;
        }
        let outcome = self.animation.frame(painter);
        self.pending = self.scheduler.request_frame();
        Some(outcome)
    }

    /// Cancel the pending request. No frame is drawn afterwards.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.stopped = true;
        log::debug!("gradient loop stopped at t={}", self.animation.time());
    }
}
