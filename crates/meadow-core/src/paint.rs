//! Painting port for the mesh gradient, plus a recording implementation.

use crate::gradient::{Blob, GradientStop};
use crate::geometry::Size;

/// Compositing rule applied to subsequent fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal painting, new pixels over old
    #[default]
    SourceOver,
    /// Overlapping colours brighten instead of occluding
    Screen,
}

impl BlendMode {
    /// Canvas `globalCompositeOperation` value.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::Screen => "screen",
        }
    }
}

/// Drawing operations a gradient frame needs from its surface.
///
/// All coordinates are logical pixels; implementations apply the device
/// pixel ratio themselves.
pub trait BlobPainter {
    /// Clear the whole surface.
    fn clear(&mut self, size: Size);

    /// Set the compositing rule for following fills.
    fn set_blend(&mut self, mode: BlendMode);

    /// Fill the whole surface with a radial gradient centred on `blob`,
    /// spanning radius 0 to `blob.radius`.
    fn fill_radial(&mut self, blob: &Blob, stops: &[GradientStop], size: Size);
}

/// A recorded paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// Surface cleared
    Clear {
        /// Cleared area
        size: Size,
    },
    /// Blend mode switched
    Blend(BlendMode),
    /// Radial gradient fill
    Radial {
        /// Blob the gradient was built for
        blob: Blob,
        /// Colour stops
        stops: Vec<GradientStop>,
        /// Filled area
        size: Size,
    },
}

/// A painter that records operations instead of drawing.
///
/// Useful for testing frame output without a browser.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    ops: Vec<PaintOp>,
}

impl RecordingPainter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Take ownership of the recorded operations, clearing the recorder.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl BlobPainter for RecordingPainter {
    fn clear(&mut self, size: Size) {
        self.ops.push(PaintOp::Clear { size });
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.ops.push(PaintOp::Blend(mode));
    }

    fn fill_radial(&mut self, blob: &Blob, stops: &[GradientStop], size: Size) {
        self.ops.push(PaintOp::Radial {
            blob: *blob,
            stops: stops.to_vec(),
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{blobs_at, Palette};

    #[test]
    fn test_blend_mode_css() {
        assert_eq!(BlendMode::Screen.as_css(), "screen");
        assert_eq!(BlendMode::SourceOver.as_css(), "source-over");
        assert_eq!(BlendMode::default(), BlendMode::SourceOver);
    }

    #[test]
    fn test_recording_painter_records_in_order() {
        let size = Size::new(100.0, 100.0);
        let blob = blobs_at(0.0, size, &Palette::default())[0];
        let mut painter = RecordingPainter::new();
        assert!(painter.is_empty());

        painter.clear(size);
        painter.set_blend(BlendMode::Screen);
        painter.fill_radial(&blob, &blob.stops(), size);

        assert_eq!(painter.ops().len(), 3);
        assert_eq!(painter.ops()[0], PaintOp::Clear { size });
        assert_eq!(painter.ops()[1], PaintOp::Blend(BlendMode::Screen));
        match &painter.ops()[2] {
            PaintOp::Radial { blob: b, stops, .. } => {
                assert_eq!(*b, blob);
                assert_eq!(stops.len(), 3);
            }
            other => panic!("Expected Radial, got {other:?}"),
        }
    }

    #[test]
    fn test_take_ops_clears() {
        let mut painter = RecordingPainter::new();
        painter.set_blend(BlendMode::Screen);
        assert_eq!(painter.take_ops().len(), 1);
        assert!(painter.is_empty());
    }
}
