//! Mesh-gradient model: palette, surface sizing, animation clock and the blob
//! formulas.
//!
//! Everything here is a pure function of its inputs. The same clock value and
//! surface size always yield the same four [`Blob`]s.

use crate::color::{Color, ColorParseError};
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// Number of blobs painted per frame.
pub const BLOB_COUNT: usize = 4;

/// Default clock increment per rendered frame.
pub const DEFAULT_SPEED: f64 = 0.025;

/// Default palette, dark to light green.
pub const DEFAULT_PALETTE: [&str; BLOB_COUNT] = ["#006400", "#32CD32", "#14A085", "#64FF96"];

/// Four fixed colours, one per blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette([Color; BLOB_COUNT]);

impl Palette {
    /// Create a palette from four colours.
    #[must_use]
    pub const fn new(colors: [Color; BLOB_COUNT]) -> Self {
        Self(colors)
    }

    /// Parse four hex strings.
    pub fn from_hex<S: AsRef<str>>(hex: &[S; BLOB_COUNT]) -> Result<Self, ColorParseError> {
        let mut colors = [Color::BLACK; BLOB_COUNT];
        for (slot, value) in colors.iter_mut().zip(hex) {
            *slot = Color::from_hex(value.as_ref())?;
        }
        Ok(Self(colors))
    }

    /// Colour for blob `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Color> {
        self.0.get(index).copied()
    }

    /// All colours in blob order.
    #[must_use]
    pub const fn colors(&self) -> &[Color; BLOB_COUNT] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self([
            Color::from_rgb8(0x00, 0x64, 0x00),
            Color::from_rgb8(0x32, 0xcd, 0x32),
            Color::from_rgb8(0x14, 0xa0, 0x85),
            Color::from_rgb8(0x64, 0xff, 0x96),
        ])
    }
}

/// Drawable surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Logical size in CSS pixels
    pub size: Size,
    /// Device pixel ratio
    pub pixel_ratio: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            pixel_ratio: 1.0,
        }
    }
}

impl Surface {
    /// Surface for a layout rectangle. A missing or non-positive ratio means 1.
    #[must_use]
    pub fn new(size: Size, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self { size, pixel_ratio }
    }

    /// Physical backing store size, truncated to whole pixels.
    #[must_use]
    pub fn backing_size(&self) -> (u32, u32) {
        let scaled = self.size.scale(self.pixel_ratio);
        (scaled.width.max(0.0) as u32, scaled.height.max(0.0) as u32)
    }

    /// False until layout has given the surface a non-zero size.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.size.is_empty()
    }
}

/// Monotonic animation clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    time: f64,
    step: f64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl AnimationClock {
    /// Clock at zero advancing by `step` per frame.
    #[must_use]
    pub const fn new(step: f64) -> Self {
        Self { time: 0.0, step }
    }

    /// Current time.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Increment per frame.
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Advance one frame and return the new time.
    pub fn tick(&mut self) -> f64 {
        self.time += self.step;
        self.time
    }
}

/// One radial colour blob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    /// Centre in logical pixels
    pub center: Point,
    /// Outer radius in logical pixels
    pub radius: f64,
    /// Base colour
    pub color: Color,
}

/// A colour stop of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, 0.0 at the centre
    pub offset: f64,
    /// Stop colour including alpha
    pub color: Color,
}

impl Blob {
    /// Opacity falloff: 0.8 at the centre, 0.4 halfway, clear at the edge.
    #[must_use]
    pub fn stops(&self) -> [GradientStop; 3] {
        [
            GradientStop {
                offset: 0.0,
                color: self.color.with_alpha(0.8),
            },
            GradientStop {
                offset: 0.5,
                color: self.color.with_alpha(0.4),
            },
            GradientStop {
                offset: 1.0,
                color: self.color.with_alpha(0.0),
            },
        ]
    }
}

/// Blob layout at clock value `t` on a surface of logical size `size`.
#[must_use]
pub fn blobs_at(t: f64, size: Size, palette: &Palette) -> [Blob; BLOB_COUNT] {
    let (w, h) = (size.width, size.height);
    let [c0, c1, c2, c3] = *palette.colors();
    [
        Blob {
            center: Point::new(
                w * 0.2 + (t * 0.5).sin() * 100.0,
                h * 0.3 + (t * 0.3).cos() * 80.0,
            ),
            radius: 200.0 + (t * 0.4).sin() * 50.0,
            color: c0,
        },
        Blob {
            center: Point::new(
                w * 0.8 + (t * 0.4).cos() * 120.0,
                h * 0.7 + (t * 0.6).sin() * 100.0,
            ),
            radius: 250.0 + (t * 0.3).cos() * 60.0,
            color: c1,
        },
        Blob {
            center: Point::new(
                w * 0.6 + (t * 0.7).sin() * 90.0,
                h * 0.2 + (t * 0.5).cos() * 70.0,
            ),
            radius: 180.0 + (t * 0.6).sin() * 40.0,
            color: c2,
        },
        Blob {
            center: Point::new(
                w * 0.3 + (t * 0.3).cos() * 110.0,
                h * 0.8 + (t * 0.4).sin() * 90.0,
            ),
            radius: 220.0 + (t * 0.5).cos() * 50.0,
            color: c3,
        },
    ]
}
