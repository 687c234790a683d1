//! Core types for the Meadow site runtime.
//!
//! Nothing in this crate touches the browser. It holds:
//! - Mesh-gradient model and frame driver: [`Palette`], [`Surface`],
//!   [`blobs_at`], [`GradientAnimation`], [`AnimationLoop`]
//! - Painting and scheduling ports: [`BlobPainter`], [`FrameScheduler`]
//! - Page behavior: [`ThemeManager`], [`NavSelection`], [`FormState`]
//! - Configuration: [`SiteConfig`]
//!
//! The `meadow` crate binds these to the DOM.

mod animation;
mod color;
pub mod config;
pub mod form;
mod geometry;
mod gradient;
pub mod nav;
mod paint;
mod state;
pub mod theme;
mod transport;

pub use animation::{AnimationLoop, FrameHandle, FrameOutcome, FrameScheduler, GradientAnimation};
pub use color::{Color, ColorParseError};
pub use config::{ConfigError, SiteConfig};
pub use form::{Banner, FormEvent, FormPhase, FormState, FormTimings, Severity, SubmitControl};
pub use geometry::{Point, Size};
pub use gradient::{
    blobs_at, AnimationClock, Blob, GradientStop, Palette, Surface, BLOB_COUNT, DEFAULT_PALETTE,
    DEFAULT_SPEED,
};
pub use nav::{NavLayout, NavSelection, Page};
pub use paint::{BlendMode, BlobPainter, PaintOp, RecordingPainter};
pub use state::{Command, State};
pub use theme::{AppliedTheme, PreferenceStore, ResolvedTheme, ThemeChoice, ThemeManager, UnknownTheme};
pub use transport::{unit_sample, SendError, SimulatedTransport};
