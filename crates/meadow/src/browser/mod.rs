//! Browser runtime for the landing site.
//!
//! Binds the platform-neutral state machines in `meadow-core` to the DOM,
//! Canvas2D and `requestAnimationFrame`.

use thiserror::Error;

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod gradient;
#[cfg(target_arch = "wasm32")]
pub mod page;

// Cross-platform modules
pub mod location;
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
#[cfg(target_arch = "wasm32")]
pub use events::EventListener;
#[cfg(target_arch = "wasm32")]
pub use gradient::MeshGradient;
pub use location::PageLocation;
#[cfg(target_arch = "wasm32")]
pub use page::PageController;
pub use storage::{LocalStorage, StorageError};

/// Failure to attach a component to the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// No global `window`
    #[error("no window")]
    NoWindow,
    /// Window without a document
    #[error("no document")]
    NoDocument,
    /// No element with this id
    #[error("element #{0} not found")]
    MissingElement(String),
    /// Element exists but is not a canvas
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    /// Canvas 2D context unavailable
    #[error("canvas 2d context unavailable: {0}")]
    NoContext(String),
}

#[cfg(target_arch = "wasm32")]
impl From<SetupError> for wasm_bindgen::JsValue {
    fn from(err: SetupError) -> Self {
        Self::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_messages() {
        assert_eq!(
            SetupError::MissingElement("gradientCanvas".into()).to_string(),
            "element #gradientCanvas not found"
        );
        assert_eq!(
            SetupError::NotACanvas("hero".into()).to_string(),
            "element #hero is not a canvas"
        );
        assert_eq!(SetupError::NoWindow.to_string(), "no window");
    }
}
