//! Current document location.
//!
//! In WASM this reads `window.location`. In tests/non-WASM it holds a fixed
//! path set at construction.

use meadow_core::Page;

/// Read-only view of the page location.
#[derive(Debug, Clone, Default)]
pub struct PageLocation {
    #[cfg(not(target_arch = "wasm32"))]
    path: String,
}

impl PageLocation {
    /// Location of the current document.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self {}
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::at("/")
        }
    }

    /// Fixed location, for tests and non-browser hosts.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Current pathname; `/` if it cannot be read.
    #[must_use]
    pub fn pathname(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_string())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.path.clone()
        }
    }

    /// Site page for the current path.
    #[must_use]
    pub fn page(&self) -> Page {
        Page::from_path(&self.pathname())
    }
}
