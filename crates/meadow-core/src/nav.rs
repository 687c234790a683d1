//! Navigation highlighting: which nav entry is active and where the sliding
//! background sits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Site pages reachable from the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    /// Landing page with the contact form
    Waitlist,
    /// Manifesto page
    Manifesto,
}

impl Page {
    /// Page for a document path. Anything that is not the manifesto is the
    /// waitlist.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.contains("manifesto") {
            Self::Manifesto
        } else {
            Self::Waitlist
        }
    }

    /// `data-page` identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Waitlist => "waitlist",
            Self::Manifesto => "manifesto",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Fixed geometry of the nav bar slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLayout {
    /// Width of one nav slot
    pub slot_width: f64,
    /// Inset of the highlight inside the bar
    pub margin: f64,
}

impl Default for NavLayout {
    fn default() -> Self {
        Self {
            slot_width: 90.0,
            margin: 4.0,
        }
    }
}

impl NavLayout {
    /// Horizontal offset of the highlight for the entry at `index`.
    #[must_use]
    pub fn highlight_offset(&self, index: usize) -> f64 {
        index as f64 * self.slot_width + self.margin
    }
}

/// Resolved nav state for a page.
#[derive(Debug, Clone, PartialEq)]
pub struct NavSelection {
    /// One flag per link, in document order
    pub active: Vec<bool>,
    /// Highlight `left` offset, if any link matched
    pub highlight_left: Option<f64>,
}

impl NavSelection {
    /// Match `links` (each link's `data-page`, if present) against `page`.
    ///
    /// When several links match, the highlight follows the last one.
    #[must_use]
    pub fn resolve(page: Page, links: &[Option<String>], layout: &NavLayout) -> Self {
        let active: Vec<bool> = links
            .iter()
            .map(|link| link.as_deref() == Some(page.id()))
            .collect();
        let highlight_left = active
            .iter()
            .rposition(|&is_active| is_active)
            .map(|index| layout.highlight_offset(index));
        Self {
            active,
            highlight_left,
        }
    }
}
