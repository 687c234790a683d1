//! Colour theme selection and persistence.
//!
//! A user picks `dark`, `light` or `system`. The page is styled with the
//! *resolved* theme while the store keeps the *chosen* one, so `system` keeps
//! following the OS preference across reloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

/// Default storage key for the theme preference.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Theme as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Dark styling
    #[default]
    Dark,
    /// Light styling
    Light,
    /// Follow the OS colour-scheme preference
    System,
}

impl ThemeChoice {
    /// All accepted choices.
    pub const ALL: [Self; 3] = [Self::Dark, Self::Light, Self::System];

    /// Stored / `data-theme` name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::System => "system",
        }
    }

    /// Resolve against the OS preference.
    #[must_use]
    pub const fn resolve(self, os: ResolvedTheme) -> ResolvedTheme {
        match self {
            Self::Dark => ResolvedTheme::Dark,
            Self::Light => ResolvedTheme::Light,
            Self::System => os,
        }
    }
}

impl fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name outside `dark|light|system`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?} (expected dark, light or system)")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeChoice {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "system" => Ok(Self::System),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Theme actually applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    /// Dark styling
    Dark,
    /// Light styling
    Light,
}

impl ResolvedTheme {
    /// Map a `(prefers-color-scheme: dark)` match result.
    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Document class name.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Durable key-value slot for preferences.
pub trait PreferenceStore {
    /// Read a value.
    fn load(&self, key: &str) -> Option<String>;

    /// Why a write failed.
    type Error: std::error::Error;

    /// Write a value. Failures are reported, never fatal.
    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    type Error = T::Error;

    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).save(key, value)
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    type Error = T::Error;

    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).save(key, value)
    }
}

/// Result of applying a theme: what the page should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedTheme {
    /// Choice to highlight among the theme buttons
    pub choice: ThemeChoice,
    /// Class to set on the document element
    pub resolved: ResolvedTheme,
}

/// Owns the current theme choice and its persistence.
#[derive(Debug)]
pub struct ThemeManager<S: PreferenceStore> {
    store: S,
    key: String,
    choice: ThemeChoice,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Read the stored choice (or `fallback` if absent or unrecognised).
    pub fn new(store: S, key: impl Into<String>, fallback: ThemeChoice) -> Self {
        let key = key.into();
        let choice = match store.load(&key) {
            Some(stored) => stored.parse().unwrap_or_else(|e: UnknownTheme| {
                log::warn!("ignoring stored theme: {e}");
                fallback
            }),
            None => fallback,
        };
        Self { store, key, choice }
    }

    /// Current choice.
    pub const fn choice(&self) -> ThemeChoice {
        self.choice
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Apply the current choice (used once at construction).
    pub fn apply_current(&mut self, os: ResolvedTheme) -> AppliedTheme {
        self.select(self.choice, os)
    }

    /// Switch to `choice`, persist it and return what to display.
    pub fn select(&mut self, choice: ThemeChoice, os: ResolvedTheme) -> AppliedTheme {
        self.choice = choice;
        if let Err(e) = self.store.save(&self.key, choice.as_str()) {
            log::warn!("failed to persist theme {choice}: {e}");
        }
        let applied = AppliedTheme {
            choice,
            resolved: choice.resolve(os),
        };
        log::info!("theme {choice} -> {}", applied.resolved.class_name());
        applied
    }

    /// OS preference changed. Re-applies only while `system` is chosen.
    pub fn on_system_change(&mut self, os: ResolvedTheme) -> Option<AppliedTheme> {
        (self.choice == ThemeChoice::System).then(|| self.select(ThemeChoice::System, os))
    }
}
