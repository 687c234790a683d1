//! State management for page components.
//!
//! Components follow the Elm Architecture: `State + Message → (State,
//! Command)`. State transitions are pure; every side effect (sending, timers,
//! touching the input field) comes back as a [`Command`] for the host to run.
//!
//! # Examples
//!
//! ```
//! use meadow_core::{Command, State};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct Clicks {
//!     count: u32,
//! }
//!
//! impl State for Clicks {
//!     type Message = ();
//!
//!     fn update(&mut self, (): ()) -> Command<()> {
//!         self.count += 1;
//!         Command::None
//!     }
//! }
//!
//! let mut clicks = Clicks::default();
//! clicks.update(());
//! assert_eq!(clicks.count, 1);
//! ```

use crate::transport::SendError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Component state trait.
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects the host must perform.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}

/// Side effects requested by a state update.
#[derive(Debug, Default)]
pub enum Command<M> {
    /// No command
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Command<M>>),
    /// Deliver a message, then report back
    Send {
        /// Message text
        text: String,
        /// Builds the completion message
        on_done: fn(Result<(), SendError>) -> M,
    },
    /// Clear the message input field
    ClearInput,
    /// Dispatch `message` after `delay`
    After {
        /// Timer length
        delay: Duration,
        /// Message to dispatch
        message: M,
    },
}

impl<M> Command<M> {
    /// Create a batch of commands.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        Self::Batch(commands.into_iter().collect())
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten batches into a list of effects, dropping `None`s.
    pub fn into_effects(self) -> Vec<Self> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::None => {}
            Self::Batch(commands) => {
                for command in commands {
                    command.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}
