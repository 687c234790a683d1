//! Contact form state machine.
//!
//! ```text
//! idle --submit(non-empty)--> sending --ok--> sent --hide--> idle
//!   |                            |
//!   +--submit(empty): error      +--err--> failed --hide--> idle
//!      banner, stays idle
//! ```
//!
//! While a send is in flight (and, after a success, until the release timer
//! fires) the submit control is busy and further submissions are ignored.
//! Every banner schedules its own hide; a hide only applies to the banner
//! that scheduled it.

use crate::state::{Command, State};
use crate::transport::SendError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Banner text for an empty submission.
pub const EMPTY_MESSAGE_TEXT: &str = "Please enter a message";
/// Banner text after a successful send.
pub const SUCCESS_TEXT: &str = "Message sent successfully! We'll get back to you soon.";
/// Banner text after a failed send.
pub const FAILURE_TEXT: &str = "Failed to send message. Please try again.";
/// Submit label when idle.
pub const IDLE_LABEL: &str = "Send Message";
/// Submit label while busy.
pub const BUSY_LABEL: &str = "Sending...";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormPhase {
    /// Accepting input
    #[default]
    Idle,
    /// Send in flight
    Sending,
    /// Success banner showing
    Sent,
    /// Error banner showing
    Failed,
}

/// Banner severity, doubles as CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Positive outcome
    Success,
    /// Validation or delivery problem
    Error,
}

impl Severity {
    /// CSS class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    /// Text content
    pub text: String,
    /// Severity class
    pub severity: Severity,
    /// Whether the `show` class is set
    pub visible: bool,
}

impl Banner {
    /// Class list for the banner element.
    #[must_use]
    pub fn class_name(&self) -> String {
        if self.visible {
            format!("form-message show {}", self.severity)
        } else {
            format!("form-message {}", self.severity)
        }
    }
}

/// Submit button presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmitControl {
    busy: bool,
}

impl SubmitControl {
    /// Button `disabled` attribute.
    #[must_use]
    pub const fn disabled(&self) -> bool {
        self.busy
    }

    /// Whether the spinner is displayed.
    #[must_use]
    pub const fn spinner_visible(&self) -> bool {
        self.busy
    }

    /// Button label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.busy {
            BUSY_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// CSS `display` value for the spinner.
    #[must_use]
    pub const fn spinner_display(&self) -> &'static str {
        if self.busy {
            "block"
        } else {
            "none"
        }
    }
}

/// Fixed form delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTimings {
    /// Delay before the control is re-enabled after a success
    pub release_delay: Duration,
    /// How long a banner stays visible
    pub message_ttl: Duration,
}

impl Default for FormTimings {
    fn default() -> Self {
        Self {
            release_delay: Duration::from_secs(2),
            message_ttl: Duration::from_secs(5),
        }
    }
}

/// Form events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// User submitted the form with the raw input value
    Submit(String),
    /// The send finished
    SendFinished(Result<(), SendError>),
    /// Release timer fired
    ReleaseControl,
    /// Banner timer fired for banner `generation`
    HideBanner(u64),
}

fn send_finished(result: Result<(), SendError>) -> FormEvent {
    FormEvent::SendFinished(result)
}

/// Contact form state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormState {
    phase: FormPhase,
    control: SubmitControl,
    banner: Option<Banner>,
    generation: u64,
    timings: FormTimings,
}

impl FormState {
    /// Idle form with the given delays.
    #[must_use]
    pub fn new(timings: FormTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Submit control presentation.
    #[must_use]
    pub const fn control(&self) -> SubmitControl {
        self.control
    }

    /// Current banner, visible or not.
    #[must_use]
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// True if a banner is currently shown.
    #[must_use]
    pub fn banner_visible(&self) -> bool {
        self.banner.as_ref().is_some_and(|b| b.visible)
    }

    fn show(&mut self, text: &str, severity: Severity) -> Command<FormEvent> {
        self.generation += 1;
        self.banner = Some(Banner {
            text: text.to_string(),
            severity,
            visible: true,
        });
        Command::After {
            delay: self.timings.message_ttl,
            message: FormEvent::HideBanner(self.generation),
        }
    }

    fn hide(&mut self) {
        if let Some(banner) = &mut self.banner {
            banner.visible = false;
        }
    }
}

impl State for FormState {
    type Message = FormEvent;

    fn update(&mut self, msg: FormEvent) -> Command<FormEvent> {
        match msg {
            FormEvent::Submit(raw) => {
                if self.control.busy {
                    log::debug!("submit ignored while busy");
                    return Command::None;
                }
                let text = raw.trim();
                if text.is_empty() {
                    return self.show(EMPTY_MESSAGE_TEXT, Severity::Error);
                }
                self.phase = FormPhase::Sending;
                self.control.busy = true;
                self.hide();
                log::debug!("form: sending {} bytes", text.len());
                Command::Send {
                    text: text.to_string(),
                    on_done: send_finished,
                }
            }
            FormEvent::SendFinished(Ok(())) => {
                self.phase = FormPhase::Sent;
                let hide = self.show(SUCCESS_TEXT, Severity::Success);
                Command::batch([
                    Command::ClearInput,
                    hide,
                    Command::After {
                        delay: self.timings.release_delay,
                        message: FormEvent::ReleaseControl,
                    },
                ])
            }
            FormEvent::SendFinished(Err(e)) => {
                log::error!("error sending message: {e}");
                self.phase = FormPhase::Failed;
                self.control.busy = false;
                self.show(FAILURE_TEXT, Severity::Error)
            }
            FormEvent::ReleaseControl => {
                self.control.busy = false;
                Command::None
            }
            FormEvent::HideBanner(generation) => {
                if generation == self.generation {
                    self.hide();
                    if matches!(self.phase, FormPhase::Sent | FormPhase::Failed) {
                        self.phase = FormPhase::Idle;
                    }
                }
                Command::None
            }
        }
    }
}
