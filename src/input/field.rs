//! Numeric field state owned by a calculator instance

use std::time::Duration;

use super::normalizer::{normalize, Normalized};
use super::AUTO_CLEAR_DELAY;
use crate::error::FieldError;
use crate::format::format_number;
use crate::instruments::{FieldConfig, FieldId};

/// One user-adjustable quantity
///
/// `value` stays within `[min, max]` except while the user is typing a
/// number that is still below `min`; the engine floors such values itself.
#[derive(Debug, Clone)]
pub struct NumericField {
    id: FieldId,
    config: FieldConfig,

    /// Text as shown in the input box
    raw_text: String,

    value: f64,

    error: Option<FieldError>,

    /// Logical time at which `error` clears itself, if scheduled
    clear_deadline: Option<Duration>,

    focused: bool,
}

impl NumericField {
    /// Create a field holding its configured default
    pub fn new(id: FieldId, config: FieldConfig) -> Self {
        let value = config.default;
        Self {
            id,
            raw_text: format_number(value),
            value,
            config,
            error: None,
            clear_deadline: None,
            focused: false,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Message to show under the input box, if any
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn clear_deadline(&self) -> Option<Duration> {
        self.clear_deadline
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Apply a keystroke edit at logical time `now`
    ///
    /// Returns `false` when the edit was rejected and nothing changed.
    pub fn apply_text(&mut self, raw: &str, now: Duration) -> bool {
        match normalize(raw, &self.config) {
            Normalized::Rejected => {
                log::debug!("{}: rejected edit {:?}", self.id, raw);
                false
            }
            Normalized::Accepted { text, value, error } => {
                log::debug!("{}: {:?} -> {} ({:?})", self.id, raw, value, error);
                // A newer edit always supersedes a pending clear
                self.clear_deadline = match &error {
                    Some(e) if e.is_self_clearing() => Some(now + AUTO_CLEAR_DELAY),
                    _ => None,
                };
                self.raw_text = text;
                self.value = value;
                self.error = error;
                true
            }
        }
    }

    /// Apply a slider drag; always lands on a step and clears any message
    pub fn apply_slider(&mut self, value: f64) {
        let snapped = self.config.snap(value);
        self.value = snapped;
        self.raw_text = format_number(snapped);
        self.error = None;
        self.clear_deadline = None;
    }

    /// Fire the pending clear if its deadline has passed
    ///
    /// Returns `true` when a message was cleared.
    pub fn fire_due_clear(&mut self, now: Duration) -> bool {
        match self.clear_deadline {
            Some(deadline) if now >= deadline => {
                self.clear_deadline = None;
                self.error = None;
                log::debug!("{}: auto-cleared message", self.id);
                true
            }
            _ => false,
        }
    }

    /// Drop any pending clear without touching the message
    pub fn cancel_pending_clear(&mut self) {
        self.clear_deadline = None;
    }
}
