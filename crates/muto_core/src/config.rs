//! Reminder timing and category settings.
//!
//! # Responsibility
//! - Hold the tunables the reminder coordinator reads at dispatch time.
//! - Accept host-provided JSON overrides with per-field defaults.
//!
//! # Invariants
//! - Delays are strictly positive after `validate()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_COMPLETION_DELAY_SECS: u32 = 1;
/// Category identifier attached to scheduled task reminders.
pub const DEFAULT_REMINDER_CATEGORY: &str = "TASK_REMINDER";

/// Coordinator settings; missing JSON fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    /// Delay before the "task completed" alert is shown.
    pub completion_delay_secs: u32,
    pub category_id: String,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            completion_delay_secs: DEFAULT_COMPLETION_DELAY_SECS,
            category_id: DEFAULT_REMINDER_CATEGORY.to_string(),
        }
    }
}

impl ReminderSettings {
    /// Parses and validates settings from a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(raw).map_err(|err| SettingsError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.completion_delay_secs == 0 {
            return Err(SettingsError::ZeroDelay("completion_delay_secs"));
        }
        if self.category_id.trim().is_empty() {
            return Err(SettingsError::EmptyCategory);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    Parse(String),
    ZeroDelay(&'static str),
    EmptyCategory,
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "invalid reminder settings json: {details}"),
            Self::ZeroDelay(field) => write!(f, "reminder setting `{field}` must be positive"),
            Self::EmptyCategory => write!(f, "reminder category id must not be empty"),
        }
    }
}

impl Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::{ReminderSettings, SettingsError};

    #[test]
    fn defaults_match_reminder_behavior() {
        let settings = ReminderSettings::default();
        assert_eq!(settings.completion_delay_secs, 1);
        assert_eq!(settings.category_id, "TASK_REMINDER");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let settings =
            ReminderSettings::from_json(r#"{"completion_delay_secs": 5}"#).expect("valid json");
        assert_eq!(settings.completion_delay_secs, 5);
        assert_eq!(settings.category_id, "TASK_REMINDER");
    }

    #[test]
    fn from_json_ignores_unknown_fields() {
        let settings =
            ReminderSettings::from_json(r#"{"remind_later_minutes": 10}"#).expect("valid json");
        assert_eq!(settings, ReminderSettings::default());
    }

    #[test]
    fn from_json_rejects_zero_delay() {
        let err = ReminderSettings::from_json(r#"{"completion_delay_secs": 0}"#)
            .expect_err("zero delay must fail");
        assert_eq!(err, SettingsError::ZeroDelay("completion_delay_secs"));
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = ReminderSettings::from_json("{not json").expect_err("malformed json");
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
