//! Profile helpers shared by the signup flows.

use chrono::{SecondsFormat, Utc};

/// Split a provider display name into first and last name.
///
/// Splits on single spaces and keeps the first two tokens; a missing token
/// becomes an empty string.
pub fn split_display_name(display_name: &str) -> (String, String) {
    let mut parts = display_name.split(' ');
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.next().unwrap_or_default().to_string();
    (first, last)
}

/// Current UTC time as ISO-8601 with millisecond precision.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A single password rule shown under the password field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub label: &'static str,
    pub met: bool,
}

/// Advisory password checklist. Submission is not gated on it; the
/// provider enforces its own policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digit: bool,
}

impl PasswordRequirements {
    pub const MIN_LENGTH: usize = 8;

    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= Self::MIN_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            digit: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    pub fn all_met(&self) -> bool {
        self.min_length && self.uppercase && self.lowercase && self.digit
    }

    pub fn items(&self) -> [Requirement; 4] {
        [
            Requirement {
                label: "At least 8 characters",
                met: self.min_length,
            },
            Requirement {
                label: "Contains uppercase letter",
                met: self.uppercase,
            },
            Requirement {
                label: "Contains lowercase letter",
                met: self.lowercase,
            },
            Requirement {
                label: "Contains number",
                met: self.digit,
            },
        ]
    }
}
