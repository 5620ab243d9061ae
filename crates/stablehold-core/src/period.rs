//! Time-of-day classification.
//!
//! Every hour of the day maps to exactly one [`TimePeriod`] after the instant
//! is converted into the reference timezone (US Eastern by default):
//!
//! | hours      | period  |
//! |------------|---------|
//! | 05..11     | Morning |
//! | 11..18     | Day     |
//! | 18         | Sunset  |
//! | otherwise  | Night   |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// IANA identifier of the reference timezone.
pub const REFERENCE_TIMEZONE: &str = "America/New_York";

/// Named window of the day used to pick a matching background catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Morning,
    Day,
    Sunset,
    Night,
}

/// Colour theme the site renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Emerald,
    Sunset,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Morning,
        TimePeriod::Day,
        TimePeriod::Sunset,
        TimePeriod::Night,
    ];

    /// Map an hour (0-23, 24-hour clock) onto its period.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=10 => TimePeriod::Morning,
            11..=17 => TimePeriod::Day,
            18 => TimePeriod::Sunset,
            _ => TimePeriod::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Morning => "morning",
            TimePeriod::Day => "day",
            TimePeriod::Sunset => "sunset",
            TimePeriod::Night => "night",
        }
    }

    /// Only the sunset hour switches the site to the amber theme.
    pub fn theme(&self) -> Theme {
        match self {
            TimePeriod::Sunset => Theme::Sunset,
            _ => Theme::Emerald,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(TimePeriod::Morning),
            "day" => Ok(TimePeriod::Day),
            "sunset" => Ok(TimePeriod::Sunset),
            "night" => Ok(TimePeriod::Night),
            other => Err(CoreError::InvalidInput(format!("unknown time period '{other}'"))),
        }
    }
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Emerald => "emerald",
            Theme::Sunset => "sunset",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emerald" => Ok(Theme::Emerald),
            "sunset" => Ok(Theme::Sunset),
            other => Err(CoreError::InvalidInput(format!("unknown theme '{other}'"))),
        }
    }
}

/// Resolve an IANA timezone identifier against the bundled tz database.
pub fn resolve_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::UnsupportedTimezone(name.to_string()))
}

/// Classify `instant` by its hour in `timezone`.
///
/// # Errors
///
/// Returns [`CoreError::UnsupportedTimezone`] if `timezone` is not a known
/// IANA identifier.
pub fn classify(instant: DateTime<Utc>, timezone: &str) -> Result<TimePeriod> {
    let tz = resolve_timezone(timezone)?;
    Ok(classify_in(instant, tz))
}

/// Classify with an already-resolved timezone.
pub fn classify_in(instant: DateTime<Utc>, tz: Tz) -> TimePeriod {
    let hour = instant.with_timezone(&tz).hour();
    let period = TimePeriod::from_hour(hour);
    tracing::debug!(%instant, timezone = %tz, hour, %period, "classified time period");
    period
}
