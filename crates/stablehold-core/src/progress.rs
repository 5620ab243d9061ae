//! Launch progress.
//!
//! Progress starts at a fixed base percentage on the epoch date and rises by
//! one point per calendar day in the reference timezone, capped at 100.
//! The current instant is always passed in; nothing here reads the clock.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::period::{resolve_timezone, REFERENCE_TIMEZONE};

/// Upper bound of the percentage scale.
pub const MAX_PERCENT: u8 = 100;

/// Colour band the progress meter renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    Low,
    Medium,
    High,
}

impl ProgressBand {
    pub fn for_percent(percent: u8) -> Self {
        if percent < 30 {
            ProgressBand::Low
        } else if percent < 70 {
            ProgressBand::Medium
        } else {
            ProgressBand::High
        }
    }
}

/// What the widget shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub percent: u8,
    pub days_elapsed: i64,
    pub remaining: u8,
    pub band: ProgressBand,
    pub as_of: NaiveDate,
}

/// Where counting starts and from which value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSettings {
    #[serde(default = "default_epoch")]
    pub epoch: NaiveDate,
    #[serde(default = "default_base_offset")]
    pub base_offset: u8,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).unwrap_or_default()
}

fn default_base_offset() -> u8 {
    20
}

fn default_timezone() -> String {
    REFERENCE_TIMEZONE.to_string()
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            base_offset: default_base_offset(),
            timezone: default_timezone(),
        }
    }
}

impl ProgressSettings {
    /// The epoch as an instant: local midnight in the configured timezone.
    pub fn epoch_instant(&self) -> Result<DateTime<Utc>> {
        let tz = resolve_timezone(&self.timezone)?;
        local_midnight(self.epoch, tz)
    }

    /// Build the widget report for `now`.
    pub fn report(&self, now: DateTime<Utc>) -> Result<ProgressReport> {
        let tz = resolve_timezone(&self.timezone)?;
        let epoch = local_midnight(self.epoch, tz)?;
        let percent = compute_progress(epoch, now, self.base_offset, tz)?;
        Ok(ProgressReport {
            percent,
            days_elapsed: days_elapsed(epoch, now, tz),
            remaining: MAX_PERCENT - percent,
            band: ProgressBand::for_percent(percent),
            as_of: now.with_timezone(&tz).date_naive(),
        })
    }
}

/// Whole calendar days between `epoch` and `now`, both taken as dates in `tz`.
/// Negative when `now` precedes `epoch`.
pub fn days_elapsed(epoch: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> i64 {
    let start = epoch.with_timezone(&tz).date_naive();
    let end = now.with_timezone(&tz).date_naive();
    (end - start).num_days()
}

/// Progress percentage for `now`: `min(100, base_offset + max(0, days_elapsed))`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if `base_offset` exceeds 100.
pub fn compute_progress(
    epoch: DateTime<Utc>,
    now: DateTime<Utc>,
    base_offset: u8,
    tz: Tz,
) -> Result<u8> {
    if base_offset > MAX_PERCENT {
        return Err(CoreError::InvalidInput(format!(
            "base offset {base_offset} exceeds {MAX_PERCENT}"
        )));
    }

    let elapsed = days_elapsed(epoch, now, tz).max(0);
    let percent = (i64::from(base_offset) + elapsed).min(i64::from(MAX_PERCENT));
    Ok(percent as u8)
}

/// Parse an RFC 3339 instant or a bare `YYYY-MM-DD` date.
///
/// Bare dates mean local midnight in `tz`.
pub fn parse_instant(text: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(instant.with_timezone(&Utc));
    }
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => local_midnight(date, tz),
        Err(_) => Err(CoreError::InvalidInput(format!(
            "'{text}' is not an RFC 3339 instant or YYYY-MM-DD date"
        ))),
    }
}

fn local_midnight(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CoreError::InvalidInput(format!("{date} has no midnight in {tz}")))
}
