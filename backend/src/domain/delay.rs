//! Relative delivery delays and the absolute times they resolve to.

use chrono::{DateTime, TimeDelta, Utc};

use super::DispatchError;

/// Non-negative delay, in whole seconds, before a dispatch is delivered.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use relay::domain::DeliveryDelay;
///
/// let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("valid time");
/// let delay = DeliveryDelay::from_seconds(30).expect("non-negative");
/// let at = delay.schedule_from(now).expect("in range");
/// assert_eq!((at - now).num_seconds(), 30);
/// assert!(DeliveryDelay::from_seconds(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DeliveryDelay(i64);

impl DeliveryDelay {
    /// No delay: deliver immediately.
    pub const IMMEDIATE: Self = Self(0);

    /// Validate a caller-supplied delay.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidDelay`] when `seconds` is negative.
    pub fn from_seconds(seconds: i64) -> Result<Self, DispatchError> {
        if seconds < 0 {
            return Err(DispatchError::invalid_delay(format!(
                "delay must be non-negative, got {seconds}s"
            )));
        }
        Ok(Self(seconds))
    }

    /// Delay in seconds.
    pub fn as_seconds(self) -> i64 {
        self.0
    }

    /// Whether the dispatch should be delivered without scheduling.
    pub fn is_immediate(self) -> bool {
        self.0 == 0
    }

    /// Absolute time `now + delay`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidDelay`] when the sum overflows the
    /// representable time range.
    pub fn schedule_from(self, now: DateTime<Utc>) -> Result<DateTime<Utc>, DispatchError> {
        TimeDelta::try_seconds(self.0)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or_else(|| {
                DispatchError::invalid_delay(format!("delay of {}s is out of range", self.0))
            })
    }

    /// Future delivery time for the topic path: `None` when immediate.
    ///
    /// # Errors
    ///
    /// Propagates [`DeliveryDelay::schedule_from`] range failures.
    pub fn deliver_at(self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, DispatchError> {
        if self.is_immediate() {
            return Ok(None);
        }
        self.schedule_from(now).map(Some)
    }
}
