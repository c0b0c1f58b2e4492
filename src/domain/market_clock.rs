//! Market-close gate for the daily P&L run.
//!
//! The market counts as closed on a weekday once exchange-local time reaches
//! the cutoff. Weekends never close (there is no session to reconcile), so
//! the daily P&L row is only written Monday through Friday.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::domain::error::RsitraderError;
use crate::ports::config_port::ConfigPort;

const DEFAULT_CUTOFF: &str = "15:15";
const DEFAULT_UTC_OFFSET_MINUTES: i64 = 330;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketClock {
    offset: FixedOffset,
    cutoff: NaiveTime,
}

impl MarketClock {
    pub fn new(offset: FixedOffset, cutoff: NaiveTime) -> Self {
        MarketClock { offset, cutoff }
    }

    /// Build from `[clock]` config: `cutoff` as HH:MM and
    /// `utc_offset_minutes` for the exchange timezone.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, RsitraderError> {
        let cutoff_str = config
            .get_string("clock", "cutoff")
            .unwrap_or_else(|| DEFAULT_CUTOFF.to_string());
        let cutoff = NaiveTime::parse_from_str(&cutoff_str, "%H:%M").map_err(|_| {
            RsitraderError::ConfigInvalid {
                section: "clock".into(),
                key: "cutoff".into(),
                reason: "invalid time format (expected HH:MM)".into(),
            }
        })?;

        let minutes = config.get_int("clock", "utc_offset_minutes", DEFAULT_UTC_OFFSET_MINUTES);
        let offset = i32::try_from(minutes * 60)
            .ok()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| RsitraderError::ConfigInvalid {
                section: "clock".into(),
                key: "utc_offset_minutes".into(),
                reason: "offset out of range".into(),
            })?;

        Ok(MarketClock::new(offset, cutoff))
    }

    pub fn is_market_closed_at(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.offset);
        let weekday = local.weekday().num_days_from_monday() <= 4;
        weekday && local.time() >= self.cutoff
    }

    pub fn is_market_closed(&self) -> bool {
        self.is_market_closed_at(Utc::now())
    }

    pub fn local_date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Today's date in exchange-local time; used to stamp the P&L row.
    pub fn today(&self) -> NaiveDate {
        self.local_date_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist_clock() -> MarketClock {
        MarketClock::new(
            FixedOffset::east_opt(330 * 60).unwrap(),
            NaiveTime::from_hms_opt(15, 15, 0).unwrap(),
        )
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn weekday_past_cutoff_is_closed() {
        // 2024-01-17 is a Wednesday; 09:45 UTC = 15:15 IST
        assert!(ist_clock().is_market_closed_at(utc(2024, 1, 17, 9, 45)));
        assert!(ist_clock().is_market_closed_at(utc(2024, 1, 17, 12, 0)));
    }

    #[test]
    fn weekday_before_cutoff_is_open() {
        // 09:44 UTC = 15:14 IST
        assert!(!ist_clock().is_market_closed_at(utc(2024, 1, 17, 9, 44)));
        assert!(!ist_clock().is_market_closed_at(utc(2024, 1, 17, 4, 0)));
    }

    #[test]
    fn weekend_never_closes() {
        // 2024-01-20 is a Saturday, 2024-01-21 a Sunday
        assert!(!ist_clock().is_market_closed_at(utc(2024, 1, 20, 12, 0)));
        assert!(!ist_clock().is_market_closed_at(utc(2024, 1, 21, 12, 0)));
    }

    #[test]
    fn gate_respects_exchange_timezone_day_boundary() {
        // Friday 20:00 UTC is already Saturday 01:30 IST → weekend, open
        assert!(!ist_clock().is_market_closed_at(utc(2024, 1, 19, 20, 0)));
        // Friday 10:00 UTC is Friday 15:30 IST → closed
        assert!(ist_clock().is_market_closed_at(utc(2024, 1, 19, 10, 0)));
    }

    #[test]
    fn local_date_follows_offset() {
        // 2024-01-17 22:00 UTC is 2024-01-18 03:30 IST
        let date = ist_clock().local_date_at(utc(2024, 1, 17, 22, 0));
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 18).unwrap());
    }
}
