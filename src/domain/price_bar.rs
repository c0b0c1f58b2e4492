//! OHLC price bar representation.

use chrono::NaiveDateTime;

#[derive(Debug, Clone)]
pub struct PriceBar {
    pub ticker: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn bar_fields() {
        let bar = PriceBar {
            ticker: "GOLDBEES.NS".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000,
        };
        assert_eq!(bar.ticker, "GOLDBEES.NS");
        assert!((bar.close - 105.0).abs() < f64::EPSILON);
        assert_eq!(bar.volume, 50_000);
    }
}
