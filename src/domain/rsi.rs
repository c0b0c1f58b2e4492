//! RSI (Relative Strength Index) over a close-price series.
//!
//! Uses Wilder's smoothing for average gain/loss calculation:
//! - First average: simple mean of gains/losses over the first `length` changes
//! - Subsequent: avg = (prev_avg * (length-1) + current) / length
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: the first `length` values are `None` (need `length` price changes
//! to seed the initial averages).

/// RSI series aligned with `closes`; warmup entries are `None`.
pub fn rsi(closes: &[f64], length: usize) -> Vec<Option<f64>> {
    if length == 0 || closes.len() < 2 {
        return vec![None; closes.len()];
    }

    let mut gains: Vec<f64> = Vec::new();
    let mut losses: Vec<f64> = Vec::new();
    for i in 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let mut values = Vec::with_capacity(closes.len());
    values.push(None);

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for i in 1..closes.len() {
        let change_idx = i - 1;

        if change_idx < length - 1 {
            values.push(None);
        } else if change_idx == length - 1 {
            avg_gain = gains[..length].iter().sum::<f64>() / length as f64;
            avg_loss = losses[..length].iter().sum::<f64>() / length as f64;
            values.push(Some(rsi_from_averages(avg_gain, avg_loss)));
        } else {
            avg_gain = (avg_gain * (length - 1) as f64 + gains[change_idx]) / length as f64;
            avg_loss = (avg_loss * (length - 1) as f64 + losses[change_idx]) / length as f64;
            values.push(Some(rsi_from_averages(avg_gain, avg_loss)));
        }
    }

    values
}

/// Most recent valid RSI value, if the series is long enough.
pub fn latest_rsi(closes: &[f64], length: usize) -> Option<f64> {
    rsi(closes, length).last().copied().flatten()
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_series() {
        let values = rsi(&[], 14);
        assert!(values.is_empty());
    }

    #[test]
    fn rsi_single_close() {
        let values = rsi(&[100.0], 14);
        assert_eq!(values, vec![None]);
    }

    #[test]
    fn rsi_zero_length() {
        let values = rsi(&[100.0, 101.0], 0);
        assert_eq!(values, vec![None, None]);
    }

    #[test]
    fn rsi_warmup_period() {
        let closes: Vec<f64> = (1..=15).map(|i| 100.0 + (i as f64 % 5.0) * 2.0).collect();
        let values = rsi(&closes, 14);

        assert_eq!(values.len(), 15);
        for i in 0..14 {
            assert!(values[i].is_none(), "value {} should be warmup", i);
        }
        assert!(values[14].is_some(), "value 14 should be valid");
    }

    #[test]
    fn rsi_all_gains_no_losses() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let last = rsi(&closes, 14)[14].unwrap();
        assert!(
            (last - 100.0).abs() < f64::EPSILON,
            "RSI should be 100 when all gains"
        );
    }

    #[test]
    fn rsi_all_losses_no_gains() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
        let last = rsi(&closes, 14)[14].unwrap();
        assert!((last - 0.0).abs() < f64::EPSILON, "RSI should be 0 when all losses");
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (1..=20)
            .map(|i| 100.0 + (i as f64 % 7.0 - 3.0) * 2.0)
            .collect();

        for value in rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI {} out of range", value);
        }
    }

    #[test]
    fn rsi_known_calculation() {
        let closes = vec![
            44.0, 44.25, 44.50, 43.75, 44.50, 44.25, 44.75, 45.25, 45.50, 45.25, 45.50, 46.0,
            46.25, 46.0, 46.50,
        ];
        let last = rsi(&closes, 14)[14].unwrap();
        assert!(
            last > 50.0 && last < 100.0,
            "RSI should be in bullish territory, got {}",
            last
        );
    }

    #[test]
    fn latest_rsi_matches_last_value() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i as f64 * 0.7).sin()).collect();
        let series = rsi(&closes, 14);
        assert_eq!(latest_rsi(&closes, 14), *series.last().unwrap());
    }

    #[test]
    fn latest_rsi_none_during_warmup() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        assert_eq!(latest_rsi(&closes, 14), None);
    }
}
