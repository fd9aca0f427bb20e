use crate::types::{PricePoint, Signal};

/// EMA-crossover signal generator.
///
/// Maintains a fast and a slow exponential moving average (recursive form,
/// `alpha = 2 / (span + 1)`, seeded at the first price) and emits an
/// `Enter` when the fast EMA crosses above the slow one, an `Exit` when it
/// crosses back below, and `Hold` otherwise. The first element is always
/// `Hold` since there is no prior regime to compare against.
#[derive(Debug, Clone, Copy)]
pub struct EmaCrossover {
    fast_span: usize,
    slow_span: usize,
}

impl EmaCrossover {
    pub fn new(fast_span: usize, slow_span: usize) -> Result<Self, String> {
        if fast_span == 0 || slow_span == 0 {
            return Err("ema spans must be at least 1".to_string());
        }
        Ok(Self {
            fast_span,
            slow_span,
        })
    }

    pub fn signals(&self, prices: &[PricePoint]) -> Vec<Signal> {
        let fast_alpha = 2.0 / (self.fast_span as f64 + 1.0);
        let slow_alpha = 2.0 / (self.slow_span as f64 + 1.0);

        let mut signals = Vec::with_capacity(prices.len());
        let mut fast_ema = 0.0_f64;
        let mut slow_ema = 0.0_f64;
        let mut prev_regime: Option<bool> = None;

        for (idx, point) in prices.iter().enumerate() {
            if idx == 0 {
                fast_ema = point.price;
                slow_ema = point.price;
            } else {
                fast_ema = fast_alpha * point.price + (1.0 - fast_alpha) * fast_ema;
                slow_ema = slow_alpha * point.price + (1.0 - slow_alpha) * slow_ema;
            }

            let regime = fast_ema > slow_ema;
            let signal = match prev_regime {
                Some(prev) if regime && !prev => Signal::Enter,
                Some(prev) if !regime && prev => Signal::Exit,
                _ => Signal::Hold,
            };
            prev_regime = Some(regime);
            signals.push(signal);
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::EmaCrossover;
    use crate::types::{PricePoint, Signal};

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .copied()
            .enumerate()
            .map(|(idx, price)| PricePoint {
                timestamp: idx as i64,
                price,
            })
            .collect()
    }

    #[test]
    fn rejects_zero_spans() {
        assert!(EmaCrossover::new(0, 20).is_err());
        assert!(EmaCrossover::new(10, 0).is_err());
    }

    #[test]
    fn output_is_aligned_and_starts_with_hold() {
        let generator = EmaCrossover::new(2, 4).expect("generator");
        let prices = points(&[10.0, 10.5, 11.0, 10.0, 9.0]);
        let signals = generator.signals(&prices);
        assert_eq!(signals.len(), prices.len());
        assert_eq!(signals[0], Signal::Hold);
    }

    #[test]
    fn uptrend_then_downtrend_emits_one_round_trip() {
        let generator = EmaCrossover::new(2, 6).expect("generator");
        let prices = points(&[
            10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 18.0, 16.0, 12.0, 8.0, 6.0, 5.0,
        ]);
        let signals = generator.signals(&prices);

        let enters = signals.iter().filter(|s| **s == Signal::Enter).count();
        let exits = signals.iter().filter(|s| **s == Signal::Exit).count();
        assert_eq!(enters, 1);
        assert_eq!(exits, 1);

        let enter_idx = signals.iter().position(|s| *s == Signal::Enter);
        let exit_idx = signals.iter().position(|s| *s == Signal::Exit);
        assert!(enter_idx < exit_idx);
    }

    #[test]
    fn flat_series_never_signals() {
        let generator = EmaCrossover::new(3, 9).expect("generator");
        let signals = generator.signals(&points(&[10.0; 20]));
        assert!(signals.iter().all(|s| *s == Signal::Hold));
    }
}
