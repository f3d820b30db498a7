use parking_lot::RwLock;

/// Cumulative, non-decreasing value.
#[derive(Debug, Default)]
pub struct Counter {
    value: RwLock<f64>,
}

impl Counter {
    /// Add `amount` under the counter's lock.
    ///
    /// Negative and non-finite amounts are rejected so the value never
    /// decreases. Returns whether the amount was applied.
    pub fn add(&self, amount: f64) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            return false;
        }
        *self.value.write() += amount;
        true
    }

    pub fn value(&self) -> f64 {
        *self.value.read()
    }
}
