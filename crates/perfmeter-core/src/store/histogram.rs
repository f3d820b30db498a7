use parking_lot::RwLock;

// Fixed buckets in seconds
// 1ms, 10ms, 100ms, 1s, 10s, 1m, 5m, 10m
pub const BUCKET_BOUNDS: [f64; 8] = [0.001, 0.01, 0.1, 1.0, 10.0, 60.0, 300.0, 600.0];

#[derive(Debug, Default)]
struct HistogramState {
    buckets: [u64; BUCKET_BOUNDS.len()],
    count: u64,
    sum: f64,
}

/// Bucketed distribution with running count and sum.
///
/// Buckets are first-match, not cumulative: an observation increments only
/// the smallest bound it fits under. Observations above the last bound land
/// in no bucket but are still counted and summed, so the bucket total can
/// be lower than `count`.
#[derive(Debug, Default)]
pub struct Histogram {
    state: RwLock<HistogramState>,
}

impl Histogram {
    pub fn record(&self, value: f64) {
        let mut state = self.state.write();
        if let Some(i) = BUCKET_BOUNDS.iter().position(|&bound| value <= bound) {
            state.buckets[i] += 1;
        }
        state.count += 1;
        state.sum += value;
    }

    /// `sum / count`, or 0 with no observations.
    pub fn average(&self) -> f64 {
        let state = self.state.read();
        if state.count == 0 {
            return 0.0;
        }
        state.sum / state.count as f64
    }

    pub fn count(&self) -> u64 {
        self.state.read().count
    }

    pub fn sum(&self) -> f64 {
        self.state.read().sum
    }

    /// Consistent copy of the whole distribution.
    pub fn snapshot(&self) -> HistogramSnapshot {
        let state = self.state.read();
        HistogramSnapshot {
            buckets: state.buckets,
            count: state.count,
            sum: state.sum,
        }
    }
}

/// Point-in-time view of a [`Histogram`]. `buckets[i]` pairs with `BUCKET_BOUNDS[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistogramSnapshot {
    pub buckets: [u64; BUCKET_BOUNDS.len()],
    pub count: u64,
    pub sum: f64,
}

impl HistogramSnapshot {
    /// Count for the bucket with upper bound `bound`, if it is one of `BUCKET_BOUNDS`.
    pub fn bucket(&self, bound: f64) -> Option<u64> {
        BUCKET_BOUNDS
            .iter()
            .position(|&b| b == bound)
            .map(|i| self.buckets[i])
    }

    /// Observations that landed in some bucket.
    pub fn bucketed(&self) -> u64 {
        self.buckets.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}
