use parking_lot::RwLock;

/// Last-set instantaneous value.
#[derive(Debug, Default)]
pub struct Gauge {
    value: RwLock<f64>,
}

impl Gauge {
    /// Overwrite the value.
    pub fn set(&self, value: f64) {
        *self.value.write() = value;
    }

    pub fn value(&self) -> f64 {
        *self.value.read()
    }
}
