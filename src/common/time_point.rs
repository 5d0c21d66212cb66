pub const F64_MARGIN: f64 = 0.000000001;

pub type Timestamp = f64;
pub type Value = f64;

/// One record of a series: a time and a kilobyte count.
#[derive(Clone, Copy, Debug)]
pub struct TimePoint {
    pub timestamp: Timestamp,
    pub value: Value,
}

impl TimePoint {
    pub fn new(timestamp: Timestamp, value: Value) -> TimePoint {
        TimePoint { timestamp, value }
    }

    pub fn is_finite(&self) -> bool {
        self.timestamp.is_finite() && self.value.is_finite()
    }
}

impl PartialEq for TimePoint {
    fn eq(&self, other: &Self) -> bool {
        (self.timestamp - other.timestamp).abs() < F64_MARGIN
            && (self.value - other.value).abs() < F64_MARGIN
    }
}
