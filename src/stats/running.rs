// Running accumulators fed strictly in processing order.

use serde::Serialize;

/// Integer accumulator. The moving average uses floor division, so it drifts from the
/// exact mean as values arrive. The total saturates instead of overflowing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntStats {
    pub count: i64,
    pub min: i64,
    pub max: i64,
    pub first: i64,
    pub last: i64,
    pub total: i64,
    pub average: i64,
}

impl Default for IntStats {
    fn default() -> Self {
        Self {
            count: 0,
            min: i64::MAX,
            max: 0,
            first: 0,
            last: 0,
            total: 0,
            average: 0,
        }
    }
}

impl IntStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, value: i64) {
        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        if self.count == 1 {
            self.first = value;
        }
        self.last = value;
        self.total = self.total.saturating_add(value);
        // Widened so large byte counts cannot overflow; a floored mean of i64 values fits in i64.
        let weighted = i128::from(value) + i128::from(self.count - 1) * i128::from(self.average);
        self.average = weighted.div_euclid(i128::from(self.count)) as i64;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatStats {
    pub count: f64,
    pub min: f64,
    pub max: f64,
    pub first: f64,
    pub last: f64,
    pub total: f64,
    pub average: f64,
}

impl Default for FloatStats {
    fn default() -> Self {
        Self {
            count: 0.0,
            min: f64::MAX,
            max: 0.0,
            first: 0.0,
            last: 0.0,
            total: 0.0,
            average: 0.0,
        }
    }
}

impl FloatStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&mut self, value: f64) {
        self.count += 1.0;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        if self.count == 1.0 {
            self.first = value;
        }
        self.last = value;
        self.total += value;
        self.average = (value + (self.count - 1.0) * self.average) / self.count;
    }
}
