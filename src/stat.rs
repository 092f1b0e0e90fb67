/// **Stat**istics **Entry** for one key
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatEntry {
    pub count: u64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl StatEntry {
    pub fn from_value(v: f64) -> Self {
        StatEntry {
            count: 1,
            sum: v,
            min: v,
            max: v,
        }
    }

    pub fn update(&mut self, v: f64) {
        if self.min > v {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
        self.sum += v;
        self.count += 1;
    }

    /// Combine two partial aggregates of the same key.
    /// Exact for count, min and max; sum depends on addition order.
    pub fn merge(&mut self, other: &Self) {
        if self.min > other.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
