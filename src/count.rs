use std::cmp::Ordering;

use crate::aggregator::{Aggregator, BoxedAggregator};
use crate::value::{self, AggVal};

/// Counts rows. Ignores column contents entirely, so it borrows no selector
/// and the scan loop only has to call [`Aggregator::aggregate`] once per row.
pub struct Count {
    name: String,
    count: i64,
}

impl Count {
    pub const UNIT: i64 = 0;

    pub fn new(name: &str) -> Count {
        Count {
            name: name.to_string(),
            count: Self::UNIT,
        }
    }

    pub fn combine(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_add(rhs)
    }

    pub fn compare(lhs: AggVal, rhs: AggVal) -> Ordering {
        value::cmp_i64(lhs, rhs)
    }
}

impl<'a> Aggregator<'a> for Count {
    fn aggregate(&mut self) {
        self.count = self.count.wrapping_add(1);
    }

    fn get(&self) -> AggVal {
        AggVal::I64(self.count)
    }

    fn get_i32(&self) -> i32 {
        self.count as i32
    }

    fn get_i64(&self) -> i64 {
        self.count
    }

    fn get_f32(&self) -> f32 {
        self.count as f32
    }

    fn get_f64(&self) -> f64 {
        self.count as f64
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.count = Self::UNIT;
    }

    fn spawn(&self) -> BoxedAggregator<'a> {
        Box::new(Count::new(&self.name))
    }

    fn close(&mut self) {
        log::trace!("closed aggregator {}", self.name);
    }
}
