use std::cmp::{self, Ordering};

use crate::aggregator::{Aggregator, BoxedAggregator};
use crate::selector::ColumnSelector;
use crate::value::{self, AggVal};

/// Tracks the smallest value seen in a 32-bit integer column. Starts at
/// `i32::MAX`, the identity for `min`, so a scan over zero rows reports that.
pub struct MinI32<'a> {
    name: String,
    selector: &'a dyn ColumnSelector<i32>,
    min: i32,
}

impl<'a> MinI32<'a> {
    pub const UNIT: i32 = i32::MAX;

    pub fn new(name: &str, selector: &'a dyn ColumnSelector<i32>) -> MinI32<'a> {
        MinI32 {
            name: name.to_string(),
            selector,
            min: Self::UNIT,
        }
    }

    pub fn combine(lhs: i32, rhs: i32) -> i32 {
        cmp::min(lhs, rhs)
    }

    pub fn compare(lhs: AggVal, rhs: AggVal) -> Ordering {
        value::cmp_i32(lhs, rhs)
    }
}

impl<'a> Aggregator<'a> for MinI32<'a> {
    fn aggregate(&mut self) {
        self.min = cmp::min(self.min, self.selector.get());
    }

    fn get(&self) -> AggVal {
        AggVal::I32(self.min)
    }

    fn get_i32(&self) -> i32 {
        self.min
    }

    fn get_i64(&self) -> i64 {
        i64::from(self.min)
    }

    fn get_f32(&self) -> f32 {
        self.min as f32
    }

    fn get_f64(&self) -> f64 {
        f64::from(self.min)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.min = Self::UNIT;
    }

    fn spawn(&self) -> BoxedAggregator<'a> {
        Box::new(MinI32::new(&self.name, self.selector))
    }

    fn close(&mut self) {
        log::trace!("closed aggregator {}", self.name);
    }
}

/// Tracks the largest value seen in a 32-bit integer column. Starts at
/// `i32::MIN`, the identity for `max`.
pub struct MaxI32<'a> {
    name: String,
    selector: &'a dyn ColumnSelector<i32>,
    max: i32,
}

impl<'a> MaxI32<'a> {
    pub const UNIT: i32 = i32::MIN;

    pub fn new(name: &str, selector: &'a dyn ColumnSelector<i32>) -> MaxI32<'a> {
        MaxI32 {
            name: name.to_string(),
            selector,
            max: Self::UNIT,
        }
    }

    pub fn combine(lhs: i32, rhs: i32) -> i32 {
        cmp::max(lhs, rhs)
    }

    pub fn compare(lhs: AggVal, rhs: AggVal) -> Ordering {
        value::cmp_i32(lhs, rhs)
    }
}

impl<'a> Aggregator<'a> for MaxI32<'a> {
    fn aggregate(&mut self) {
        self.max = cmp::max(self.max, self.selector.get());
    }

    fn get(&self) -> AggVal {
        AggVal::I32(self.max)
    }

    fn get_i32(&self) -> i32 {
        self.max
    }

    fn get_i64(&self) -> i64 {
        i64::from(self.max)
    }

    fn get_f32(&self) -> f32 {
        self.max as f32
    }

    fn get_f64(&self) -> f64 {
        f64::from(self.max)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.max = Self::UNIT;
    }

    fn spawn(&self) -> BoxedAggregator<'a> {
        Box::new(MaxI32::new(&self.name, self.selector))
    }

    fn close(&mut self) {
        log::trace!("closed aggregator {}", self.name);
    }
}
