use std::cmp::Ordering;

use crate::aggregator::{Aggregator, BoxedAggregator};
use crate::selector::ColumnSelector;
use crate::value::{self, AggVal};

/// Accumulates the wraparound sum of a 32-bit integer column.
///
/// This is the reference implementation of the [`Aggregator`] contract.
/// Addition is fixed-width: a sum that exceeds `i32` range wraps silently
/// (two's complement) instead of saturating or erroring. Merge logic relies
/// on exactly that behavior, since wraparound addition stays associative and
/// commutative across partitions.
pub struct SumI32<'a> {
    name: String,
    // Borrowed, never owned, and possibly shared with siblings produced by
    // `spawn`. The selector's cursor lives behind interior mutability, so a
    // shared selector must not be read from two threads.
    selector: &'a dyn ColumnSelector<i32>,
    sum: i32,
}

impl<'a> SumI32<'a> {
    /// The identity element: the state of a sum that has seen no rows.
    pub const UNIT: i32 = 0;

    pub fn new(name: &str, selector: &'a dyn ColumnSelector<i32>) -> SumI32<'a> {
        SumI32 {
            name: name.to_string(),
            selector,
            sum: Self::UNIT,
        }
    }

    /// Folds two partial sums into one. Pure and instance-free so merge
    /// coordinators can roll up partitions without an accumulator.
    pub fn combine(lhs: i32, rhs: i32) -> i32 {
        lhs.wrapping_add(rhs)
    }

    /// Like [`SumI32::combine`], but also reports whether the addition
    /// wrapped.
    pub fn combine_checked(lhs: i32, rhs: i32) -> (i32, bool) {
        lhs.overflowing_add(rhs)
    }

    /// Nulls-first ordering of partial sums at `i32` width.
    pub fn compare(lhs: AggVal, rhs: AggVal) -> Ordering {
        value::cmp_i32(lhs, rhs)
    }
}

impl<'a> Aggregator<'a> for SumI32<'a> {
    fn aggregate(&mut self) {
        self.sum = self.sum.wrapping_add(self.selector.get());
    }

    fn get(&self) -> AggVal {
        AggVal::I32(self.sum)
    }

    fn get_i32(&self) -> i32 {
        self.sum
    }

    fn get_i64(&self) -> i64 {
        i64::from(self.sum)
    }

    fn get_f32(&self) -> f32 {
        self.sum as f32
    }

    fn get_f64(&self) -> f64 {
        f64::from(self.sum)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.sum = Self::UNIT;
    }

    fn spawn(&self) -> BoxedAggregator<'a> {
        Box::new(SumI32::new(&self.name, self.selector))
    }

    fn close(&mut self) {
        log::trace!("closed aggregator {}", self.name);
    }
}

/// Accumulates the wraparound sum of a 64-bit integer column.
pub struct SumI64<'a> {
    name: String,
    selector: &'a dyn ColumnSelector<i64>,
    sum: i64,
}

impl<'a> SumI64<'a> {
    pub const UNIT: i64 = 0;

    pub fn new(name: &str, selector: &'a dyn ColumnSelector<i64>) -> SumI64<'a> {
        SumI64 {
            name: name.to_string(),
            selector,
            sum: Self::UNIT,
        }
    }

    pub fn combine(lhs: i64, rhs: i64) -> i64 {
        lhs.wrapping_add(rhs)
    }

    pub fn combine_checked(lhs: i64, rhs: i64) -> (i64, bool) {
        lhs.overflowing_add(rhs)
    }

    pub fn compare(lhs: AggVal, rhs: AggVal) -> Ordering {
        value::cmp_i64(lhs, rhs)
    }
}

impl<'a> Aggregator<'a> for SumI64<'a> {
    fn aggregate(&mut self) {
        self.sum = self.sum.wrapping_add(self.selector.get());
    }

    fn get(&self) -> AggVal {
        AggVal::I64(self.sum)
    }

    fn get_i32(&self) -> i32 {
        self.sum as i32
    }

    fn get_i64(&self) -> i64 {
        self.sum
    }

    fn get_f32(&self) -> f32 {
        self.sum as f32
    }

    fn get_f64(&self) -> f64 {
        self.sum as f64
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.sum = Self::UNIT;
    }

    fn spawn(&self) -> BoxedAggregator<'a> {
        Box::new(SumI64::new(&self.name, self.selector))
    }

    fn close(&mut self) {
        log::trace!("closed aggregator {}", self.name);
    }
}

/// Accumulates the sum of a 64-bit float column. Floats have no wraparound;
/// the merge stays commutative but, as with any float fold, not bit-exactly
/// associative.
pub struct SumF64<'a> {
    name: String,
    selector: &'a dyn ColumnSelector<f64>,
    sum: f64,
}

impl<'a> SumF64<'a> {
    pub const UNIT: f64 = 0.0;

    pub fn new(name: &str, selector: &'a dyn ColumnSelector<f64>) -> SumF64<'a> {
        SumF64 {
            name: name.to_string(),
            selector,
            sum: Self::UNIT,
        }
    }

    pub fn combine(lhs: f64, rhs: f64) -> f64 {
        lhs + rhs
    }

    pub fn compare(lhs: AggVal, rhs: AggVal) -> Ordering {
        value::cmp_f64(lhs, rhs)
    }
}

impl<'a> Aggregator<'a> for SumF64<'a> {
    fn aggregate(&mut self) {
        self.sum += self.selector.get();
    }

    fn get(&self) -> AggVal {
        self.sum.into()
    }

    fn get_i32(&self) -> i32 {
        self.sum as i32
    }

    fn get_i64(&self) -> i64 {
        self.sum as i64
    }

    fn get_f32(&self) -> f32 {
        self.sum as f32
    }

    fn get_f64(&self) -> f64 {
        self.sum
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reset(&mut self) {
        self.sum = Self::UNIT;
    }

    fn spawn(&self) -> BoxedAggregator<'a> {
        Box::new(SumF64::new(&self.name, self.selector))
    }

    fn close(&mut self) {
        log::trace!("closed aggregator {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::selector::SliceSelector;

    fn scan<'a>(col: &SliceSelector<'a, i32>, agg: &mut SumI32<'a>) {
        for _ in 0..col.len() {
            agg.aggregate();
            col.advance();
        }
    }

    #[test]
    fn sums_a_scan() {
        let col = SliceSelector::new(&[2, 3, 5]);
        let mut agg = SumI32::new("total", &col);
        scan(&col, &mut agg);
        assert_eq!(agg.get(), AggVal::I32(10));
        assert_eq!(agg.get_i32(), 10);
        assert_eq!(agg.get_i64(), 10);
        assert_eq!(agg.get_f32(), 10.0);
        assert_eq!(agg.get_f64(), 10.0);
        assert_eq!(agg.name(), "total");
    }

    #[test]
    fn wraps_on_overflow() {
        let col = SliceSelector::new(&[i32::MAX, 1]);
        let mut agg = SumI32::new("total", &col);
        agg.aggregate();
        col.advance();
        assert_eq!(agg.get_i32(), i32::MAX);
        agg.aggregate();
        assert_eq!(agg.get(), AggVal::I32(i32::MIN));
    }

    #[test]
    fn reset_restores_unit_in_every_width() {
        let col = SliceSelector::new(&[41]);
        let mut agg = SumI32::new("total", &col);
        agg.aggregate();
        agg.reset();
        assert_eq!(agg.get(), AggVal::I32(0));
        assert_eq!(agg.get_i32(), 0);
        assert_eq!(agg.get_i64(), 0);
        assert_eq!(agg.get_f32(), 0.0);
        assert_eq!(agg.get_f64(), 0.0);
        assert_eq!(agg.name(), "total");
    }

    #[test]
    fn spawn_starts_at_unit_and_evolves_independently() {
        let col = SliceSelector::new(&[7, 7]);
        let mut agg = SumI32::new("total", &col);
        agg.aggregate();
        let mut sibling = agg.spawn();
        assert_eq!(sibling.name(), "total");
        assert_eq!(sibling.get(), AggVal::I32(0));
        // Both read the shared cursor; neither disturbs the other's state.
        col.advance();
        sibling.aggregate();
        assert_eq!(agg.get(), AggVal::I32(7));
        assert_eq!(sibling.get(), AggVal::I32(7));
        agg.aggregate();
        assert_eq!(agg.get(), AggVal::I32(14));
        assert_eq!(sibling.get(), AggVal::I32(7));
    }

    #[test]
    fn combine_folds_partial_sums() {
        assert_eq!(SumI32::combine(7, -2), 5);
        assert_eq!(SumI32::combine(SumI32::UNIT, 9), 9);
        assert_eq!(SumI32::combine(i32::MAX, 1), i32::MIN);
    }

    #[test]
    fn combine_is_commutative_and_associative() {
        let mut rng = XorShiftRng::seed_from_u64(0);
        for _ in 0..1000 {
            let (a, b, c): (i32, i32, i32) = (rng.random(), rng.random(), rng.random());
            assert_eq!(SumI32::combine(a, b), SumI32::combine(b, a));
            assert_eq!(
                SumI32::combine(SumI32::combine(a, b), c),
                SumI32::combine(a, SumI32::combine(b, c))
            );
        }
    }

    #[test]
    fn combine_checked_flags_wraparound() {
        assert_eq!(SumI32::combine_checked(7, -2), (5, false));
        assert_eq!(SumI32::combine_checked(i32::MAX, 1), (i32::MIN, true));
        assert_eq!(SumI64::combine_checked(i64::MAX, 1), (i64::MIN, true));
    }

    #[test]
    fn close_releases_nothing_and_may_repeat() {
        let col = SliceSelector::new(&[1]);
        let mut agg = SumI32::new("total", &col);
        agg.aggregate();
        agg.close();
        agg.close();
        assert_eq!(agg.get(), AggVal::I32(1));
    }

    #[test]
    fn i64_sum_narrows_by_truncation() {
        let rows = [1i64 << 32, 5];
        let col = SliceSelector::new(&rows);
        let mut agg = SumI64::new("total", &col);
        agg.aggregate();
        col.advance();
        agg.aggregate();
        assert_eq!(agg.get(), AggVal::I64((1 << 32) + 5));
        assert_eq!(agg.get_i32(), 5);
    }

    #[test]
    fn f64_sum_coerces_to_every_width() {
        let rows = [1.25f64, 2.5];
        let col = SliceSelector::new(&rows);
        let mut agg = SumF64::new("total", &col);
        agg.aggregate();
        col.advance();
        agg.aggregate();
        assert_eq!(agg.get(), AggVal::from(3.75));
        assert_eq!(agg.get_i32(), 3);
        assert_eq!(agg.get_i64(), 3);
        assert_eq!(agg.get_f32(), 3.75);
        assert_eq!(agg.get_f64(), 3.75);
    }

    #[test]
    fn compare_orders_partials_nulls_first() {
        assert_eq!(SumI32::compare(AggVal::Null, AggVal::I32(5)), Ordering::Less);
        assert_eq!(SumI32::compare(AggVal::I32(5), AggVal::Null), Ordering::Greater);
        assert_eq!(SumI32::compare(AggVal::I32(3), AggVal::I32(5)), Ordering::Less);
        assert_eq!(SumI32::compare(AggVal::I32(5), AggVal::I32(5)), Ordering::Equal);
    }
}
