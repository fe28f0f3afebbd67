use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::count::Count;
use crate::errors::{AggError, AggResult};
use crate::min_max::{MaxI32, MinI32};
use crate::sum::{SumF64, SumI32, SumI64};
use crate::value::{self, AggVal};

pub type BoxedAggregator<'a> = Box<dyn Aggregator<'a> + 'a>;

/// A single accumulator driven by a column scan.
///
/// The scan loop owns the row cursor: it positions the shared column
/// selector, calls [`Aggregator::aggregate`] at most once per row, and
/// advances. Implementations borrow their selector for `'a` and never move
/// it, so several aggregators can read the same column in one pass.
///
/// Aggregators are not thread-safe. An instance and every sibling produced
/// by [`Aggregator::spawn`] must stay on the scanning thread.
pub trait Aggregator<'a> {
    /// Folds the value at the selector's current row into the running state.
    fn aggregate(&mut self);

    /// Snapshot of the running state at its native width.
    fn get(&self) -> AggVal;

    /// Snapshot coerced to `i32`. Widths narrow by truncation and floats
    /// drop their fraction, same as an `as` cast.
    fn get_i32(&self) -> i32;

    /// Snapshot coerced to `i64`.
    fn get_i64(&self) -> i64;

    /// Snapshot coerced to `f32`.
    fn get_f32(&self) -> f32;

    /// Snapshot coerced to `f64`.
    fn get_f64(&self) -> f64;

    /// The output column this aggregator fills.
    fn name(&self) -> &str;

    /// Returns the state to the unit, as if no rows had been seen. The
    /// selector binding survives, so the same instance can run another scan.
    fn reset(&mut self);

    /// A fresh sibling at the unit state, sharing this aggregator's name and
    /// selector. State evolves independently from the moment of the split.
    fn spawn(&self) -> BoxedAggregator<'a>;

    /// Releases held resources. Current implementations hold none, but scan
    /// drivers call this unconditionally when retiring an aggregator, and
    /// calling it twice is fine.
    fn close(&mut self);
}

/// Value-level dispatch over the aggregation kinds, for merge coordinators
/// that fold [`AggVal`] snapshots without knowing the concrete accumulator
/// type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregatorKind {
    SumI32,
    SumI64,
    SumF64,
    Count,
    MinI32,
    MaxI32,
}

impl AggregatorKind {
    /// The identity snapshot for this kind, i.e. the state of an aggregator
    /// that has seen no rows.
    pub fn unit(self) -> AggVal {
        match self {
            AggregatorKind::SumI32 => SumI32::UNIT.into(),
            AggregatorKind::SumI64 => SumI64::UNIT.into(),
            AggregatorKind::SumF64 => SumF64::UNIT.into(),
            AggregatorKind::Count => Count::UNIT.into(),
            AggregatorKind::MinI32 => MinI32::UNIT.into(),
            AggregatorKind::MaxI32 => MaxI32::UNIT.into(),
        }
    }

    /// Folds two partial snapshots. `Null` stands in for an absent partial
    /// and counts as the unit. Snapshots of the wrong width are rejected
    /// rather than coerced.
    pub fn combine(self, lhs: AggVal, rhs: AggVal) -> AggResult<AggVal> {
        match self {
            AggregatorKind::SumI32 => Ok(SumI32::combine(
                i32_operand(self, SumI32::UNIT, lhs)?,
                i32_operand(self, SumI32::UNIT, rhs)?,
            )
            .into()),
            AggregatorKind::SumI64 => Ok(SumI64::combine(
                i64_operand(self, SumI64::UNIT, lhs)?,
                i64_operand(self, SumI64::UNIT, rhs)?,
            )
            .into()),
            AggregatorKind::SumF64 => Ok(SumF64::combine(
                f64_operand(self, SumF64::UNIT, lhs)?,
                f64_operand(self, SumF64::UNIT, rhs)?,
            )
            .into()),
            AggregatorKind::Count => Ok(Count::combine(
                i64_operand(self, Count::UNIT, lhs)?,
                i64_operand(self, Count::UNIT, rhs)?,
            )
            .into()),
            AggregatorKind::MinI32 => Ok(MinI32::combine(
                i32_operand(self, MinI32::UNIT, lhs)?,
                i32_operand(self, MinI32::UNIT, rhs)?,
            )
            .into()),
            AggregatorKind::MaxI32 => Ok(MaxI32::combine(
                i32_operand(self, MaxI32::UNIT, lhs)?,
                i32_operand(self, MaxI32::UNIT, rhs)?,
            )
            .into()),
        }
    }

    /// Like [`AggregatorKind::combine`], but fails with
    /// [`AggError::Overflow`] instead of wrapping. Only the integer sums can
    /// wrap; every other kind falls through to the plain fold.
    pub fn combine_checked(self, lhs: AggVal, rhs: AggVal) -> AggResult<AggVal> {
        match self {
            AggregatorKind::SumI32 => {
                let (sum, overflow) = SumI32::combine_checked(
                    i32_operand(self, SumI32::UNIT, lhs)?,
                    i32_operand(self, SumI32::UNIT, rhs)?,
                );
                if overflow {
                    Err(AggError::Overflow)
                } else {
                    Ok(sum.into())
                }
            }
            AggregatorKind::SumI64 => {
                let (sum, overflow) = SumI64::combine_checked(
                    i64_operand(self, SumI64::UNIT, lhs)?,
                    i64_operand(self, SumI64::UNIT, rhs)?,
                );
                if overflow {
                    Err(AggError::Overflow)
                } else {
                    Ok(sum.into())
                }
            }
            _ => self.combine(lhs, rhs),
        }
    }

    /// Total, nulls-first ordering of snapshots at this kind's width.
    pub fn compare(self, lhs: AggVal, rhs: AggVal) -> Ordering {
        match self {
            AggregatorKind::SumI32 | AggregatorKind::MinI32 | AggregatorKind::MaxI32 => {
                value::cmp_i32(lhs, rhs)
            }
            AggregatorKind::SumI64 | AggregatorKind::Count => value::cmp_i64(lhs, rhs),
            AggregatorKind::SumF64 => value::cmp_f64(lhs, rhs),
        }
    }
}

fn i32_operand(kind: AggregatorKind, unit: i32, val: AggVal) -> AggResult<i32> {
    match val {
        AggVal::Null => Ok(unit),
        AggVal::I32(v) => Ok(v),
        other => Err(type_error(kind, "i32", other)),
    }
}

fn i64_operand(kind: AggregatorKind, unit: i64, val: AggVal) -> AggResult<i64> {
    match val {
        AggVal::Null => Ok(unit),
        AggVal::I64(v) => Ok(v),
        other => Err(type_error(kind, "i64", other)),
    }
}

fn f64_operand(kind: AggregatorKind, unit: f64, val: AggVal) -> AggResult<f64> {
    match val {
        AggVal::Null => Ok(unit),
        AggVal::F64(v) => Ok(v.0),
        other => Err(type_error(kind, "f64", other)),
    }
}

fn type_error(kind: AggregatorKind, width: &str, val: AggVal) -> AggError {
    AggError::TypeError(format!("{:?} expects {} snapshots, got {}", kind, width, val))
}
