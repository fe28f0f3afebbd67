use std::cmp::Ordering;
use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A snapshot of an aggregator's accumulated state, carried in the variant's
/// natural width. `Null` stands for an absent result, e.g. a partition that
/// produced no partial aggregate.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum AggVal {
    Null,
    I32(i32),
    I64(i64),
    F64(OrderedFloat<f64>),
}

impl AggVal {
    /// Coerces to 32 bits. Narrowing truncates and float conversion follows
    /// `as`-cast semantics; both are unchecked by contract.
    pub fn to_i32(self) -> Option<i32> {
        match self {
            AggVal::Null => None,
            AggVal::I32(v) => Some(v),
            AggVal::I64(v) => Some(v as i32),
            AggVal::F64(v) => Some(v.0 as i32),
        }
    }

    pub fn to_i64(self) -> Option<i64> {
        match self {
            AggVal::Null => None,
            AggVal::I32(v) => Some(i64::from(v)),
            AggVal::I64(v) => Some(v),
            AggVal::F64(v) => Some(v.0 as i64),
        }
    }

    pub fn to_f32(self) -> Option<f32> {
        match self {
            AggVal::Null => None,
            AggVal::I32(v) => Some(v as f32),
            AggVal::I64(v) => Some(v as f32),
            AggVal::F64(v) => Some(v.0 as f32),
        }
    }

    pub fn to_f64(self) -> Option<f64> {
        match self {
            AggVal::Null => None,
            AggVal::I32(v) => Some(f64::from(v)),
            AggVal::I64(v) => Some(v as f64),
            AggVal::F64(v) => Some(v.0),
        }
    }

    pub fn is_null(self) -> bool {
        matches!(self, AggVal::Null)
    }
}

impl fmt::Display for AggVal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AggVal::Null => write!(f, "null"),
            AggVal::I32(v) => write!(f, "{}", v),
            AggVal::I64(v) => write!(f, "{}", v),
            AggVal::F64(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for AggVal {
    fn from(val: i32) -> Self {
        AggVal::I32(val)
    }
}

impl From<i64> for AggVal {
    fn from(val: i64) -> Self {
        AggVal::I64(val)
    }
}

impl From<f64> for AggVal {
    fn from(val: f64) -> Self {
        AggVal::F64(OrderedFloat(val))
    }
}

impl From<()> for AggVal {
    fn from(_: ()) -> Self {
        AggVal::Null
    }
}

impl<T: Into<AggVal>> From<Option<T>> for AggVal {
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => val.into(),
            None => AggVal::Null,
        }
    }
}

/// Total order over snapshots compared at `i32` width: an absent value sorts
/// strictly before any present value, present values compare by signed
/// magnitude.
pub fn cmp_i32(lhs: AggVal, rhs: AggVal) -> Ordering {
    match (lhs.to_i32(), rhs.to_i32()) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Nulls-first total order over snapshots compared at `i64` width.
pub fn cmp_i64(lhs: AggVal, rhs: AggVal) -> Ordering {
    match (lhs.to_i64(), rhs.to_i64()) {
        (Some(l), Some(r)) => l.cmp(&r),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Nulls-first total order over snapshots compared at `f64` width.
pub fn cmp_f64(lhs: AggVal, rhs: AggVal) -> Ordering {
    match (lhs.to_f64(), rhs.to_f64()) {
        (Some(l), Some(r)) => OrderedFloat(l).cmp(&OrderedFloat(r)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
