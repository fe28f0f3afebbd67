mod aggregator;
mod count;
mod errors;
mod min_max;
mod selector;
mod sum;
mod value;

pub use crate::aggregator::{Aggregator, AggregatorKind, BoxedAggregator};
pub use crate::count::Count;
pub use crate::errors::{AggError, AggResult};
pub use crate::min_max::{MaxI32, MinI32};
pub use crate::selector::{ColumnSelector, SliceSelector};
pub use crate::sum::{SumF64, SumI32, SumI64};
pub use crate::value::{cmp_f64, cmp_i32, cmp_i64, AggVal};
