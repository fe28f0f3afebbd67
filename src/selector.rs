use std::cell::Cell;

/// Per-row supplier of one column's values during a scan.
///
/// The driving scan loop owns cursor movement; aggregators bound to a
/// selector only ever read the current row. Selectors advance through
/// interior mutability and are shared by plain borrow between the
/// aggregators of one scan, so implementations are not assumed `Sync` and a
/// selector reference must stay on the thread running its scan.
pub trait ColumnSelector<T> {
    /// The value at the scan's current row. Only defined once the driving
    /// loop has positioned the cursor on a valid row.
    fn get(&self) -> T;
}

/// Slice-backed [`ColumnSelector`] with an explicit cursor, used to feed
/// scans from in-memory columns.
pub struct SliceSelector<'a, T> {
    values: &'a [T],
    row: Cell<usize>,
}

impl<'a, T: Copy> SliceSelector<'a, T> {
    pub fn new(values: &'a [T]) -> SliceSelector<'a, T> {
        SliceSelector {
            values,
            row: Cell::new(0),
        }
    }

    /// Moves the cursor to the next row.
    pub fn advance(&self) {
        self.row.set(self.row.get() + 1);
    }

    /// Moves the cursor back to the first row.
    pub fn rewind(&self) {
        self.row.set(0);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Copy> ColumnSelector<T> for SliceSelector<'_, T> {
    /// Panics if the cursor has been advanced past the last row.
    fn get(&self) -> T {
        self.values[self.row.get()]
    }
}
