//! Grouping of consecutive rows that render the same way.

use crate::window::row::{DisplayedRow, Row};

/// The pair of flags rows are grouped by: `(is_error, is_new_line)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowKind {
    pub is_error: bool,
    pub is_new_line: bool,
}

/// Anything that carries a [`RowKind`].
pub trait Kinded {
    fn kind(&self) -> RowKind;
}

impl Kinded for Row {
    fn kind(&self) -> RowKind {
        RowKind {
            is_error: self.is_error,
            is_new_line: self.is_new_line,
        }
    }
}

impl Kinded for DisplayedRow {
    fn kind(&self) -> RowKind {
        RowKind {
            is_error: self.is_error(),
            is_new_line: self.is_just_added(),
        }
    }
}

impl<T: Kinded + ?Sized> Kinded for &T {
    fn kind(&self) -> RowKind {
        (**self).kind()
    }
}

/// A run of rows sharing one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroup<R> {
    kind: RowKind,
    rows: Vec<R>,
}

impl<R: Kinded> LogGroup<R> {
    pub fn new(first: R) -> Self {
        Self {
            kind: first.kind(),
            rows: vec![first],
        }
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn accepts(&self, row: &R) -> bool {
        row.kind() == self.kind
    }

    /// Add a row to the run.
    ///
    /// # Panics
    ///
    /// Panics if the row's kind differs from the group's; callers check
    /// [`LogGroup::accepts`] first.
    pub fn add(&mut self, row: R) {
        assert!(
            self.accepts(&row),
            "row of kind {:?} added to group of kind {:?}",
            row.kind(),
            self.kind
        );
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split rows into maximal runs of the same kind, preserving order.
pub fn aggregate<R, I>(rows: I) -> Vec<LogGroup<R>>
where
    R: Kinded,
    I: IntoIterator<Item = R>,
{
    let mut groups: Vec<LogGroup<R>> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(group) if group.accepts(&row) => group.add(row),
            _ => groups.push(LogGroup::new(row)),
        }
    }
    groups
}
