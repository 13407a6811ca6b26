//! Contiguous index windows and the diff between two of them.
//!
//! Indices are positions in the filtered index. A window moving "forward"
//! travels toward newer lines, which the view shows at the top; moving
//! "backward" travels toward older lines at the bottom.

use crate::error::{Result, TaildiffError};
use std::fmt;
use std::ops::Range;

/// Immutable window `[start, start + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRange {
    start: usize,
    size: usize,
}

/// How a window changed into another one of equal or larger size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Same start and end, nothing to patch.
    Unchanged,
    /// Moved or grew toward higher indices.
    GoneForward {
        deleted_from_bottom: PageRange,
        added_from_top: PageRange,
        new_size: usize,
    },
    /// Moved or grew toward lower indices.
    GoneBackward {
        deleted_from_top: PageRange,
        added_from_bottom: PageRange,
        new_size: usize,
    },
}

impl PageRange {
    pub const EMPTY: PageRange = PageRange { start: 0, size: 0 };

    pub fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// Window covering `start..=end`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        if end < start {
            return Self::new(start, 0);
        }
        Self::new(start, end - start + 1)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Last index inside the window, `None` when empty.
    pub fn end(&self) -> Option<usize> {
        (self.size > 0).then(|| self.start + self.size - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.as_range().contains(&index)
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.start + self.size
    }

    pub fn iter(&self) -> Range<usize> {
        self.as_range()
    }

    /// Classify the transition from `self` to `other`.
    ///
    /// `other` must be at least as large as `self`; shrinking is done by
    /// clearing the view and rebuilding it, never through a diff. Growing past
    /// both ends at once has no single-sided patch and is rejected as well.
    pub fn compare(&self, other: &PageRange) -> Result<Comparison> {
        if other.size < self.size {
            return Err(TaildiffError::ShrinkingWindow {
                current: *self,
                requested: *other,
            });
        }

        let Some(end) = self.end() else {
            return Ok(Comparison::GoneBackward {
                deleted_from_top: PageRange::EMPTY,
                added_from_bottom: *other,
                new_size: other.size,
            });
        };

        if other.start == self.start && other.end() == Some(end) {
            return Ok(Comparison::Unchanged);
        }

        // other.size >= self.size > 0 from here on
        let other_end = other.start + other.size - 1;

        if other.start >= self.start {
            if other.start > end {
                return Ok(Comparison::GoneForward {
                    deleted_from_bottom: *self,
                    added_from_top: *other,
                    new_size: other.size,
                });
            }
            Ok(Comparison::GoneForward {
                deleted_from_bottom: PageRange::new(self.start, other.start - self.start),
                added_from_top: PageRange::from_bounds(end + 1, other_end),
                new_size: other.size,
            })
        } else {
            if other_end > end {
                return Err(TaildiffError::TwoSidedGrowth {
                    current: *self,
                    requested: *other,
                });
            }
            let added_end = other_end.min(self.start - 1);
            let deleted_start = (other_end + 1).max(self.start);
            Ok(Comparison::GoneBackward {
                deleted_from_top: PageRange::from_bounds(deleted_start, end),
                added_from_bottom: PageRange::from_bounds(other.start, added_end),
                new_size: other.size,
            })
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end() {
            Some(end) => write!(f, "[{}..={}]", self.start, end),
            None => write!(f, "[]"),
        }
    }
}

impl IntoIterator for PageRange {
    type Item = usize;
    type IntoIter = Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn indices(range: PageRange) -> Vec<usize> {
        range.into_iter().collect()
    }

    #[test]
    fn end_is_none_for_empty_window() {
        assert_eq!(PageRange::new(3, 0).end(), None);
        assert_eq!(PageRange::new(3, 1).end(), Some(3));
        assert_eq!(PageRange::from_bounds(5, 19).size(), 15);
    }

    #[test]
    fn disjoint_forward_move_replaces_everything() {
        let cmp = PageRange::new(0, 5).compare(&PageRange::new(5, 5)).unwrap();
        match cmp {
            Comparison::GoneForward {
                deleted_from_bottom,
                added_from_top,
                new_size,
            } => {
                assert_eq!(indices(deleted_from_bottom), vec![0, 1, 2, 3, 4]);
                assert_eq!(indices(added_from_top), vec![5, 6, 7, 8, 9]);
                assert_eq!(new_size, 5);
            }
            other => panic!("unexpected comparison: {other:?}"),
        }
    }

    #[test]
    fn disjoint_backward_move_replaces_everything() {
        let cmp = PageRange::new(5, 5).compare(&PageRange::new(0, 5)).unwrap();
        match cmp {
            Comparison::GoneBackward {
                deleted_from_top,
                added_from_bottom,
                ..
            } => {
                assert_eq!(indices(deleted_from_top), vec![5, 6, 7, 8, 9]);
                assert_eq!(indices(added_from_bottom), vec![0, 1, 2, 3, 4]);
            }
            other => panic!("unexpected comparison: {other:?}"),
        }
    }

    #[test]
    fn overlapping_slide_forward() {
        let cmp = PageRange::new(10, 10).compare(&PageRange::new(15, 10)).unwrap();
        assert_eq!(
            cmp,
            Comparison::GoneForward {
                deleted_from_bottom: PageRange::new(10, 5),
                added_from_top: PageRange::new(20, 5),
                new_size: 10,
            }
        );
    }

    #[test]
    fn growing_backward_deletes_nothing() {
        let cmp = PageRange::new(5, 15).compare(&PageRange::new(0, 20)).unwrap();
        assert_eq!(
            cmp,
            Comparison::GoneBackward {
                deleted_from_top: PageRange::new(20, 0),
                added_from_bottom: PageRange::new(0, 5),
                new_size: 20,
            }
        );
    }

    #[test]
    fn identical_window_is_unchanged() {
        let range = PageRange::new(4, 6);
        assert_eq!(range.compare(&range).unwrap(), Comparison::Unchanged);
    }

    #[test]
    fn empty_window_bootstraps_from_bottom() {
        let cmp = PageRange::EMPTY.compare(&PageRange::new(5, 15)).unwrap();
        assert_eq!(
            cmp,
            Comparison::GoneBackward {
                deleted_from_top: PageRange::EMPTY,
                added_from_bottom: PageRange::new(5, 15),
                new_size: 15,
            }
        );
    }

    #[test]
    fn shrinking_target_is_rejected() {
        let err = PageRange::new(0, 10)
            .compare(&PageRange::new(0, 5))
            .unwrap_err();
        assert!(matches!(err, TaildiffError::ShrinkingWindow { .. }));
    }

    #[test]
    fn growth_on_both_ends_is_rejected() {
        let err = PageRange::new(5, 5)
            .compare(&PageRange::new(0, 20))
            .unwrap_err();
        assert!(matches!(err, TaildiffError::TwoSidedGrowth { .. }));
    }

    proptest! {
        #[test]
        fn diff_partitions_both_windows(
            a_start in 0usize..200,
            a_size in 0usize..60,
            b_start in 0usize..200,
            extra in 0usize..60,
        ) {
            let a = PageRange::new(a_start, a_size);
            let b = PageRange::new(b_start, a_size + extra);
            prop_assume!(a.is_empty() || !(b.start() < a.start() && b.end() > a.end()));
            let (added, deleted) = match a.compare(&b).unwrap() {
                Comparison::Unchanged => (PageRange::EMPTY, PageRange::EMPTY),
                Comparison::GoneForward { deleted_from_bottom, added_from_top, new_size } => {
                    prop_assert_eq!(new_size, b.size());
                    (added_from_top, deleted_from_bottom)
                }
                Comparison::GoneBackward { deleted_from_top, added_from_bottom, new_size } => {
                    prop_assert_eq!(new_size, b.size());
                    (added_from_bottom, deleted_from_top)
                }
            };

            let overlap: Vec<usize> = a.iter().filter(|idx| b.contains(*idx)).collect();

            let mut covers_b: Vec<usize> = indices(added).into_iter().chain(overlap.clone()).collect();
            covers_b.sort_unstable();
            prop_assert_eq!(covers_b, indices(b));

            let mut covers_a: Vec<usize> = indices(deleted).into_iter().chain(overlap).collect();
            covers_a.sort_unstable();
            prop_assert_eq!(covers_a, indices(a));

            prop_assert!(added.iter().all(|idx| !deleted.contains(idx)));
        }
    }
}
