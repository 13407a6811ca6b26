//! Adaptive window policy over the filtered index.
//!
//! The window opens at the tail sized one and a half screens. Paging back
//! grows it by half a screen at a time until it holds three screens, then
//! slides; paging forward always slides. New data only moves the window
//! when it was already showing the newest line.

use crate::window::page_range::PageRange;

#[derive(Debug, Default)]
pub struct Paginator {
    item_count: usize,
    capacity: usize,
    current: PageRange,
}

impl Paginator {
    pub fn new(capacity: usize) -> Self {
        Self {
            item_count: 0,
            capacity,
            current: PageRange::EMPTY,
        }
    }

    /// Set the number of rows the viewport can show. Takes effect on the next reset.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current(&self) -> PageRange {
        self.current
    }

    fn step(&self) -> usize {
        (self.capacity / 2).max(1)
    }

    fn max_window(&self) -> usize {
        self.capacity * 3
    }

    fn first_window(&self) -> usize {
        self.capacity * 3 / 2
    }

    fn tail(&self, size: usize) -> PageRange {
        let size = size.min(self.item_count);
        PageRange::new(self.item_count - size, size)
    }

    /// Jump to a fresh window over the last `item_count` items.
    pub fn reset(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.current = if item_count == 0 || self.capacity == 0 {
            PageRange::EMPTY
        } else {
            self.tail(self.first_window())
        };
    }

    /// Account for `added` new items, following them if the newest item was visible.
    pub fn push(&mut self, added: usize) {
        let was_on_last_page = self.is_on_last_page();
        self.item_count += added;
        if was_on_last_page && self.capacity > 0 {
            let size = self.current.size().max(self.first_window());
            self.current = self.tail(size);
        }
    }

    pub fn is_on_last_page(&self) -> bool {
        match self.current.end() {
            Some(end) => end + 1 >= self.item_count,
            None => true,
        }
    }

    pub fn can_move_forward(&self) -> bool {
        !self.is_on_last_page()
    }

    pub fn can_move_backward(&self) -> bool {
        !self.current.is_empty() && self.current.start() > 0
    }

    /// Slide toward newer items by one step, stopping at the last item.
    pub fn move_forward(&mut self) -> bool {
        if !self.can_move_forward() {
            return false;
        }
        let size = self.current.size();
        let last_start = self.item_count - size;
        let start = (self.current.start() + self.step()).min(last_start);
        self.current = PageRange::new(start, size);
        true
    }

    /// Grow toward older items until the window is at its ceiling, then slide.
    pub fn move_backward(&mut self) -> bool {
        if !self.can_move_backward() {
            return false;
        }
        let start = self.current.start();
        let size = self.current.size();
        let max_window = self.max_window();

        self.current = if size < max_window {
            let grow = self.step().min(start).min(max_window - size);
            PageRange::new(start - grow, size + grow)
        } else {
            let shift = self.step().min(start);
            PageRange::new(start - shift, size)
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_opens_first_window_at_tail() {
        let mut paginator = Paginator::new(10);
        paginator.reset(20);
        assert_eq!(paginator.current(), PageRange::new(5, 15));
        assert_eq!(paginator.current().end(), Some(19));
        assert!(paginator.is_on_last_page());
    }

    #[test]
    fn reset_without_items_or_capacity_is_empty() {
        let mut paginator = Paginator::new(10);
        paginator.reset(0);
        assert!(paginator.current().is_empty());

        let mut unsized_view = Paginator::new(0);
        unsized_view.reset(50);
        assert!(unsized_view.current().is_empty());
    }

    #[test]
    fn small_totals_clamp_window() {
        let mut paginator = Paginator::new(10);
        paginator.reset(4);
        assert_eq!(paginator.current(), PageRange::new(0, 4));
        assert!(!paginator.can_move_backward());
        assert!(!paginator.can_move_forward());
    }

    #[test]
    fn reset_after_paging_back_uses_first_window_not_paged_size() {
        let mut paginator = Paginator::new(10);
        paginator.reset(20);
        assert!(paginator.move_backward());
        assert_eq!(paginator.current().size(), 20);
        // [8..=22], not a five-line [18..=22] carried over from the grown window
        paginator.reset(23);
        assert_eq!(paginator.current().end(), Some(22));
        assert_eq!(paginator.current().size(), 15);
    }

    #[test]
    fn backward_grows_then_slides() {
        let mut paginator = Paginator::new(10);
        paginator.reset(100);
        assert_eq!(paginator.current(), PageRange::new(85, 15));

        let mut sizes = Vec::new();
        while paginator.current().size() < 30 {
            assert!(paginator.move_backward());
            sizes.push(paginator.current().size());
            assert_eq!(paginator.current().end(), Some(99));
        }
        assert_eq!(sizes, vec![20, 25, 30]);

        assert!(paginator.move_backward());
        assert_eq!(paginator.current(), PageRange::new(65, 30));
        assert!(paginator.move_backward());
        assert_eq!(paginator.current(), PageRange::new(60, 30));
    }

    #[test]
    fn backward_stops_at_zero() {
        let mut paginator = Paginator::new(10);
        paginator.reset(18);
        assert_eq!(paginator.current(), PageRange::new(3, 15));
        assert!(paginator.move_backward());
        assert_eq!(paginator.current(), PageRange::new(0, 18));
        assert!(!paginator.move_backward());
    }

    #[test]
    fn forward_slides_without_growing_and_clips_at_tail() {
        let mut paginator = Paginator::new(10);
        paginator.reset(100);
        for _ in 0..6 {
            paginator.move_backward();
        }
        let before = paginator.current();
        assert_eq!(before, PageRange::new(55, 30));

        assert!(paginator.move_forward());
        assert_eq!(paginator.current(), PageRange::new(60, 30));
        while paginator.move_forward() {}
        assert_eq!(paginator.current(), PageRange::new(70, 30));
        assert!(paginator.is_on_last_page());
        assert!(!paginator.move_forward());
    }

    #[test]
    fn push_follows_tail_when_pinned() {
        let mut paginator = Paginator::new(10);
        paginator.reset(20);
        paginator.push(3);
        assert_eq!(paginator.current(), PageRange::new(8, 15));
    }

    #[test]
    fn push_leaves_scrolled_window_alone() {
        let mut paginator = Paginator::new(10);
        paginator.reset(100);
        // growing keeps the newest line visible, sliding does not
        for _ in 0..4 {
            paginator.move_backward();
        }
        assert_eq!(paginator.current(), PageRange::new(65, 30));
        assert!(!paginator.is_on_last_page());

        paginator.push(5);
        assert_eq!(paginator.current(), PageRange::new(65, 30));
        assert_eq!(paginator.item_count(), 105);
    }

    #[test]
    fn push_grows_small_tail_window() {
        let mut paginator = Paginator::new(10);
        paginator.reset(3);
        assert_eq!(paginator.current(), PageRange::new(0, 3));
        paginator.push(20);
        assert_eq!(paginator.current(), PageRange::new(8, 15));
    }

    #[test]
    fn push_into_empty_view_opens_window() {
        let mut paginator = Paginator::new(4);
        paginator.reset(0);
        paginator.push(2);
        assert_eq!(paginator.current(), PageRange::new(0, 2));
    }
}
