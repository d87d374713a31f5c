//! Fixed-size pages over the drawn numbers.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Tracks the 1-indexed page being viewed. The page count is always derived
/// from the current result length, never stored.
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Keep the viewer on the last page when the results grow past it, and
    /// pull the page back into range otherwise.
    pub fn on_grow(&mut self, old_len: usize, new_len: usize) {
        if self.current == self.total_pages(old_len) {
            self.current = self.total_pages(new_len);
        }
        self.clamp(new_len);
    }

    pub fn clamp(&mut self, len: usize) {
        self.current = self.current.clamp(1, self.total_pages(len));
    }

    pub fn next(&mut self, len: usize) -> bool {
        if self.current >= self.total_pages(len) {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn go_to(&mut self, page: usize, len: usize) -> usize {
        self.current = page;
        self.clamp(len);
        self.current
    }

    /// Index range of the current page within a result list of `len` items.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
