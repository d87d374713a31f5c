//! Available and drawn numbers.
//!
//! Both sequences keep insertion order. A shared index of every known value
//! guarantees that no number is ever present twice across the two.

use std::collections::HashSet;

/// Parse one token the way the input box does.
///
/// Surrounding whitespace is ignored and a leading integer prefix is accepted,
/// so `"12abc"` and `"3.7"` read as `12` and `3`. Tokens without any leading
/// digits (after an optional sign) are rejected.
pub fn parse_number(token: &str) -> Option<i64> {
    let token = token.trim();
    let bytes = token.as_bytes();
    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    token[..end].parse().ok()
}

#[derive(Debug, Default)]
pub struct NumberPool {
    available: Vec<i64>,
    drawn: Vec<i64>,
    known: HashSet<i64>,
}

impl NumberPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(&self) -> &[i64] {
        &self.available
    }

    pub fn drawn(&self) -> &[i64] {
        &self.drawn
    }

    /// Append `value` unless it is already known. Returns whether it was added.
    pub fn insert(&mut self, value: i64) -> bool {
        if !self.known.insert(value) {
            return false;
        }
        self.available.push(value);
        true
    }

    /// Append every value not yet known, in order. Repeats inside `values`
    /// collapse onto their first occurrence.
    pub fn extend<I: IntoIterator<Item = i64>>(&mut self, values: I) -> usize {
        values.into_iter().filter(|v| self.insert(*v)).count()
    }

    /// Drop `value` from the available numbers. Drawn numbers are untouched.
    pub fn remove(&mut self, value: i64) -> bool {
        match self.available.iter().position(|v| *v == value) {
            Some(idx) => {
                self.available.remove(idx);
                self.known.remove(&value);
                true
            }
            None => false,
        }
    }

    /// Empty the available numbers, keeping the drawn ones.
    pub fn clear_available(&mut self) -> usize {
        let removed = self.available.len();
        for value in self.available.drain(..) {
            self.known.remove(&value);
        }
        removed
    }

    /// Move the available number at `index` to the end of the drawn list.
    pub fn take_at(&mut self, index: usize) -> Option<i64> {
        if index >= self.available.len() {
            return None;
        }
        let value = self.available.remove(index);
        self.drawn.push(value);
        Some(value)
    }

    pub fn clear(&mut self) {
        self.available.clear();
        self.drawn.clear();
        self.known.clear();
    }
}
