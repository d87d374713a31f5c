//! The draw engine: number pool, draw state machine and result pages.
//!
//! A draw has two halves. Starting it puts the engine in [`DrawState::Drawing`]
//! and hands out a [`SessionToken`]; the caller schedules a timer and, when it
//! fires, passes the token back to [`DrawEngine::resolve_draw`]. Only the most
//! recently issued token is accepted, so at most one draw is outstanding and a
//! timer that survives a [`DrawEngine::reset`] cannot touch the new state.

pub mod error;
pub mod import;
pub mod pager;
pub mod pool;
pub mod random;

pub use error::Rejected;
pub use random::{IndexSource, ThreadRngSource};

use pager::Pager;
use pool::{parse_number, NumberPool};
use tracing::{debug, info, warn};

/// Default cap on how many numbers one `add_range` call may add.
pub const DEFAULT_MAX_RANGE_LEN: u64 = 100_000;

/// Lifecycle of the current draw session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawState {
    Idle,
    /// Spinning. `remaining` counts this draw and any that follow it.
    Drawing { remaining: usize, auto: bool },
    /// Pause between two draws of an auto sequence.
    AutoDrawing { remaining: usize },
}

/// Identifies one scheduled step of a draw session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken {
    epoch: u64,
    step: u64,
}

/// What part of the engine state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Pool,
    Results,
    Session,
}

/// A finished draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub value: i64,
    /// 1-based position of `value` in the results.
    pub ordinal: usize,
    /// Token for the next auto-draw step, if the sequence continues.
    pub next: Option<SessionToken>,
}

type ChangeListener = Box<dyn FnMut(Change)>;
type ResolvedCallback = Box<dyn FnMut(i64)>;

pub struct DrawEngine {
    pool: NumberPool,
    pager: Pager,
    state: DrawState,
    rng: Box<dyn IndexSource>,
    max_range_len: u64,
    epoch: u64,
    step: u64,
    pending: Option<SessionToken>,
    listeners: Vec<ChangeListener>,
    on_resolved: Option<ResolvedCallback>,
}

impl DrawEngine {
    pub fn new(page_size: usize) -> Self {
        Self::with_source(page_size, Box::new(ThreadRngSource))
    }

    pub fn with_source(page_size: usize, rng: Box<dyn IndexSource>) -> Self {
        Self {
            pool: NumberPool::new(),
            pager: Pager::new(page_size),
            state: DrawState::Idle,
            rng,
            max_range_len: DEFAULT_MAX_RANGE_LEN,
            epoch: 0,
            step: 0,
            pending: None,
            listeners: Vec::new(),
            on_resolved: None,
        }
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(Change) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Set the callback that receives each resolved value. Replaces any
    /// previous one.
    pub fn on_resolved(&mut self, callback: impl FnMut(i64) + 'static) {
        self.on_resolved = Some(Box::new(callback));
    }

    pub fn set_max_range_len(&mut self, max: u64) {
        self.max_range_len = max;
    }

    // ---- Pool management ----

    pub fn add_one(&mut self, raw: &str) -> Result<i64, Rejected> {
        self.ensure_idle()?;
        let value = parse_number(raw).ok_or_else(|| Rejected::InvalidNumber(raw.trim().to_string()))?;
        if !self.pool.insert(value) {
            return Err(Rejected::Duplicate(value));
        }
        debug!(value, "added number");
        self.notify(Change::Pool);
        Ok(value)
    }

    /// Add every number in a comma-separated list. Invalid tokens and repeats
    /// are skipped; returns how many numbers were added.
    pub fn add_many(&mut self, raw: &str) -> Result<usize, Rejected> {
        self.extend(import::parse_batch(raw), "batch")
    }

    pub fn add_range(&mut self, lo: i64, hi: i64) -> Result<usize, Rejected> {
        self.ensure_idle()?;
        if lo > hi {
            return Err(Rejected::EmptyRange { lo, hi });
        }
        let len = hi.abs_diff(lo).saturating_add(1);
        if len > self.max_range_len {
            return Err(Rejected::RangeTooLarge { len, max: self.max_range_len });
        }
        self.extend(lo..=hi, "range")
    }

    /// Add the numbers found in an import file's text.
    pub fn import_from(&mut self, raw_text: &str) -> Result<usize, Rejected> {
        self.extend(import::parse_import(raw_text), "import")
    }

    pub fn remove(&mut self, value: i64) -> Result<(), Rejected> {
        self.ensure_idle()?;
        if !self.pool.remove(value) {
            return Err(Rejected::NotInPool(value));
        }
        debug!(value, "removed number");
        self.notify(Change::Pool);
        Ok(())
    }

    /// Empty the pool. Drawn numbers are kept.
    pub fn clear_pool(&mut self) -> Result<usize, Rejected> {
        self.ensure_idle()?;
        let removed = self.pool.clear_available();
        if removed > 0 {
            debug!(removed, "cleared pool");
            self.notify(Change::Pool);
        }
        Ok(removed)
    }

    fn extend<I: IntoIterator<Item = i64>>(&mut self, values: I, source: &str) -> Result<usize, Rejected> {
        self.ensure_idle()?;
        let added = self.pool.extend(values);
        debug!(added, source, "extended pool");
        if added > 0 {
            self.notify(Change::Pool);
        }
        Ok(added)
    }

    // ---- Draw state machine ----

    pub fn start_single_draw(&mut self) -> Result<SessionToken, Rejected> {
        self.ensure_idle()?;
        if self.pool.available().is_empty() {
            return Err(Rejected::EmptyPool);
        }
        self.state = DrawState::Drawing { remaining: 1, auto: false };
        Ok(self.begin_step())
    }

    /// Start a sequence of `count` draws. The pool must hold at least `count`
    /// numbers.
    pub fn start_auto_draw(&mut self, count: usize) -> Result<SessionToken, Rejected> {
        self.ensure_idle()?;
        let available = self.pool.available().len();
        if available == 0 {
            return Err(Rejected::EmptyPool);
        }
        if count == 0 || count > available {
            return Err(Rejected::AutoCountOutOfRange { requested: count, available });
        }
        info!(count, "starting auto draw");
        self.state = DrawState::Drawing { remaining: count, auto: true };
        Ok(self.begin_step())
    }

    /// Finish the spinning draw identified by `token`: pick a number from the
    /// pool as it is now and move it to the results.
    pub fn resolve_draw(&mut self, token: SessionToken) -> Result<Resolution, Rejected> {
        self.accept(token)?;
        let DrawState::Drawing { remaining, auto } = self.state else {
            return Err(Rejected::OutOfPhase);
        };

        let len = self.pool.available().len();
        if len == 0 {
            self.finish();
            return Err(Rejected::EmptyPool);
        }
        let index = self.rng.pick(len).min(len - 1);
        let old_len = self.pool.drawn().len();
        let Some(value) = self.pool.take_at(index) else {
            self.finish();
            return Err(Rejected::EmptyPool);
        };
        let ordinal = old_len + 1;
        self.pager.on_grow(old_len, ordinal);
        info!(value, ordinal, "number drawn");

        let next = if auto && remaining > 1 && !self.pool.available().is_empty() {
            self.state = DrawState::AutoDrawing { remaining: remaining - 1 };
            Some(self.begin_step())
        } else {
            self.finish();
            None
        };

        self.notify(Change::Pool);
        self.notify(Change::Results);
        if let Some(callback) = self.on_resolved.as_mut() {
            callback(value);
        }
        Ok(Resolution { value, ordinal, next })
    }

    /// Start the next spin of an auto sequence after its pause.
    pub fn continue_auto(&mut self, token: SessionToken) -> Result<SessionToken, Rejected> {
        self.accept(token)?;
        let DrawState::AutoDrawing { remaining } = self.state else {
            return Err(Rejected::OutOfPhase);
        };
        if self.pool.available().is_empty() {
            self.finish();
            return Err(Rejected::EmptyPool);
        }
        self.state = DrawState::Drawing { remaining, auto: true };
        Ok(self.begin_step())
    }

    /// Clear everything and invalidate any scheduled timers.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.pager.reset();
        self.state = DrawState::Idle;
        self.pending = None;
        self.epoch += 1;
        info!(epoch = self.epoch, "engine reset");
        self.notify(Change::Pool);
        self.notify(Change::Results);
        self.notify(Change::Session);
    }

    fn ensure_idle(&self) -> Result<(), Rejected> {
        if self.is_busy() {
            return Err(Rejected::Busy);
        }
        Ok(())
    }

    fn begin_step(&mut self) -> SessionToken {
        self.step += 1;
        let token = SessionToken { epoch: self.epoch, step: self.step };
        self.pending = Some(token);
        self.notify(Change::Session);
        token
    }

    fn accept(&mut self, token: SessionToken) -> Result<(), Rejected> {
        if self.pending != Some(token) {
            warn!(?token, pending = ?self.pending, "ignoring stale draw timer");
            return Err(Rejected::StaleCallback);
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.state = DrawState::Idle;
        self.pending = None;
        self.notify(Change::Session);
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }

    // ---- Queries ----

    pub fn pool(&self) -> &[i64] {
        self.pool.available()
    }

    pub fn results(&self) -> &[i64] {
        self.pool.drawn()
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state != DrawState::Idle
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.state, DrawState::Drawing { .. })
    }

    /// Draws left in the running auto sequence, including one in flight.
    pub fn auto_remaining(&self) -> Option<usize> {
        match self.state {
            DrawState::Drawing { remaining, auto: true } | DrawState::AutoDrawing { remaining } => Some(remaining),
            _ => None,
        }
    }

    pub fn available(&self) -> usize {
        self.pool.available().len()
    }

    pub fn selected(&self) -> usize {
        self.pool.drawn().len()
    }

    pub fn total(&self) -> usize {
        self.available() + self.selected()
    }

    /// Every number has been drawn and nothing is left.
    pub fn is_exhausted(&self) -> bool {
        self.available() == 0 && self.selected() > 0
    }

    // ---- Result pages ----

    pub fn page(&self) -> usize {
        self.pager.current()
    }

    pub fn page_size(&self) -> usize {
        self.pager.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.selected())
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.pager.next(self.selected());
        if moved {
            self.notify(Change::Results);
        }
        moved
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.pager.prev();
        if moved {
            self.notify(Change::Results);
        }
        moved
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        let page = self.pager.go_to(page, self.selected());
        self.notify(Change::Results);
        page
    }

    pub fn page_items(&self) -> &[i64] {
        let drawn = self.pool.drawn();
        &drawn[self.pager.window(drawn.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::random::ScriptedSource;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine_with(picks: Vec<usize>) -> DrawEngine {
        DrawEngine::with_source(100, Box::new(ScriptedSource::new(picks)))
    }

    fn draw_once(engine: &mut DrawEngine) -> Resolution {
        let token = engine.start_single_draw().unwrap();
        engine.resolve_draw(token).unwrap()
    }

    #[test]
    fn test_draw_scenario_with_fixed_index() {
        let mut engine = engine_with(vec![1]);
        engine.add_many("5, 3, 9").unwrap();
        let res = draw_once(&mut engine);
        assert_eq!(res.value, 3);
        assert_eq!(res.ordinal, 1);
        assert_eq!(res.next, None);
        assert_eq!(engine.pool(), &[5, 9]);
        assert_eq!(engine.results(), &[3]);
        assert_eq!(engine.state(), DrawState::Idle);
    }

    #[test]
    fn test_add_many_dedupes_within_batch() {
        let mut engine = engine_with(vec![0]);
        assert_eq!(engine.add_many("1, 2, 2, 3"), Ok(3));
        assert_eq!(engine.pool(), &[1, 2, 3]);
    }

    #[test]
    fn test_add_one_rejections() {
        let mut engine = engine_with(vec![0]);
        assert_eq!(engine.add_one("7"), Ok(7));
        assert_eq!(engine.add_one("7"), Err(Rejected::Duplicate(7)));
        assert_eq!(engine.add_one(" nope "), Err(Rejected::InvalidNumber("nope".into())));
        draw_once(&mut engine);
        assert_eq!(engine.add_one("7"), Err(Rejected::Duplicate(7)));
        assert!(engine.pool().is_empty());
    }

    #[test]
    fn test_no_duplicates_across_pool_and_results() {
        let mut engine = engine_with(vec![3, 0, 7]);
        engine.add_range(1, 10).unwrap();
        draw_once(&mut engine);
        draw_once(&mut engine);
        engine.add_many("1,2,3,4,5,11,11").unwrap();
        engine.import_from("9\n10,12\t13\n12").unwrap();
        engine.add_range(5, 15).unwrap();

        let mut all: Vec<i64> = engine.pool().iter().chain(engine.results()).copied().collect();
        let len = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), len);
        assert_eq!(engine.total(), 15);
    }

    #[test]
    fn test_add_range_preserves_order_and_skips_known() {
        let mut engine = engine_with(vec![0]);
        engine.add_many("3, 100").unwrap();
        assert_eq!(engine.add_range(1, 5), Ok(4));
        assert_eq!(engine.pool(), &[3, 100, 1, 2, 4, 5]);
    }

    #[test]
    fn test_rejected_ranges_leave_state_unchanged() {
        let mut engine = engine_with(vec![0]);
        engine.set_max_range_len(10);
        engine.add_range(1, 4).unwrap();
        draw_once(&mut engine);
        let pool = engine.pool().to_vec();
        let results = engine.results().to_vec();

        assert_eq!(engine.add_range(5, 1), Err(Rejected::EmptyRange { lo: 5, hi: 1 }));
        assert_eq!(
            engine.add_range(1, 11),
            Err(Rejected::RangeTooLarge { len: 11, max: 10 })
        );
        assert_eq!(
            engine.add_range(i64::MIN, i64::MAX),
            Err(Rejected::RangeTooLarge { len: u64::MAX, max: 10 })
        );
        assert_eq!(engine.pool(), pool.as_slice());
        assert_eq!(engine.results(), results.as_slice());

        assert_eq!(engine.add_range(5, 14), Ok(10));
    }

    #[test]
    fn test_default_range_limit() {
        let mut engine = engine_with(vec![0]);
        assert_eq!(
            engine.add_range(1, 99_999_999_999),
            Err(Rejected::RangeTooLarge { len: 99_999_999_999, max: DEFAULT_MAX_RANGE_LEN })
        );
        assert!(engine.pool().is_empty());
        assert_eq!(engine.add_range(1, 1000), Ok(1000));
    }

    #[test]
    fn test_remove_and_clear_pool() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 4).unwrap();
        draw_once(&mut engine);
        assert_eq!(engine.remove(3), Ok(()));
        assert_eq!(engine.remove(3), Err(Rejected::NotInPool(3)));
        assert_eq!(engine.remove(1), Err(Rejected::NotInPool(1)));
        assert_eq!(engine.clear_pool(), Ok(2));
        assert!(engine.pool().is_empty());
        assert_eq!(engine.results(), &[1]);
    }

    #[test]
    fn test_single_draw_is_guarded_while_busy() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 3).unwrap();
        let token = engine.start_single_draw().unwrap();
        assert_eq!(engine.start_single_draw(), Err(Rejected::Busy));
        assert_eq!(engine.start_auto_draw(1), Err(Rejected::Busy));
        assert_eq!(engine.add_one("9"), Err(Rejected::Busy));
        assert_eq!(engine.pool(), &[1, 2, 3]);
        assert!(engine.results().is_empty());

        engine.resolve_draw(token).unwrap();
        assert_eq!(engine.resolve_draw(token), Err(Rejected::StaleCallback));
        assert_eq!(engine.results(), &[1]);
    }

    #[test]
    fn test_draw_on_empty_pool_is_rejected() {
        let mut engine = engine_with(vec![0]);
        assert_eq!(engine.start_single_draw(), Err(Rejected::EmptyPool));
        assert_eq!(engine.start_auto_draw(1), Err(Rejected::EmptyPool));
        assert_eq!(engine.state(), DrawState::Idle);
    }

    #[test]
    fn test_auto_draw_count_out_of_range_changes_nothing() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 3).unwrap();
        assert_eq!(
            engine.start_auto_draw(4),
            Err(Rejected::AutoCountOutOfRange { requested: 4, available: 3 })
        );
        assert_eq!(
            engine.start_auto_draw(0),
            Err(Rejected::AutoCountOutOfRange { requested: 0, available: 3 })
        );
        assert_eq!(engine.state(), DrawState::Idle);
        assert_eq!(engine.pool(), &[1, 2, 3]);
        assert!(engine.start_single_draw().is_ok());
    }

    #[test]
    fn test_auto_draw_sequence() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 5).unwrap();
        let mut token = engine.start_auto_draw(3).unwrap();
        assert_eq!(engine.auto_remaining(), Some(3));

        let mut drawn = Vec::new();
        loop {
            let res = engine.resolve_draw(token).unwrap();
            drawn.push(res.value);
            match res.next {
                Some(next) => {
                    assert!(matches!(engine.state(), DrawState::AutoDrawing { .. }));
                    assert_eq!(engine.start_single_draw(), Err(Rejected::Busy));
                    assert_eq!(engine.resolve_draw(next), Err(Rejected::OutOfPhase));
                    token = engine.continue_auto(next).unwrap();
                }
                None => break,
            }
        }

        assert_eq!(drawn, vec![1, 2, 3]);
        assert_eq!(engine.pool(), &[4, 5]);
        assert_eq!(engine.state(), DrawState::Idle);
        assert_eq!(engine.auto_remaining(), None);
    }

    #[test]
    fn test_auto_draw_of_whole_pool_ends_idle() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 2).unwrap();
        let token = engine.start_auto_draw(2).unwrap();
        let first = engine.resolve_draw(token).unwrap();
        let token = engine.continue_auto(first.next.unwrap()).unwrap();
        let second = engine.resolve_draw(token).unwrap();
        assert_eq!(second.next, None);
        assert!(engine.is_exhausted());
        assert_eq!(engine.state(), DrawState::Idle);
    }

    #[test]
    fn test_reset_suppresses_stale_timers() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 5).unwrap();
        let token = engine.start_auto_draw(3).unwrap();
        let res = engine.resolve_draw(token).unwrap();
        let next = res.next.unwrap();

        engine.reset();
        assert!(engine.pool().is_empty());
        assert!(engine.results().is_empty());
        assert_eq!(engine.state(), DrawState::Idle);
        assert_eq!(engine.page(), 1);

        engine.add_range(10, 12).unwrap();
        let fresh = engine.start_single_draw().unwrap();
        assert_eq!(engine.continue_auto(next), Err(Rejected::StaleCallback));
        assert_eq!(engine.resolve_draw(token), Err(Rejected::StaleCallback));
        assert_eq!(engine.pool(), &[10, 11, 12]);
        assert!(engine.resolve_draw(fresh).is_ok());
    }

    #[test]
    fn test_size_is_conserved_by_draws() {
        let mut engine = engine_with(vec![2, 1, 0]);
        engine.add_range(1, 6).unwrap();
        for _ in 0..6 {
            let before = (engine.available(), engine.selected());
            let res = draw_once(&mut engine);
            assert_eq!(engine.available(), before.0 - 1);
            assert_eq!(engine.selected(), before.1 + 1);
            assert!(engine.results().contains(&res.value));
            assert!(!engine.pool().contains(&res.value));
            assert_eq!(engine.total(), 6);
        }
        assert!(engine.is_exhausted());
    }

    #[test]
    fn test_pagination_over_250_results() {
        let mut engine = engine_with(vec![0]);
        engine.add_range(1, 250).unwrap();
        for _ in 0..250 {
            draw_once(&mut engine);
        }
        assert_eq!(engine.total_pages(), 3);
        assert_eq!(engine.page(), 3);
        assert_eq!(engine.page_items().len(), 50);
        assert_eq!(engine.page_items()[0], 201);
        assert_eq!(engine.go_to_page(4), 3);
        assert!(!engine.next_page());
        assert!(engine.prev_page());
        assert_eq!(engine.page_items().len(), 100);
    }

    #[test]
    fn test_listeners_and_resolved_callback() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let resolved = Rc::new(RefCell::new(Vec::new()));
        let mut engine = engine_with(vec![0]);
        {
            let changes = changes.clone();
            engine.subscribe(move |c| changes.borrow_mut().push(c));
            let resolved = resolved.clone();
            engine.on_resolved(move |v| resolved.borrow_mut().push(v));
        }

        engine.add_one("42").unwrap();
        let _ = engine.add_one("42");
        draw_once(&mut engine);

        assert_eq!(*resolved.borrow(), vec![42]);
        let changes = changes.borrow();
        assert_eq!(changes[0], Change::Pool);
        assert_eq!(changes.iter().filter(|c| **c == Change::Pool).count(), 2);
        assert!(changes.contains(&Change::Results));
        assert!(changes.contains(&Change::Session));
    }
}
