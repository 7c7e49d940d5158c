//! Progress indicator shared between the pipeline and the surface.
//!
//! Within a run the value only goes up: every update is a monotonic max, so a
//! late, lower milestone from one of the concurrent calls cannot pull it back.

use tokio::sync::watch;

pub const PROGRESS_START: u8 = 10;
pub const PROGRESS_DISPATCHED: u8 = 20;
pub const PROGRESS_TRENDS_DONE: u8 = 40;
pub const PROGRESS_RECORD_DONE: u8 = 60;
pub const PROGRESS_ANALYZING: u8 = 70;
pub const PROGRESS_ANALYZED: u8 = 90;
pub const PROGRESS_COMPLETE: u8 = 100;

pub struct ProgressTracker {
    tx: watch::Sender<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    pub fn current(&self) -> u8 {
        *self.tx.borrow()
    }

    /// Raises the value to at least `pct` (clamped to 100). Never lowers it.
    pub fn raise_to(&self, pct: u8) {
        let pct = pct.min(PROGRESS_COMPLETE);
        self.tx.send_if_modified(|current| {
            if pct > *current {
                *current = pct;
                true
            } else {
                false
            }
        });
    }

    /// Back to zero. Only called between runs.
    pub fn reset(&self) {
        self.tx.send_if_modified(|current| {
            let changed = *current != 0;
            *current = 0;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<u8> {
        self.tx.subscribe()
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_is_monotonic_for_out_of_order_milestones() {
        let progress = ProgressTracker::new();
        progress.raise_to(PROGRESS_START);
        progress.raise_to(PROGRESS_RECORD_DONE);
        progress.raise_to(PROGRESS_TRENDS_DONE);
        assert_eq!(progress.current(), PROGRESS_RECORD_DONE);
    }

    #[test]
    fn test_every_milestone_order_is_non_decreasing() {
        let orders = [
            [PROGRESS_TRENDS_DONE, PROGRESS_RECORD_DONE],
            [PROGRESS_RECORD_DONE, PROGRESS_TRENDS_DONE],
        ];
        for order in orders {
            let progress = ProgressTracker::new();
            let mut seen = vec![progress.current()];
            for step in [PROGRESS_START, PROGRESS_DISPATCHED]
                .into_iter()
                .chain(order)
                .chain([PROGRESS_ANALYZING, PROGRESS_ANALYZED, PROGRESS_COMPLETE])
            {
                progress.raise_to(step);
                seen.push(progress.current());
            }
            assert!(seen.windows(2).all(|w| w[0] <= w[1]), "{seen:?}");
            assert_eq!(progress.current(), PROGRESS_COMPLETE);
        }
    }

    #[test]
    fn test_values_above_hundred_are_clamped() {
        let progress = ProgressTracker::new();
        progress.raise_to(250);
        assert_eq!(progress.current(), 100);
    }

    #[test]
    fn test_subscribers_see_changes_but_not_no_ops() {
        let progress = ProgressTracker::new();
        let mut rx = progress.subscribe();

        progress.raise_to(PROGRESS_RECORD_DONE);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), PROGRESS_RECORD_DONE);

        progress.raise_to(PROGRESS_TRENDS_DONE);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let progress = ProgressTracker::new();
        progress.raise_to(PROGRESS_ANALYZED);
        progress.reset();
        assert_eq!(progress.current(), 0);
    }
}
