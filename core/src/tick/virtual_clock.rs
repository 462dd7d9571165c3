//! Manually advanced clock
//!
//! Time only moves when [`VirtualClock::advance`] is called. Every interval
//! that elapses during an advance fires its callback exactly once, in due
//! order, so a 60 second advance on a 1 second subscription fires 60 ticks.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use super::source::{Subscription, TickCallback, TickSource};

const MIN_INTERVAL: Duration = Duration::from_nanos(1);

struct Entry {
    id: u64,
    interval: Duration,
    next_due: Duration,
    callback: Rc<RefCell<TickCallback>>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Deterministic tick source.
///
/// Cloning yields another handle to the same clock.
#[derive(Clone, Default)]
pub struct VirtualClock {
    state: Rc<RefCell<ClockState>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Move time forward, firing every callback that falls due.
    ///
    /// Callbacks run with no clock borrow held, so they may subscribe or
    /// unsubscribe. An unsubscribed callback never fires again, even within
    /// the same advance.
    pub fn advance(&self, by: Duration) {
        let target = self.now().saturating_add(by);

        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.next_due <= target)
                    .min_by_key(|(_, e)| (e.next_due, e.id))
                    .map(|(idx, _)| idx);

                match next {
                    Some(idx) => {
                        let entry = &mut state.entries[idx];
                        let fired_at = entry.next_due;
                        entry.next_due = fired_at.saturating_add(entry.interval);
                        let callback = Rc::clone(&entry.callback);
                        state.now = fired_at;
                        Some(callback)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            match due {
                Some(callback) => (callback.borrow_mut())(),
                None => break,
            }
        }
    }

    /// Advance by a whole number of seconds
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl TickSource for VirtualClock {
    fn subscribe(&self, interval: Duration, on_tick: TickCallback) -> Subscription {
        let interval = interval.max(MIN_INTERVAL);
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            let next_due = state.now.saturating_add(interval);
            state.entries.push(Entry {
                id,
                interval,
                next_due,
                callback: Rc::new(RefCell::new(on_tick)),
            });
            id
        };

        let clock: Weak<RefCell<ClockState>> = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = clock.upgrade() {
                state.borrow_mut().entries.retain(|e| e.id != id);
            }
        })
    }
}

impl fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualClock")
            .field("now", &self.now())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting(clock: &VirtualClock, interval: Duration) -> (Rc<Cell<u32>>, Subscription) {
        let ticks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ticks);
        let sub = clock.subscribe(interval, Box::new(move || counter.set(counter.get() + 1)));
        (ticks, sub)
    }

    #[test]
    fn fires_once_per_elapsed_interval() {
        let clock = VirtualClock::new();
        let (ticks, _sub) = counting(&clock, Duration::from_secs(1));

        clock.advance(Duration::from_millis(999));
        assert_eq!(ticks.get(), 0);

        clock.advance(Duration::from_millis(1));
        assert_eq!(ticks.get(), 1);

        clock.advance_secs(59);
        assert_eq!(ticks.get(), 60);
        assert_eq!(clock.now(), Duration::from_secs(60));
    }

    #[test]
    fn no_ticks_after_unsubscribe() {
        let clock = VirtualClock::new();
        let (ticks, mut sub) = counting(&clock, Duration::from_secs(1));

        clock.advance_secs(3);
        sub.unsubscribe();
        clock.advance_secs(3);

        assert_eq!(ticks.get(), 3);
        assert_eq!(clock.subscriber_count(), 0);
    }

    #[test]
    fn callback_can_unsubscribe_itself_mid_advance() {
        let clock = VirtualClock::new();
        let ticks = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let counter = Rc::clone(&ticks);
        let own = Rc::clone(&slot);
        let sub = clock.subscribe(
            Duration::from_secs(1),
            Box::new(move || {
                counter.set(counter.get() + 1);
                if counter.get() == 2 {
                    if let Some(mut sub) = own.borrow_mut().take() {
                        sub.unsubscribe();
                    }
                }
            }),
        );
        *slot.borrow_mut() = Some(sub);

        clock.advance_secs(10);
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn interleaves_subscriptions_in_due_order() {
        let clock = VirtualClock::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let fast = Rc::clone(&order);
        let _a = clock.subscribe(
            Duration::from_secs(1),
            Box::new(move || fast.borrow_mut().push("fast")),
        );
        let slow = Rc::clone(&order);
        let _b = clock.subscribe(
            Duration::from_secs(2),
            Box::new(move || slow.borrow_mut().push("slow")),
        );

        clock.advance_secs(2);
        assert_eq!(*order.borrow(), vec!["fast", "fast", "slow"]);
    }
}
