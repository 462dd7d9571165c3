//! Wall-clock tick source backed by tokio

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use super::source::{Subscription, TickCallback, TickSource};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fires callbacks from a `tokio::time::interval` running on the current thread.
///
/// Subscribing spawns a local task, so it must happen inside a
/// `tokio::task::LocalSet`. Late ticks are delivered in a burst rather than
/// skipped, so a stalled thread never loses time.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalTicker;

impl TickSource for IntervalTicker {
    fn subscribe(&self, interval: Duration, mut on_tick: TickCallback) -> Subscription {
        let interval = interval.max(MIN_INTERVAL);
        let active = Rc::new(Cell::new(true));
        let task_active = Rc::clone(&active);

        let handle = tokio::task::spawn_local(async move {
            let mut ticks = tokio::time::interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                ticks.tick().await;
                // abort() only lands at the next yield; a burst may not yield
                if !task_active.get() {
                    break;
                }
                on_tick();
            }
        });

        tracing::trace!(?interval, "interval ticker subscribed");

        Subscription::new(move || {
            active.set(false);
            handle.abort();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::TICK_INTERVAL;
    use tokio::task::LocalSet;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_interval_until_unsubscribed() {
        LocalSet::new()
            .run_until(async {
                let ticks = Rc::new(Cell::new(0));
                let counter = Rc::clone(&ticks);
                let mut sub = IntervalTicker.subscribe(
                    TICK_INTERVAL,
                    Box::new(move || counter.set(counter.get() + 1)),
                );

                tokio::time::sleep(Duration::from_millis(3500)).await;
                assert_eq!(ticks.get(), 3);

                sub.unsubscribe();
                tokio::time::sleep(Duration::from_secs(5)).await;
                assert_eq!(ticks.get(), 3);
            })
            .await;
    }
}
