//! Timer engine
//!
//! Owns the lifecycle (`Idle → Running → Stopped`), the normalized settings,
//! the tick subscription and event dispatch. Arithmetic is delegated to
//! [`TimeCounter`].
//!
//! # Tick processing
//!
//! 1. Advance the counter one second (up, or down for countdowns)
//! 2. Emit `SecondsUpdated`, then `MinutesUpdated`/`HoursUpdated` if those units changed
//! 3. Invoke the callback if the precision unit changed (every tick for seconds)
//! 4. Check the target; once reached emit `TargetAchieved` and stop
//!
//! The outcome of a tick is computed up front with the engine borrowed, then
//! dispatched with no borrow held. Listeners may call back into the timer;
//! `stop`/`start` from a listener only affect the next tick.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tempo_types::{Precision, TimeUnit, TimeValues};

use super::config::{TimerCallback, TimerConfig, TimerSettings};
use super::events::{EventKind, EventListeners, ListenerId, TimerEvent};
use super::TimerError;
use crate::counter::TimeCounter;
use crate::tick::{Subscription, TICK_INTERVAL, TickSource};

/// Lifecycle state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    /// Never started
    #[default]
    Idle,
    Running,
    /// Stopped explicitly or by reaching the target
    Stopped,
}

struct EngineState {
    status: TimerStatus,
    settings: TimerSettings,
    counter: TimeCounter,
    subscription: Option<Subscription>,
    /// Incremented on every successful start; ticks from older runs are ignored
    cycle: u64,
}

struct Shared {
    state: RefCell<EngineState>,
    listeners: RefCell<EventListeners>,
    ticks: Box<dyn TickSource>,
}

/// Everything a tick needs to dispatch once the engine borrow is released
struct TickOutcome {
    values: TimeValues,
    totals: TimeValues,
    events: Vec<TimerEvent>,
    callback: Option<TimerCallback>,
    achieved: Option<TimeValues>,
}

/// A countable timer.
///
/// Cloning yields another handle to the same timer. The timer lives on a
/// single thread; listeners that need to reach it should capture a
/// [`WeakTimer`] to avoid a reference cycle.
#[derive(Clone)]
pub struct Timer {
    shared: Rc<Shared>,
}

/// Non-owning handle to a [`Timer`]
#[derive(Clone)]
pub struct WeakTimer {
    shared: Weak<Shared>,
}

impl WeakTimer {
    pub fn upgrade(&self) -> Option<Timer> {
        self.shared.upgrade().map(|shared| Timer { shared })
    }
}

impl Timer {
    /// Create an idle timer driven by `ticks`
    pub fn new(ticks: impl TickSource + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(EngineState {
                    status: TimerStatus::Idle,
                    settings: TimerSettings::default(),
                    counter: TimeCounter::new(),
                    subscription: None,
                    cycle: 0,
                }),
                listeners: RefCell::new(EventListeners::default()),
                ticks: Box::new(ticks),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakTimer {
        WeakTimer {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Start a new run.
    ///
    /// If a target is configured and the start values already equal it, the
    /// settings are stored but the timer does not start and emits nothing.
    pub fn start(&self, config: TimerConfig) -> Result<(), TimerError> {
        let (cycle, values) = {
            let mut state = self.shared.state.borrow_mut();
            if state.status == TimerStatus::Running {
                tracing::warn!("start rejected: timer already running");
                return Err(TimerError::AlreadyRunning);
            }

            let settings = TimerSettings::from_config(config)?;
            if settings.starts_at_target() {
                tracing::debug!(
                    start = %settings.start_values,
                    "start values equal target, not starting"
                );
                state.settings = settings;
                return Ok(());
            }

            tracing::debug!(
                precision = %settings.precision,
                countdown = settings.countdown,
                start = %settings.start_values,
                goal = ?settings.target.map(|t| t.to_string()),
                "timer started"
            );

            state.counter = TimeCounter::from_values(settings.start_values);
            state.settings = settings;
            state.status = TimerStatus::Running;
            state.cycle += 1;
            (state.cycle, state.counter.values())
        };

        let timer = self.downgrade();
        let subscription = self.shared.ticks.subscribe(
            TICK_INTERVAL,
            Box::new(move || {
                if let Some(timer) = timer.upgrade() {
                    timer.process_tick(cycle);
                }
            }),
        );

        {
            let mut state = self.shared.state.borrow_mut();
            if state.cycle == cycle && state.status == TimerStatus::Running {
                state.subscription = Some(subscription);
            }
        }

        self.emit(&TimerEvent::Started { values });
        Ok(())
    }

    /// Unsubscribe from the tick source and mark the timer stopped.
    ///
    /// Safe to call in any state; emits no event.
    pub fn stop(&self) {
        if let Some(values) = self.release() {
            tracing::debug!(values = %values, "timer stopped");
        }
    }

    /// Mark the timer stopped and drop its subscription.
    /// Returns the current values if it was running.
    fn release(&self) -> Option<TimeValues> {
        let (was_running, values, subscription) = {
            let mut state = self.shared.state.borrow_mut();
            let was_running = state.status == TimerStatus::Running;
            state.status = TimerStatus::Stopped;
            (was_running, state.counter.values(), state.subscription.take())
        };
        // unsubscribe with no engine borrow held
        drop(subscription);
        was_running.then_some(values)
    }

    pub fn is_running(&self) -> bool {
        self.status() == TimerStatus::Running
    }

    pub fn status(&self) -> TimerStatus {
        self.shared.state.borrow().status
    }

    /// Normalized settings of the current or most recent run
    pub fn config(&self) -> TimerSettings {
        self.shared.state.borrow().settings.clone()
    }

    /// Current `{seconds, minutes, hours}` components
    pub fn time_values(&self) -> TimeValues {
        self.shared.state.borrow().counter.values()
    }

    /// Whole duration expressed at each scale
    pub fn total_time_values(&self) -> TimeValues {
        self.shared.state.borrow().counter.total_values()
    }

    pub fn add_event_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&TimerEvent) + 'static,
    ) -> ListenerId {
        self.shared
            .listeners
            .borrow_mut()
            .add(kind, Rc::new(listener))
    }

    /// Returns false if no listener with this id was registered
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.shared.listeners.borrow_mut().remove(id)
    }

    fn emit(&self, event: &TimerEvent) {
        let listeners = self.shared.listeners.borrow().snapshot(event.kind());
        for listener in listeners {
            listener(event);
        }
    }

    fn process_tick(&self, cycle: u64) {
        let Some(outcome) = self.advance(cycle) else {
            return;
        };

        tracing::trace!(values = %outcome.values, "tick");

        for event in &outcome.events {
            self.emit(event);
        }

        if let Some(callback) = outcome.callback {
            callback(&outcome.values);
        }

        if let Some(target) = outcome.achieved {
            tracing::debug!(values = %outcome.values, goal = %target, "target achieved");
            self.emit(&TimerEvent::TargetAchieved {
                values: outcome.values,
                totals: outcome.totals,
                target,
            });
            // a listener may already have started a new run
            if self.shared.state.borrow().cycle == cycle {
                self.release();
            }
        }
    }

    /// Advance the counter and work out what this tick must dispatch
    fn advance(&self, cycle: u64) -> Option<TickOutcome> {
        let mut guard = self.shared.state.borrow_mut();
        let state = &mut *guard;
        if state.cycle != cycle || state.status != TimerStatus::Running {
            return None;
        }

        let direction = state.settings.direction();
        state.counter.advance(direction);

        let counter = &state.counter;
        let values = counter.values();
        let totals = counter.total_values();

        let mut events = vec![TimerEvent::updated(TimeUnit::Seconds, values, totals)];
        for unit in [TimeUnit::Minutes, TimeUnit::Hours] {
            if counter.unit_crossed(unit) {
                events.push(TimerEvent::updated(unit, values, totals));
            }
        }

        let precision = state.settings.precision;
        let at_precision = match precision {
            Precision::Seconds => true,
            coarser => counter.unit_crossed(coarser.unit()),
        };

        let achieved = state
            .settings
            .target
            .filter(|target| counter.has_reached(target, precision, direction));

        Some(TickOutcome {
            values,
            totals,
            events,
            callback: at_precision.then(|| Rc::clone(&state.settings.callback)),
            achieved,
        })
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("Timer")
            .field("status", &state.status)
            .field("values", &state.counter.values())
            .field("settings", &state.settings)
            .field("listeners", &*self.shared.listeners.borrow())
            .finish()
    }
}
