//! Timer events and listener registry
//!
//! Each event kind has its own observer list. Listeners are invoked
//! synchronously in registration order. A dispatch works on a snapshot of
//! the list, so listeners added or removed while it runs only affect the
//! next dispatch.

use std::fmt;
use std::rc::Rc;

use tempo_types::{TimeUnit, TimeValues};

/// Kinds of events a timer emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Started,
    SecondsUpdated,
    MinutesUpdated,
    HoursUpdated,
    TargetAchieved,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Started,
        EventKind::SecondsUpdated,
        EventKind::MinutesUpdated,
        EventKind::HoursUpdated,
        EventKind::TargetAchieved,
    ];

    fn index(&self) -> usize {
        match self {
            EventKind::Started => 0,
            EventKind::SecondsUpdated => 1,
            EventKind::MinutesUpdated => 2,
            EventKind::HoursUpdated => 3,
            EventKind::TargetAchieved => 4,
        }
    }

    /// The update event emitted when `unit` changes
    pub fn updated(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Seconds => EventKind::SecondsUpdated,
            TimeUnit::Minutes => EventKind::MinutesUpdated,
            TimeUnit::Hours => EventKind::HoursUpdated,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Started => "started",
            EventKind::SecondsUpdated => "secondsUpdated",
            EventKind::MinutesUpdated => "minutesUpdated",
            EventKind::HoursUpdated => "hoursUpdated",
            EventKind::TargetAchieved => "targetAchieved",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event with its payload.
///
/// `values` are the current components, `totals` the cumulative values at
/// each scale (see `Timer::total_time_values`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    Started {
        values: TimeValues,
    },
    SecondsUpdated {
        values: TimeValues,
        totals: TimeValues,
    },
    MinutesUpdated {
        values: TimeValues,
        totals: TimeValues,
    },
    HoursUpdated {
        values: TimeValues,
        totals: TimeValues,
    },
    TargetAchieved {
        values: TimeValues,
        totals: TimeValues,
        target: TimeValues,
    },
}

impl TimerEvent {
    /// Update event for `unit`
    pub fn updated(unit: TimeUnit, values: TimeValues, totals: TimeValues) -> Self {
        match unit {
            TimeUnit::Seconds => TimerEvent::SecondsUpdated { values, totals },
            TimeUnit::Minutes => TimerEvent::MinutesUpdated { values, totals },
            TimeUnit::Hours => TimerEvent::HoursUpdated { values, totals },
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            TimerEvent::Started { .. } => EventKind::Started,
            TimerEvent::SecondsUpdated { .. } => EventKind::SecondsUpdated,
            TimerEvent::MinutesUpdated { .. } => EventKind::MinutesUpdated,
            TimerEvent::HoursUpdated { .. } => EventKind::HoursUpdated,
            TimerEvent::TargetAchieved { .. } => EventKind::TargetAchieved,
        }
    }

    /// Current components at the time of the event
    pub fn values(&self) -> TimeValues {
        match self {
            TimerEvent::Started { values }
            | TimerEvent::SecondsUpdated { values, .. }
            | TimerEvent::MinutesUpdated { values, .. }
            | TimerEvent::HoursUpdated { values, .. }
            | TimerEvent::TargetAchieved { values, .. } => *values,
        }
    }
}

/// Listener invoked with the dispatched event
pub type Listener = Rc<dyn Fn(&TimerEvent)>;

/// Handle for removing a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Observer lists, one per [`EventKind`]
#[derive(Default)]
pub(crate) struct EventListeners {
    next_id: u64,
    lists: [Vec<(ListenerId, Listener)>; 5],
}

impl EventListeners {
    pub fn add(&mut self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.lists[kind.index()].push((id, listener));
        id
    }

    /// Returns false if the listener was not registered
    pub fn remove(&mut self, id: ListenerId) -> bool {
        for list in &mut self.lists {
            if let Some(pos) = list.iter().position(|(lid, _)| *lid == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Listeners for `kind`, in registration order
    pub fn snapshot(&self, kind: EventKind) -> Vec<Listener> {
        self.lists[kind.index()]
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.lists[kind.index()].len()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind.as_str(), &self.len(kind));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = Rc::clone(log);
        Rc::new(move |_: &TimerEvent| log.borrow_mut().push(name))
    }

    #[test]
    fn snapshot_preserves_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = EventListeners::default();
        listeners.add(EventKind::Started, recorder(&log, "first"));
        listeners.add(EventKind::Started, recorder(&log, "second"));
        listeners.add(EventKind::SecondsUpdated, recorder(&log, "other"));

        let event = TimerEvent::Started {
            values: TimeValues::ZERO,
        };
        for listener in listeners.snapshot(EventKind::Started) {
            listener(&event);
        }

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn remove_only_affects_matching_listener() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = EventListeners::default();
        let first = listeners.add(EventKind::HoursUpdated, recorder(&log, "first"));
        listeners.add(EventKind::HoursUpdated, recorder(&log, "second"));

        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        assert_eq!(listeners.len(EventKind::HoursUpdated), 1);
    }

    #[test]
    fn event_kind_matches_variant() {
        let values = TimeValues::new(1, 2, 3);
        for unit in TimeUnit::ALL {
            let event = TimerEvent::updated(unit, values, values);
            assert_eq!(event.kind(), EventKind::updated(unit));
            assert_eq!(event.values(), values);
        }
    }
}
