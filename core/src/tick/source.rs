use std::fmt;
use std::time::Duration;

/// Interval the engine subscribes at, regardless of precision
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback invoked once per elapsed interval
pub type TickCallback = Box<dyn FnMut()>;

/// Something that can invoke a callback at a fixed interval.
///
/// Implementations must not invoke the callback after the returned
/// [`Subscription`] has been unsubscribed or dropped.
pub trait TickSource {
    fn subscribe(&self, interval: Duration, on_tick: TickCallback) -> Subscription;
}

/// Handle to an active tick subscription.
///
/// Unsubscribing is idempotent and also happens on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop receiving ticks
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
