//! Named-event publish/subscribe.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A subscriber callback.
pub type Callback<P> = Rc<dyn Fn(&P)>;

/// Maps event names to ordered lists of subscriber callbacks.
///
/// Registration order is dispatch order. Registering the same callback twice
/// keeps both entries and both run. There is no unsubscribe.
///
/// `publish` runs over a snapshot of the subscriber list, so a callback may
/// subscribe more callbacks (they first run on the next publish) or publish
/// again.
///
/// # Panics
///
/// A subscriber that panics is not caught: the panic unwinds out of
/// [`publish`](EventEmitter::publish) and no later subscriber runs.
///
/// # Example
///
/// ```
/// use picklist_core::EventEmitter;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let emitter = EventEmitter::new();
/// let sink = seen.clone();
/// emitter.subscribe("change", move |label: &String| sink.borrow_mut().push(label.clone()));
///
/// emitter.publish("change", &"B".to_string());
/// assert_eq!(*seen.borrow(), vec!["B".to_string()]);
/// ```
pub struct EventEmitter<P> {
    events: RefCell<HashMap<String, Vec<Callback<P>>>>,
}

impl<P> EventEmitter<P> {
    /// Create an emitter with no subscribers.
    pub fn new() -> Self {
        Self {
            events: RefCell::new(HashMap::new()),
        }
    }

    /// Append `callback` to the subscribers of `event`.
    pub fn subscribe(&self, event: impl Into<String>, callback: impl Fn(&P) + 'static) {
        self.events
            .borrow_mut()
            .entry(event.into())
            .or_default()
            .push(Rc::new(callback));
    }

    /// Call every subscriber of `event` in registration order.
    ///
    /// Returns how many subscribers ran; zero when nobody subscribed.
    pub fn publish(&self, event: &str, payload: &P) -> usize {
        let callbacks = self.callbacks(event);
        for callback in &callbacks {
            callback(payload);
        }
        callbacks.len()
    }

    /// Snapshot of the subscribers of `event`.
    pub fn callbacks(&self, event: &str) -> Vec<Callback<P>> {
        self.events.borrow().get(event).cloned().unwrap_or_default()
    }

    /// Number of subscribers registered for `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.events.borrow().get(event).map_or(0, Vec::len)
    }
}

impl<P> Default for EventEmitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for EventEmitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events = self.events.borrow();
        let mut counts: Vec<_> = events
            .iter()
            .map(|(name, callbacks)| (name.as_str(), callbacks.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventEmitter")
            .field("subscribers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn Fn(&String)>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let make = move |tag: &'static str| -> Box<dyn Fn(&String)> {
            let sink = sink.clone();
            Box::new(move |p: &String| sink.borrow_mut().push(format!("{tag}:{p}")))
        };
        (log, make)
    }

    #[test]
    fn publish_without_subscribers_is_noop() {
        let emitter: EventEmitter<String> = EventEmitter::new();
        assert_eq!(emitter.publish("change", &"x".into()), 0);
    }

    #[test]
    fn dispatch_follows_registration_order() {
        let (log, make) = recorder();
        let emitter = EventEmitter::new();
        emitter.subscribe("change", make("first"));
        emitter.subscribe("change", make("second"));

        assert_eq!(emitter.publish("change", &"B".into()), 2);
        assert_eq!(*log.borrow(), vec!["first:B", "second:B"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        let callback = move |_: &String| *counter.borrow_mut() += 1;

        let emitter = EventEmitter::new();
        emitter.subscribe("change", callback.clone());
        emitter.subscribe("change", callback);
        emitter.publish("change", &String::new());

        assert_eq!(*hits.borrow(), 2);
        assert_eq!(emitter.subscriber_count("change"), 2);
    }

    #[test]
    fn events_are_independent() {
        let (log, make) = recorder();
        let emitter = EventEmitter::new();
        emitter.subscribe("open", make("open"));
        emitter.subscribe("change", make("change"));

        emitter.publish("change", &"A".into());
        assert_eq!(*log.borrow(), vec!["change:A"]);
        assert_eq!(emitter.subscriber_count("close"), 0);
    }

    #[test]
    fn callbacks_snapshot_matches_order() {
        let (log, make) = recorder();
        let emitter = EventEmitter::new();
        emitter.subscribe("change", make("a"));
        emitter.subscribe("change", make("b"));

        for callback in emitter.callbacks("change") {
            callback(&"x".to_string());
        }
        assert_eq!(*log.borrow(), vec!["a:x", "b:x"]);
        assert!(emitter.callbacks("missing").is_empty());
    }

    #[test]
    fn callbacks_may_subscribe_during_publish() {
        let (log, make) = recorder();
        let emitter = Rc::new(EventEmitter::new());
        let inner = Rc::downgrade(&emitter);
        let late = RefCell::new(Some(make("late")));
        emitter.subscribe("change", move |_: &String| {
            if let (Some(emitter), Some(callback)) = (inner.upgrade(), late.borrow_mut().take()) {
                emitter.subscribe("change", callback);
            }
        });

        assert_eq!(emitter.publish("change", &"1".into()), 1);
        assert!(log.borrow().is_empty());
        assert_eq!(emitter.publish("change", &"2".into()), 2);
        assert_eq!(*log.borrow(), vec!["late:2"]);
    }

    #[test]
    #[should_panic(expected = "subscriber failed")]
    fn subscriber_panics_propagate() {
        let emitter = EventEmitter::new();
        emitter.subscribe("change", |_: &String| panic!("subscriber failed"));
        emitter.publish("change", &String::new());
    }
}
