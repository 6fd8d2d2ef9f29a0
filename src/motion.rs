//! Shared reduced-motion preference.
//!
//! One `MotionPreference` is created at startup and handed to every
//! consumer. Updates arrive through a single channel whose receiving end is
//! drained by [`drain_updates`].

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener = Box<dyn Fn(bool)>;

pub struct MotionPreference {
    reduced: Cell<bool>,
    listeners: RefCell<Vec<Listener>>,
}

impl MotionPreference {
    pub fn new(reduced: bool) -> Rc<Self> {
        Rc::new(Self {
            reduced: Cell::new(reduced),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced.get()
    }

    /// Register a callback run with the new value after every change.
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Store a new value, notifying listeners only if it differs.
    pub fn set_reduced(&self, reduced: bool) -> bool {
        if self.reduced.replace(reduced) == reduced {
            return false;
        }
        debug!("Reduced motion preference changed to {}", reduced);
        for listener in self.listeners.borrow().iter() {
            listener(reduced);
        }
        true
    }
}

impl std::fmt::Debug for MotionPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MotionPreference")
            .field("reduced", &self.reduced.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Create the change channel for a preference.
pub fn channel() -> (UnboundedSender<bool>, UnboundedReceiver<bool>) {
    unbounded()
}

/// Apply every queued update until all senders are gone.
pub async fn drain_updates(preference: Rc<MotionPreference>, mut updates: UnboundedReceiver<bool>) {
    while let Some(reduced) = updates.next().await {
        preference.set_reduced(reduced);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn listeners_only_hear_real_changes() {
        let pref = MotionPreference::new(false);
        let heard = Rc::new(RefCell::new(Vec::new()));
        {
            let heard = heard.clone();
            pref.subscribe(move |v| heard.borrow_mut().push(v));
        }

        assert!(!pref.set_reduced(false));
        assert!(pref.set_reduced(true));
        assert!(!pref.set_reduced(true));
        assert!(pref.set_reduced(false));

        assert_eq!(*heard.borrow(), vec![true, false]);
        assert!(!pref.is_reduced());
    }

    #[test]
    fn channel_updates_reach_the_preference() {
        let pref = MotionPreference::new(false);
        let changes = Rc::new(Cell::new(0));
        {
            let changes = changes.clone();
            pref.subscribe(move |_| changes.set(changes.get() + 1));
        }

        let (tx, rx) = channel();
        tx.unbounded_send(true).unwrap();
        tx.unbounded_send(true).unwrap();
        tx.unbounded_send(false).unwrap();
        tx.unbounded_send(true).unwrap();
        drop(tx);

        block_on(drain_updates(pref.clone(), rx));
        assert!(pref.is_reduced());
        assert_eq!(changes.get(), 3);
    }
}
