//! Debounced change capture: scene notifications in, history pushes out.
//!
//! DESIGN
//! ======
//! Every "object added" or "object modified" notification cancels the pending
//! timer (if any) and starts a new one. When a timer survives the full quiet
//! period the current scene is encoded and pushed onto the history stack, so
//! a burst of drag updates becomes exactly one entry. At most one timer is
//! live at a time.
//!
//! `flush` captures a pending change immediately. The session calls it before
//! undo, redo, and the style appliers so an uncommitted edit gets its own
//! entry and a late timer can never truncate a redo branch. `cancel` drops
//! the pending change instead; clear, load, and manual push use it because
//! they record the scene themselves.
//!
//! While a history navigation holds the capture (see [`ChangeCapture::hold`]),
//! timers that come due are deferred rather than pushed. When the navigation
//! settles, deferred edits are discarded if the import replaced the scene and
//! captured if it did not.
//!
//! The capture keeps only a weak reference to the surface because the surface
//! in turn owns the change listener that points back here.

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use scene::{ChangeListener, SceneEvent};
use tracing::{debug, warn};

use crate::history::HistoryStack;
use crate::snapshot;
use crate::surface::Surface;
use crate::timer::{self, TimerHandle};

/// Debounce policy feeding a [`HistoryStack`].
pub struct ChangeCapture<S: Surface + 'static> {
    inner: Rc<Inner<S>>,
}

struct Inner<S: Surface> {
    surface: Weak<RefCell<S>>,
    history: Rc<RefCell<HistoryStack>>,
    delay: Duration,
    pending: RefCell<Option<TimerHandle>>,
    held: Cell<bool>,
    deferred: Cell<bool>,
}

/// A history navigation in flight. Released on drop.
pub struct Hold<'a, S: Surface + 'static> {
    inner: &'a Inner<S>,
}

impl<S: Surface + 'static> Hold<'_, S> {
    /// End the navigation. `applied` means the import replaced the scene, so
    /// edits made meanwhile are gone and their pending capture is dropped.
    /// Otherwise those edits are still live and are captured now.
    pub fn settle(self, applied: bool) {
        let armed = self.inner.pending.borrow_mut().take().map(TimerHandle::cancel).is_some();
        let deferred = self.inner.deferred.replace(false);
        if !(armed || deferred) {
            return;
        }
        if applied {
            debug!("edits made during navigation discarded");
        } else {
            self.inner.capture();
        }
    }
}

impl<S: Surface + 'static> Drop for Hold<'_, S> {
    fn drop(&mut self) {
        self.inner.held.set(false);
    }
}

impl<S: Surface + 'static> ChangeCapture<S> {
    #[must_use]
    pub fn new(surface: &Rc<RefCell<S>>, history: Rc<RefCell<HistoryStack>>, delay: Duration) -> Self {
        Self {
            inner: Rc::new(Inner {
                surface: Rc::downgrade(surface),
                history,
                delay,
                pending: RefCell::new(None),
                held: Cell::new(false),
                deferred: Cell::new(false),
            }),
        }
    }

    /// Listener to register with the surface via `on_change`.
    #[must_use]
    pub fn listener(&self) -> ChangeListener {
        let weak = Rc::downgrade(&self.inner);
        Box::new(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.observe(event);
            }
        })
    }

    /// (Re)start the debounce timer.
    pub fn notify(&self) {
        self.inner.restart();
    }

    /// Capture a pending change now. Returns false if nothing was pending.
    pub fn flush(&self) -> bool {
        let Some(handle) = self.inner.pending.borrow_mut().take() else {
            return false;
        };
        handle.cancel();
        self.inner.capture();
        true
    }

    /// Drop a pending change without capturing it.
    pub fn cancel(&self) -> bool {
        match self.inner.pending.borrow_mut().take() {
            Some(handle) => {
                handle.cancel();
                debug!("pending capture cancelled");
                true
            }
            None => false,
        }
    }

    /// Mark a navigation in flight. Returns `None` if one already is.
    #[must_use]
    pub fn hold(&self) -> Option<Hold<'_, S>> {
        if self.inner.held.replace(true) {
            return None;
        }
        self.inner.deferred.set(false);
        Some(Hold { inner: &self.inner })
    }

    #[must_use]
    pub fn is_held(&self) -> bool {
        self.inner.held.get()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.borrow().is_some()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl<S: Surface + 'static> Inner<S> {
    fn observe(self: &Rc<Self>, event: &SceneEvent) {
        match event {
            SceneEvent::ObjectAdded(_) | SceneEvent::ObjectModified(_) => self.restart(),
            SceneEvent::ObjectRemoved(_) => {}
        }
    }

    fn restart(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = timer::schedule(self.delay, move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending.borrow_mut().take();
                if inner.held.get() {
                    inner.deferred.set(true);
                    debug!("navigation in flight; capture deferred");
                    return;
                }
                inner.capture();
            }
        });
        if let Some(previous) = self.pending.borrow_mut().replace(handle) {
            previous.cancel();
        }
    }

    fn capture(&self) {
        let Some(surface) = self.surface.upgrade() else {
            debug!("surface dropped; capture skipped");
            return;
        };
        let encoded = snapshot::encode(&*surface.borrow());
        match encoded {
            Ok(snapshot) => {
                let mut history = self.history.borrow_mut();
                history.push(snapshot);
                debug!(entries = history.len(), cursor = ?history.cursor(), "change captured");
            }
            Err(e) => warn!(error = %e, "change capture failed to encode scene"),
        }
    }
}
