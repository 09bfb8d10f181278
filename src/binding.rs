//! Rendering-boundary subscriptions on a counter.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::counter::CounterView;

type BindingCallback = Rc<RefCell<dyn FnMut(&CounterView)>>;

/// Identifies one binding on a [`Counter`](crate::Counter).
///
/// Returned by [`Counter::bind`](crate::Counter::bind) and redeemed by
/// [`Counter::unbind`](crate::Counter::unbind).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BindingId(u64);

/// The callbacks a rendering boundary has bound to a counter.
#[derive(Default)]
pub(crate) struct ChangeEmitter {
    next_id: Cell<u64>,
    bindings: RefCell<IndexMap<BindingId, BindingCallback>>,
}

impl ChangeEmitter {
    /// Adds a callback and returns its id.
    pub(crate) fn bind(&self, callback: impl FnMut(&CounterView) + 'static) -> BindingId {
        let id = BindingId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.bindings
            .borrow_mut()
            .insert(id, Rc::new(RefCell::new(callback)));
        trace!(id = id.0, "binding added");
        id
    }

    /// Removes a binding. If the id is not bound, does nothing.
    pub(crate) fn unbind(&self, id: BindingId) {
        self.bindings.borrow_mut().remove(&id);
    }

    /// Calls every binding with `view`, in the order they were added.
    pub(crate) fn notify(&self, view: &CounterView) {
        // Clone the map so callbacks can bind/unbind without invalidating
        // the iteration.
        let bindings = self.bindings.borrow().clone();
        for callback in bindings.values() {
            // A callback that re-enters the counter is still borrowed here.
            // Skip it instead of recursing into it.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                callback(view)
            }
        }
    }

    /// Calls a single binding with `view`, if it is still bound.
    pub(crate) fn notify_one(&self, id: BindingId, view: &CounterView) {
        let callback = self.bindings.borrow().get(&id).cloned();
        if let Some(callback) = callback {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                callback(view)
            }
        }
    }
}
