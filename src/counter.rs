//! The counter widget state.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::binding::{BindingId, ChangeEmitter};
use crate::derived::Derived;
use crate::prime::is_prime;

/// A discrete event dispatched by one of the widget's two controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Step the current value up by one.
    Increment,
    /// Step the current value down by one.
    Decrement,
}

/// What the rendering boundary reads after every transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterView {
    /// The current counter value.
    pub value: i64,
    /// The value the counter was constructed with.
    pub initial_value: i64,
    /// Whether the *initial* value is prime. Never reflects `value`.
    pub initial_value_is_prime: bool,
}

impl CounterView {
    /// The sentence shown next to the controls.
    ///
    /// # Example
    /// ```
    /// # use tally::Counter;
    /// let view = Counter::new(7).view();
    /// assert_eq!(
    ///     view.info_sentence(),
    ///     "The initial counter value was 7. It is a prime number."
    /// );
    /// ```
    pub fn info_sentence(&self) -> String {
        format!(
            "The initial counter value was {}. It is {} prime number.",
            self.initial_value,
            if self.initial_value_is_prime {
                "a"
            } else {
                "not a"
            }
        )
    }
}

struct Core {
    initial: i64,
    current: Cell<i64>,
    initial_is_prime: Derived<i64, bool>,
    emitter: ChangeEmitter,
    cleanups: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Core {
    fn view(&self) -> CounterView {
        CounterView {
            value: self.current.get(),
            initial_value: self.initial,
            initial_value_is_prime: *self.initial_is_prime.get(self.initial),
        }
    }

    fn apply(&self, transition: Transition) {
        let next = match transition {
            Transition::Increment => self.current.get() + 1,
            Transition::Decrement => self.current.get() - 1,
        };
        self.current.set(next);
        trace!(value = next, ?transition, "counter stepped");
        self.emitter.notify(&self.view());
    }
}

/// A counter with two transitions and a primality flag derived from its
/// initial value.
///
/// The flag is cached on the initial value alone: reading it repeatedly, or
/// mutating the counter, never reruns the primality test.
///
/// # Example
/// ```
/// # use tally::{Counter, Transition};
/// let counter = Counter::new(7);
/// assert_eq!(counter.value(), 7);
/// assert!(counter.initial_value_is_prime());
///
/// counter.apply(Transition::Increment);
/// counter.apply(Transition::Increment);
/// counter.apply(Transition::Decrement);
/// assert_eq!(counter.value(), 8);
///
/// // Still about the initial value, not the current one.
/// assert!(counter.initial_value_is_prime());
/// ```
pub struct Counter {
    core: Rc<Core>,
    dispatch: Rc<dyn Fn(Transition)>,
}

impl Counter {
    /// Creates a counter. `initial_count` is the whole configuration
    /// surface: the current value starts equal to it and the primality flag
    /// is derived from it.
    pub fn new(initial_count: i64) -> Self {
        debug!(initial_count, "counter created");
        let core = Rc::new(Core {
            initial: initial_count,
            current: Cell::new(initial_count),
            initial_is_prime: Derived::new(|n: &i64| is_prime(*n)),
            emitter: ChangeEmitter::default(),
            cleanups: RefCell::new(Vec::new()),
        });
        let dispatch: Rc<dyn Fn(Transition)> = Rc::new({
            let core: Weak<Core> = Rc::downgrade(&core);
            move |transition| {
                // A handle that outlived its counter dispatches as a no-op.
                if let Some(core) = core.upgrade() {
                    core.apply(transition);
                }
            }
        });
        Self { core, dispatch }
    }

    /// The value the counter was constructed with.
    pub fn initial_value(&self) -> i64 {
        self.core.initial
    }

    /// The current counter value.
    pub fn value(&self) -> i64 {
        self.core.current.get()
    }

    /// Whether the initial value is prime.
    ///
    /// Derived from [`initial_value`](Self::initial_value), never from
    /// [`value`](Self::value). Computed once per instance and cached.
    pub fn initial_value_is_prime(&self) -> bool {
        *self.core.initial_is_prime.get(self.core.initial)
    }

    /// How many times the primality test has actually run for this
    /// instance. The flag is cached on the initial value, so this stays at
    /// one for the life of the counter.
    pub fn primality_computations(&self) -> u32 {
        self.core.initial_is_prime.computations()
    }

    /// A snapshot of everything the rendering boundary displays.
    pub fn view(&self) -> CounterView {
        self.core.view()
    }

    /// Applies a transition and notifies every binding with a fresh view.
    pub fn apply(&self, transition: Transition) {
        self.core.apply(transition);
    }

    /// Shorthand for [`apply`](Self::apply) with [`Transition::Increment`].
    pub fn increment(&self) {
        self.apply(Transition::Increment);
    }

    /// Shorthand for [`apply`](Self::apply) with [`Transition::Decrement`].
    pub fn decrement(&self) {
        self.apply(Transition::Decrement);
    }

    /// The dispatch handle for the widget's controls.
    ///
    /// The handle is created once in [`new`](Self::new); every call returns
    /// a clone of that same `Rc`, so consumers comparing handler identity
    /// for change detection see no churn.
    ///
    /// # Example
    /// ```
    /// # use std::rc::Rc;
    /// # use tally::{Counter, Transition};
    /// let counter = Counter::new(0);
    /// let dispatch = counter.dispatcher();
    /// assert!(Rc::ptr_eq(&dispatch, &counter.dispatcher()));
    ///
    /// dispatch(Transition::Increment);
    /// assert_eq!(counter.value(), 1);
    /// ```
    pub fn dispatcher(&self) -> Rc<dyn Fn(Transition)> {
        self.dispatch.clone()
    }

    /// Binds a rendering-boundary callback.
    ///
    /// The callback runs once immediately with the current view, then again
    /// after every transition, until [`unbind`](Self::unbind) or teardown.
    pub fn bind(&self, callback: impl FnMut(&CounterView) + 'static) -> BindingId {
        let id = self.core.emitter.bind(callback);
        self.core.emitter.notify_one(id, &self.core.view());
        id
    }

    /// Removes a binding. Unbinding an id that is no longer bound does
    /// nothing.
    pub fn unbind(&self, id: BindingId) {
        self.core.emitter.unbind(id);
    }

    /// Registers a callback that runs when the counter is dropped.
    pub fn on_teardown(&self, callback: impl FnOnce() + 'static) {
        self.core.cleanups.borrow_mut().push(Box::new(callback));
    }
}

impl Drop for Counter {
    fn drop(&mut self) {
        debug!(initial_count = self.core.initial, "counter torn down");
        for cleanup in self.core.cleanups.take() {
            cleanup();
        }
    }
}
